#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;

use argh::FromArgs;
use core::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs, Debug)]
/// Block texture compressor for raw RGBA8 images
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Compress(commands::compress::CompressCmd),
    Benchmark(commands::benchmark::BenchmarkCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();

    // RUST_LOG overrides the default level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Compress(cmd) => {
            commands::compress::handle_compress_command(cmd)?;
        }
        Commands::Benchmark(cmd) => {
            commands::benchmark::handle_benchmark_command(cmd)?;
        }
    }

    Ok(())
}
