use crate::commands::compress::print_timing;
use crate::error::CliError;
use crate::util::synthesize_image;
use argh::FromArgs;
use bytesize::ByteSize;
use texcomp_api::{compress_image, CompressionSettings, ExecutionStrategy, PixelBuffer};
use texcomp_common::format::CompressionFormat;
use tracing::info;

#[derive(FromArgs, Debug)]
/// Time every execution strategy on a synthetic image
#[argh(subcommand, name = "benchmark")]
pub struct BenchmarkCmd {
    /// image width in pixels, a multiple of 4
    #[argh(option, default = "512")]
    pub width: usize,

    /// image height in pixels, a multiple of 4
    #[argh(option, default = "512")]
    pub height: usize,

    /// threads used by the parallel strategies
    #[argh(option, default = "4")]
    pub threads: usize,

    /// blocks per job for the worker queue
    #[argh(option, default = "16")]
    pub job_size: usize,

    /// search budget from 0 (fastest) to 256 (best)
    #[argh(option, default = "50")]
    pub quality: i32,

    /// times to repeat each strategy
    #[argh(option, default = "3")]
    pub repetitions: usize,

    /// block format: bptc, dxt1 or dxt5
    #[argh(option, default = "CompressionFormat::Bptc")]
    pub format: CompressionFormat,
}

impl BenchmarkCmd {
    /// Settings that make [`ExecutionStrategy::select`] pick `strategy`.
    fn settings_for(&self, strategy: ExecutionStrategy) -> CompressionSettings {
        let threads = self.threads.max(2);
        let builder = CompressionSettings::builder()
            .format(self.format)
            .quality(self.quality)
            .repetitions(self.repetitions);
        match strategy {
            ExecutionStrategy::Serial => builder.threads(1),
            ExecutionStrategy::AtomicBarrier => builder.threads(threads).use_atomics(true),
            ExecutionStrategy::ThreadGroup => builder.threads(threads),
            ExecutionStrategy::WorkerQueue => {
                builder.threads(threads).job_size(self.job_size.max(1))
            }
        }
        .build()
    }
}

/// Timing of a single strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyTiming {
    pub strategy: ExecutionStrategy,
    pub average_ms: f64,
}

pub fn handle_benchmark_command(cmd: BenchmarkCmd) -> Result<(), CliError> {
    let image = synthesize_image(cmd.width, cmd.height);
    info!(
        "Benchmarking {}x{} {} at quality {}",
        cmd.width, cmd.height, cmd.format, cmd.quality
    );
    println!("Data processed: {}", ByteSize(image.len() as u64));

    for timing in run_benchmark(&cmd, &image)? {
        print_timing(timing.strategy.name(), timing.average_ms, image.len() as u64);
    }
    Ok(())
}

/// Runs every strategy over `image`, checking each output against [`ExecutionStrategy::Serial`].
pub fn run_benchmark(cmd: &BenchmarkCmd, image: &[u8]) -> Result<Vec<StrategyTiming>, CliError> {
    let pixels = PixelBuffer::new(image, cmd.width, cmd.height)?;
    let size = pixels.block_count() * cmd.format.bytes_per_block();
    let mut reference: Option<Vec<u8>> = None;
    let mut timings = Vec::new();

    for strategy in ExecutionStrategy::all_values().iter().copied() {
        let settings = cmd.settings_for(strategy);
        let mut output = vec![0u8; size];
        let report = compress_image(&pixels, &mut output, &settings)?;

        match &reference {
            None => reference = Some(output),
            Some(expected) if *expected != output => {
                return Err(CliError::StrategyMismatch {
                    strategy: strategy.name(),
                });
            }
            Some(_) => {}
        }

        timings.push(StrategyTiming {
            strategy: report.strategy,
            average_ms: report.average_ms,
        });
    }

    Ok(timings)
}
