use crate::error::CliError;
use crate::util::{pad_to_block_multiple, Throughput};
use argh::FromArgs;
use bytesize::ByteSize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use texcomp_api::{compress_image, BlockStatsCollector, CompressionSettings, PixelBuffer};
use texcomp_common::format::CompressionFormat;
use tracing::info;

#[derive(FromArgs, Debug)]
/// Compress a raw RGBA8 image into BPTC, DXT1 or DXT5 blocks
#[argh(subcommand, name = "compress")]
pub struct CompressCmd {
    /// input file of tightly packed RGBA8 pixels
    #[argh(option)]
    pub input: PathBuf,

    /// image width in pixels
    #[argh(option)]
    pub width: usize,

    /// image height in pixels
    #[argh(option)]
    pub height: usize,

    /// output file for the compressed blocks
    #[argh(option)]
    pub output: PathBuf,

    /// block format: bptc, dxt1 or dxt5
    #[argh(option, default = "CompressionFormat::Bptc")]
    pub format: CompressionFormat,

    /// search budget from 0 (fastest) to 256 (best)
    #[argh(option, default = "50")]
    pub quality: i32,

    /// number of threads to compress with
    #[argh(option, default = "1")]
    pub threads: usize,

    /// blocks per queued job; 0 splits the image evenly between threads
    #[argh(option, default = "0")]
    pub job_size: usize,

    /// use the SSE4.1 kernel
    #[argh(switch)]
    pub simd: bool,

    /// use the atomic barrier strategy
    #[argh(switch)]
    pub atomics: bool,

    /// times to repeat the compression when timing
    #[argh(option, default = "1")]
    pub repetitions: usize,

    /// print per-mode block statistics
    #[argh(switch)]
    pub stats: bool,
}

impl CompressCmd {
    fn settings(&self, stats: Option<Arc<BlockStatsCollector>>) -> CompressionSettings {
        let mut builder = CompressionSettings::builder()
            .format(self.format)
            .quality(self.quality)
            .threads(self.threads)
            .job_size(self.job_size)
            .use_simd(self.simd)
            .use_atomics(self.atomics)
            .repetitions(self.repetitions);
        if let Some(stats) = stats {
            builder = builder.stats_manager(stats);
        }
        builder.build()
    }
}

pub fn handle_compress_command(cmd: CompressCmd) -> Result<(), CliError> {
    let input = fs::read(&cmd.input)?;
    let expected = cmd.width * cmd.height * 4;
    if input.len() != expected {
        return Err(CliError::InputSize {
            width: cmd.width,
            height: cmd.height,
            expected,
            actual: input.len(),
        });
    }

    let padded = pad_to_block_multiple(&input, cmd.width, cmd.height);
    if (padded.width, padded.height) != (cmd.width, cmd.height) {
        info!(
            "Padded {}x{} to {}x{}",
            cmd.width, cmd.height, padded.width, padded.height
        );
    }

    let collector = cmd.stats.then(|| Arc::new(BlockStatsCollector::new()));
    let settings = cmd.settings(collector.clone());
    let pixels = PixelBuffer::new(&padded.data, padded.width, padded.height)?;
    let mut output = vec![0u8; pixels.block_count() * settings.format().bytes_per_block()];
    let report = compress_image(&pixels, &mut output, &settings)?;
    fs::write(&cmd.output, &output)?;

    println!("Format: {}", settings.format());
    println!("Quality: {}", settings.quality().get());
    println!("Strategy: {}", report.strategy);
    println!("Blocks: {}", report.blocks);
    println!(
        "Data processed: {} -> {}",
        ByteSize(padded.data.len() as u64),
        ByteSize(report.bytes_written as u64)
    );
    print_timing("Average time", report.average_ms, padded.data.len() as u64);

    if let Some(collector) = collector {
        print_stats(&collector, settings.repetitions());
    }

    Ok(())
}

fn print_stats(collector: &BlockStatsCollector, repetitions: usize) {
    let histogram = collector.mode_histogram();
    let total: usize = histogram.iter().sum();
    println!("Block modes ({} records over {repetitions} repetitions):", collector.len());
    for (mode, count) in histogram.iter().enumerate() {
        let percent = if total == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / total as f64
        };
        println!("  Mode {mode}: {count} ({percent:.1}%)");
    }
    println!("Total squared error: {}", collector.total_error());
}

/// Prints the average time of a run, with the throughput over `bytes` of input.
pub fn print_timing(label: &str, average_ms: f64, bytes: u64) {
    println!(
        "{label}: {average_ms:.3} ms ({})",
        Throughput::from_millis(bytes, average_ms)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn command(input: PathBuf, output: PathBuf, width: usize, height: usize) -> CompressCmd {
        CompressCmd {
            input,
            width,
            height,
            output,
            format: CompressionFormat::Bptc,
            quality: 10,
            threads: 2,
            job_size: 0,
            simd: false,
            atomics: false,
            repetitions: 1,
            stats: true,
        }
    }

    #[test]
    fn compresses_padded_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("image.rgba");
        let output = dir.path().join("image.bc7");
        fs::write(&input, crate::util::synthesize_image(6, 5)).unwrap();

        handle_compress_command(command(input, output.clone(), 6, 5)).unwrap();

        // 6x5 pads to 8x8: four blocks of 16 bytes.
        assert_eq!(fs::read(&output).unwrap().len(), 64);
    }

    #[test]
    fn help_states_full_quality_range() {
        let early = CompressCmd::from_args(&["compress"], &["--help"]).unwrap_err();
        assert!(early.output.contains("256 (best)"));
    }

    #[test]
    fn top_quality_reaches_settings() {
        let mut cmd = command(PathBuf::new(), PathBuf::new(), 4, 4);
        cmd.quality = 256;
        assert_eq!(cmd.settings(None).quality().get(), 256);
    }

    #[test]
    fn rejects_wrong_input_size() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("image.rgba");
        fs::write(&input, [0u8; 10]).unwrap();

        let result = handle_compress_command(command(input, dir.path().join("out"), 4, 4));
        assert!(matches!(
            result,
            Err(CliError::InputSize {
                expected: 64,
                actual: 10,
                ..
            })
        ));
    }
}
