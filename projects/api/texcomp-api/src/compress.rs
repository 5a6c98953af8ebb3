//! Top-level compression entry points.

use crate::dispatch::resolve;
use crate::error::CompressError;
use crate::execution::{CompressionJob, ExecutionStrategy};
use crate::pixel_buffer::PixelBuffer;
use crate::settings::CompressionSettings;
use safe_allocator_api::RawAlloc;
use texcomp_common::allocate::allocate_zeroed_align_64;
use texcomp_common::cpu_detect::has_sse41;
use texcomp_common::format::CompressionFormat;
use tracing::{debug, error, info};

/// Outcome of a successful compression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CompressionReport {
    /// The strategy that ran.
    pub strategy: ExecutionStrategy,
    /// Average time per repetition, in milliseconds.
    pub average_ms: f64,
    /// Number of blocks compressed.
    pub blocks: usize,
    /// Number of bytes written to the output.
    pub bytes_written: usize,
}

/// Size of the compressed output for `input_len` bytes of RGBA8 pixels.
///
/// DXT1 is an 8:1 ratio; DXT5 and BPTC are 4:1.
///
/// ```
/// use texcomp_api::required_output_size;
/// use texcomp_common::format::CompressionFormat;
///
/// assert_eq!(required_output_size(CompressionFormat::Dxt1, 256), 32);
/// assert_eq!(required_output_size(CompressionFormat::Bptc, 256), 64);
/// ```
pub fn required_output_size(format: CompressionFormat, input_len: usize) -> usize {
    format.required_output_size(input_len)
}

/// Compresses `pixels` into `output` in raster block order.
///
/// # Parameters
///
/// - `pixels`: The image to compress
/// - `output`: Receives the compressed blocks; block `(x, y)` lands at
///   `(y * blocks_per_row + x) * bytes_per_block`
/// - `settings`: Format, quality and threading settings
///
/// # Returns
///
/// A [`CompressionReport`] with the average time per repetition.
///
/// # Errors
///
/// - [`CompressError::SimdUnsupported`] if SIMD was requested and is not available
/// - [`CompressError::OutputBufferTooSmall`] if `output` cannot hold every block
/// - [`CompressError::UnimplementedCodec`] if no codec matches the settings
/// - [`CompressError::ThreadSpawn`] if a worker thread could not be started
///
/// On a precondition failure `output` is left untouched.
pub fn compress_image(
    pixels: &PixelBuffer<'_>,
    output: &mut [u8],
    settings: &CompressionSettings,
) -> Result<CompressionReport, CompressError> {
    check_simd_support(settings).map_err(report_error)?;
    compress_validated(pixels, output, settings).map_err(report_error)
}

/// Compresses raw RGBA8 bytes, laid out as a strip of blocks 4 pixels tall.
///
/// Every 64 bytes of `input` is one block; see [`PixelBuffer::from_block_strip`].
///
/// # Errors
///
/// - [`CompressError::EmptyInput`] if `input` is empty
/// - [`CompressError::InvalidInputLength`] if `input` is not a whole number of blocks
/// - Everything [`compress_image`] can return
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use texcomp_api::{compress_image_data, CompressionSettings};
///
/// let pixels = vec![255u8; 64 * 4]; // 4 blocks
/// let mut output = vec![0u8; 16 * 4];
/// let report = compress_image_data(&pixels, &mut output, &CompressionSettings::default())?;
/// assert_eq!(report.bytes_written, 64);
/// # Ok(())
/// # }
/// ```
pub fn compress_image_data(
    input: &[u8],
    output: &mut [u8],
    settings: &CompressionSettings,
) -> Result<CompressionReport, CompressError> {
    check_simd_support(settings).map_err(report_error)?;
    let pixels = PixelBuffer::from_block_strip(input).map_err(report_error)?;
    compress_validated(&pixels, output, settings).map_err(report_error)
}

/// Compresses `pixels` into a new 64-byte aligned buffer of exactly the required size.
///
/// # Errors
///
/// - [`CompressError::AllocationFailed`] if the output could not be allocated
/// - Everything [`compress_image`] can return
pub fn compress_image_allocating(
    pixels: &PixelBuffer<'_>,
    settings: &CompressionSettings,
) -> Result<RawAlloc, CompressError> {
    check_simd_support(settings).map_err(report_error)?;
    let needed = pixels.block_count() * settings.format().bytes_per_block();
    let mut output = allocate_zeroed_align_64(needed)
        .map_err(CompressError::from)
        .map_err(report_error)?;
    compress_validated(pixels, output.as_mut_slice(), settings).map_err(report_error)?;
    Ok(output)
}

fn check_simd_support(settings: &CompressionSettings) -> Result<(), CompressError> {
    if settings.use_simd() && !has_sse41() {
        return Err(CompressError::SimdUnsupported);
    }
    Ok(())
}

fn compress_validated(
    pixels: &PixelBuffer<'_>,
    output: &mut [u8],
    settings: &CompressionSettings,
) -> Result<CompressionReport, CompressError> {
    let needed = pixels.block_count() * settings.format().bytes_per_block();
    if output.len() < needed {
        return Err(CompressError::OutputBufferTooSmall {
            needed,
            actual: output.len(),
        });
    }

    let codec = resolve(settings)?;
    let job = CompressionJob::new(*pixels, codec, settings);
    let strategy = ExecutionStrategy::select(settings);
    debug!(
        %strategy,
        format = %settings.format(),
        quality = settings.quality().get(),
        threads = settings.threads(),
        job_size = settings.job_size(),
        blocks = job.block_count(),
        "compressing"
    );

    let average_ms = strategy.run(&job, &mut output[..needed])?;
    info!("Compression time: {average_ms:.3} ms");

    Ok(CompressionReport {
        strategy,
        average_ms,
        blocks: job.block_count(),
        bytes_written: needed,
    })
}

fn report_error(err: CompressError) -> CompressError {
    error!("TexComp -- {err}");
    err
}
