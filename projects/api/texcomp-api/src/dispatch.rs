//! Picks the block codec for a set of [`CompressionSettings`].

use crate::error::CompressError;
use crate::settings::CompressionSettings;
use texcomp_bc7::{Bc7BlockStats, Bc7Encoder, Bc7Kernel};
use texcomp_common::cpu_detect::has_sse41;
use texcomp_common::format::CompressionFormat;
use texcomp_common::pixel_block::PixelBlock;
use tracing::warn;

/// A block encoder with its parameters baked in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockCodec {
    /// BC7, with quality and kernel fixed.
    Bc7(Bc7Encoder),
    /// DXT1 (BC1).
    Dxt1,
    /// DXT5 (BC3).
    Dxt5,
}

impl BlockCodec {
    /// Format this codec writes.
    pub fn format(&self) -> CompressionFormat {
        match self {
            BlockCodec::Bc7(_) => CompressionFormat::Bptc,
            BlockCodec::Dxt1 => CompressionFormat::Dxt1,
            BlockCodec::Dxt5 => CompressionFormat::Dxt5,
        }
    }

    /// Size of one encoded block in bytes.
    pub fn bytes_per_block(&self) -> usize {
        self.format().bytes_per_block()
    }

    /// Encodes `block` into `out`, which must be exactly [`Self::bytes_per_block`] long.
    #[inline]
    pub fn encode_into(&self, block: &PixelBlock, out: &mut [u8]) {
        match self {
            BlockCodec::Bc7(encoder) => out.copy_from_slice(&encoder.encode_block(block)),
            BlockCodec::Dxt1 => out.copy_from_slice(&texcomp_dxt::encode_dxt1_block(block)),
            BlockCodec::Dxt5 => out.copy_from_slice(&texcomp_dxt::encode_dxt5_block(block)),
        }
    }

    /// Like [`Self::encode_into`], also returning stats when the codec has a stats variant.
    #[inline]
    pub fn encode_with_stats_into(&self, block: &PixelBlock, out: &mut [u8]) -> Option<Bc7BlockStats> {
        match self {
            BlockCodec::Bc7(encoder) => {
                let (bytes, stats) = encoder.encode_block_with_stats(block);
                out.copy_from_slice(&bytes);
                Some(stats)
            }
            _ => {
                self.encode_into(block, out);
                None
            }
        }
    }
}

/// The outcome of [`resolve`]: which codec to run, and whether stats are collected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedCodec {
    /// The codec to run on every block.
    pub codec: BlockCodec,
    /// `true` if a stats manager was supplied and the codec can report stats.
    pub collect_stats: bool,
}

/// Resolves the codec for `settings`, detecting SIMD support at runtime.
///
/// # Errors
///
/// See [`resolve_codec_with`].
pub fn resolve(settings: &CompressionSettings) -> Result<ResolvedCodec, CompressError> {
    resolve_codec_with(settings, has_sse41())
}

/// Resolves the codec for `settings` given whether the platform supports SIMD.
///
/// # Errors
///
/// - [`CompressError::SimdUnsupported`] if SIMD was requested and `simd_available` is `false`
/// - [`CompressError::UnimplementedCodec`] if SIMD was requested for a format with no SIMD codec
pub fn resolve_codec_with(
    settings: &CompressionSettings,
    simd_available: bool,
) -> Result<ResolvedCodec, CompressError> {
    let format = settings.format();
    if settings.use_simd() {
        if !simd_available {
            return Err(CompressError::SimdUnsupported);
        }
        if !format.supports_simd() {
            return Err(CompressError::UnimplementedCodec {
                format,
                reason: "no SIMD encoder for this format",
            });
        }
    }

    let codec = match format {
        CompressionFormat::Bptc => {
            let kernel = if settings.use_simd() {
                Bc7Kernel::Simd
            } else {
                Bc7Kernel::Portable
            };
            BlockCodec::Bc7(Bc7Encoder::new(settings.quality(), kernel))
        }
        CompressionFormat::Dxt1 => BlockCodec::Dxt1,
        CompressionFormat::Dxt5 => BlockCodec::Dxt5,
    };

    let collect_stats = match settings.stats_manager() {
        Some(_) if format.supports_stats() => true,
        Some(_) => {
            warn!(%format, "No stats variant for this format, compressing without stats");
            false
        }
        None => false,
    };

    Ok(ResolvedCodec {
        codec,
        collect_stats,
    })
}
