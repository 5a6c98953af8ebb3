#![doc = include_str!("../README.MD")]
#![warn(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod execution;
pub mod pixel_buffer;
pub mod settings;
pub mod stats;
pub mod timing;

mod compress;

pub use compress::{
    compress_image, compress_image_allocating, compress_image_data, required_output_size,
    CompressionReport,
};
pub use dispatch::{resolve, resolve_codec_with, BlockCodec, ResolvedCodec};
pub use error::CompressError;
pub use execution::{CompressionJob, ExecutionJob, ExecutionStrategy};
pub use pixel_buffer::PixelBuffer;
pub use settings::{CompressionSettings, CompressionSettingsBuilder};
pub use stats::{BlockStatsCollector, BlockStatsRecord, StatsManager};
pub use timing::StopWatch;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
