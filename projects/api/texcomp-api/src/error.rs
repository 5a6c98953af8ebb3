//! Error types for compression operations.

use texcomp_common::allocate::AllocateError;
use texcomp_common::format::{CompressionFormat, UnknownFormat};
use thiserror::Error;

/// Errors that can occur while compressing an image.
///
/// Every precondition is checked before any block is encoded; when one of these is returned
/// from a precondition check, the output buffer has not been written to.
#[derive(Debug, Error)]
pub enum CompressError {
    /// SIMD was requested, but this platform does not support SSE 4.1.
    #[error("Platform does not support SIMD (SSE 4.1 required).")]
    SimdUnsupported,

    /// No pixel data was provided.
    #[error("No data sent to compress.")]
    EmptyInput,

    /// The image dimensions are not multiples of 4.
    #[error("Invalid image dimensions: {width}x{height}. Both must be non-zero multiples of 4.")]
    InvalidDimensions {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
    },

    /// The pixel data length does not match the image dimensions.
    #[error("Invalid input length: expected {expected} bytes, got {actual} bytes.")]
    InvalidInputLength {
        /// The required size in bytes
        expected: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The output buffer is too small for the compressed data.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The format could not be parsed.
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    /// No codec exists for the requested combination of settings.
    #[error("No {format} codec available: {reason}.")]
    UnimplementedCodec {
        /// The requested format
        format: CompressionFormat,
        /// What is missing
        reason: &'static str,
    },

    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    /// Memory allocation failed.
    #[error("Memory allocation failed: {0}")]
    AllocationFailed(#[from] AllocateError),
}
