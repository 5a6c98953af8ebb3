//! Aligned allocations for compressed output buffers.
//!
//! [`allocate_align_64`] hands out uninitialized memory aligned to 64 bytes, which keeps every
//! 16-byte block on a cache line boundary regardless of where the block stream starts.
//! The returned [`RawAlloc`] frees itself when dropped.

use core::alloc::{Layout, LayoutError};
use safe_allocator_api::prelude::*;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Allocates data with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new(layout)?)
}

/// Allocates a 64-byte aligned buffer and zero fills it.
///
/// Used where the buffer is handed to code that only writes part of it, so the remainder
/// never exposes uninitialized bytes.
pub fn allocate_zeroed_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let mut alloc = allocate_align_64(num_bytes)?;
    alloc.as_mut_slice().fill(0);
    Ok(alloc)
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// The requested size could not be turned into a layout.
    #[error("Invalid layout provided. Likely due to `num_bytes` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// The allocator returned no memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}
