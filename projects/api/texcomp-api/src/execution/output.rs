//! Shared, block addressed view of the output buffer.

use core::marker::PhantomData;

/// An output buffer that several threads write into at once, each to its own blocks.
///
/// Holds the pointer and length of a `&mut [u8]` for the lifetime `'a`. Threads obtain
/// disjoint sub-slices through [`DisjointOutput::block_range_mut`].
pub(crate) struct DisjointOutput<'a> {
    ptr: *mut u8,
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

// SAFETY: Access is only through `block_range_mut`, whose callers guarantee no two live
// slices overlap, so sharing the view is equivalent to sharing disjoint `&mut [u8]`s.
unsafe impl Send for DisjointOutput<'_> {}
unsafe impl Sync for DisjointOutput<'_> {}

impl<'a> DisjointOutput<'a> {
    pub(crate) fn new(output: &'a mut [u8]) -> Self {
        Self {
            ptr: output.as_mut_ptr(),
            len: output.len(),
            _marker: PhantomData,
        }
    }

    /// Returns the bytes of blocks `first_block .. first_block + block_count`.
    ///
    /// # Panics
    ///
    /// If the range lies outside of the buffer.
    ///
    /// # Safety
    ///
    /// No other slice returned by this method for an overlapping block range may be alive
    /// at the same time.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn block_range_mut(
        &self,
        first_block: usize,
        block_count: usize,
        bytes_per_block: usize,
    ) -> &mut [u8] {
        let start = first_block * bytes_per_block;
        let len = block_count * bytes_per_block;
        assert!(
            start.checked_add(len).is_some_and(|end| end <= self.len),
            "block range {first_block}+{block_count} outside of output"
        );
        core::slice::from_raw_parts_mut(self.ptr.add(start), len)
    }
}
