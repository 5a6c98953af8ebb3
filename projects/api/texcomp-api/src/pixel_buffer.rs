//! Borrowed, validated view of an RGBA8 image.

use crate::error::CompressError;
use texcomp_common::pixel_block::{PixelBlock, PIXEL_BLOCK_BYTES};

/// A row-major RGBA8 image whose dimensions are multiples of 4.
///
/// Block `i` is the 4x4 block at `(i % blocks_per_row, i / blocks_per_row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wraps `data` as a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// - [`CompressError::EmptyInput`] if `data` is empty
    /// - [`CompressError::InvalidDimensions`] if either dimension is zero or not a multiple of 4
    /// - [`CompressError::InvalidInputLength`] if `data` is not `width * height * 4` bytes
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, CompressError> {
        if data.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        if width == 0 || height == 0 || width % 4 != 0 || height % 4 != 0 {
            return Err(CompressError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(CompressError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(CompressError::InvalidInputLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps raw bytes as a strip 4 pixels tall, so that every 64 bytes of input is one block.
    ///
    /// # Errors
    ///
    /// - [`CompressError::EmptyInput`] if `data` is empty
    /// - [`CompressError::InvalidInputLength`] if `data` is not a multiple of 64 bytes
    pub fn from_block_strip(data: &'a [u8]) -> Result<Self, CompressError> {
        if data.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        if data.len() % PIXEL_BLOCK_BYTES != 0 {
            return Err(CompressError::InvalidInputLength {
                expected: data.len().next_multiple_of(PIXEL_BLOCK_BYTES),
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width: data.len() / 16,
            height: 4,
        })
    }

    /// The raw RGBA8 bytes.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of blocks in each row.
    pub fn blocks_per_row(&self) -> usize {
        self.width / 4
    }

    /// Number of rows of blocks.
    pub fn blocks_per_column(&self) -> usize {
        self.height / 4
    }

    /// Total number of 4x4 blocks.
    pub fn block_count(&self) -> usize {
        self.blocks_per_row() * self.blocks_per_column()
    }

    /// Gathers block `index` in raster order.
    ///
    /// # Panics
    ///
    /// If `index >= self.block_count()`.
    #[inline]
    pub fn block(&self, index: usize) -> PixelBlock {
        let blocks_per_row = self.blocks_per_row();
        PixelBlock::from_image(
            self.data,
            self.width,
            index % blocks_per_row,
            index / blocks_per_row,
        )
    }
}
