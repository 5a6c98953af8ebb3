//! # Pixel Block
//!
//! [`PixelBlock`] holds the 16 source pixels of one 4x4 block, gathered from a larger
//! RGBA8 image right before the block is encoded. Blocks are never stored, each encoder
//! invocation materialises its own.
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```
//!
//! ## Usage
//!
//! ```
//! use texcomp_common::color_8888::Color8888;
//! use texcomp_common::pixel_block::PixelBlock;
//!
//! // 8x4 image: two blocks side by side, left one black, right one white.
//! let mut image = [0u8; 8 * 4 * 4];
//! for row in 0..4 {
//!     let start = (row * 8 + 4) * 4;
//!     image[start..start + 16].fill(255);
//! }
//!
//! let right = PixelBlock::from_image(&image, 8, 1, 0);
//! assert!(right.has_identical_pixels());
//! assert_eq!(right.pixels[0], Color8888::new(255, 255, 255, 255));
//! ```

use crate::color_8888::Color8888;

/// Size of a block of RGBA8 pixels in bytes.
pub const PIXEL_BLOCK_BYTES: usize = 16 * 4;

/// A 4x4 block of RGBA8 source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBlock {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl PixelBlock {
    /// Constructs a new block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use texcomp_common::color_8888::Color8888;
    /// use texcomp_common::pixel_block::PixelBlock;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = PixelBlock::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub const fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Constructs a block from 16 pixels in row-major order.
    pub const fn from_pixels(pixels: [Color8888; 16]) -> Self {
        Self { pixels }
    }

    /// Gathers block `(block_x, block_y)` out of a row-major RGBA8 image `width` pixels wide.
    ///
    /// # Panics
    ///
    /// If the block lies outside of `image`. Callers validate image dimensions up front.
    pub fn from_image(image: &[u8], width: usize, block_x: usize, block_y: usize) -> Self {
        let stride = width * 4;
        let mut pixels = [Color8888::default(); 16];
        for (row, chunk) in pixels.chunks_exact_mut(4).enumerate() {
            let start = (block_y * 4 + row) * stride + block_x * 16;
            let src = &image[start..start + 16];
            for (pixel, bytes) in chunk.iter_mut().zip(src.chunks_exact(4)) {
                *pixel = Color8888::new(bytes[0], bytes[1], bytes[2], bytes[3]);
            }
        }
        Self { pixels }
    }

    /// Gets the pixel at the specified coordinates (0-3, 0-3).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at the specified coordinates (0-3, 0-3).
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        self.pixels[y * 4 + x] = pixel;
    }

    /// Returns the pixels as `[R, G, B, A]` arrays.
    #[inline]
    pub fn to_channel_arrays(&self) -> [[u8; 4]; 16] {
        let mut out = [[0u8; 4]; 16];
        for (dst, src) in out.iter_mut().zip(self.pixels.iter()) {
            *dst = src.to_array();
        }
        out
    }

    /// Checks if all pixels in the block have the same color values
    ///
    /// # Returns
    /// `true` if all pixels in the block are identical, `false` otherwise
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = u32::from_ne_bytes(self.pixels[0].to_array());
        self.pixels
            .iter()
            .all(|pixel| u32::from_ne_bytes(pixel.to_array()) == first)
    }

    /// Checks if all pixels in the block have the same alpha values
    #[inline]
    pub fn has_identical_alpha(&self) -> bool {
        let first_pixel_alpha = self.pixels[0].a;
        self.pixels.iter().all(|pixel| pixel.a == first_pixel_alpha)
    }

    /// Checks if every pixel is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|pixel| pixel.a == 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn gradient_block() -> PixelBlock {
        let mut pixels = [Color8888::default(); 16];
        for (x, pixel) in pixels.iter_mut().enumerate() {
            *pixel = Color8888::new(x as u8 * 16, 0, 0, 255);
        }
        PixelBlock::from_pixels(pixels)
    }

    #[test]
    fn identical_pixels_detects_single_difference() {
        let pixel = Color8888::new(12, 34, 56, 78);
        let mut block = PixelBlock::new(pixel);
        assert!(block.has_identical_pixels());

        block.set_pixel(3, 3, Color8888::new(12, 34, 56, 79));
        assert!(!block.has_identical_pixels());
        assert!(!block.has_identical_alpha());
    }

    #[rstest]
    #[case(255, true)]
    #[case(254, false)]
    fn opacity(#[case] alpha: u8, #[case] expected: bool) {
        let mut block = gradient_block();
        block.set_pixel(1, 2, Color8888::new(0, 0, 0, alpha));
        assert_eq!(block.is_opaque(), expected);
    }

    #[test]
    fn from_image_reads_rows_with_stride() {
        // 8x8 image where each pixel stores its own coordinates.
        let width = 8;
        let mut image = vec![0u8; width * 8 * 4];
        for y in 0..8 {
            for x in 0..width {
                let offset = (y * width + x) * 4;
                image[offset..offset + 4].copy_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }

        let block = PixelBlock::from_image(&image, width, 1, 1);
        for y in 0..4 {
            for x in 0..4 {
                let pixel = block.get_pixel(x, y);
                assert_eq!((pixel.r, pixel.g), ((4 + x) as u8, (4 + y) as u8));
            }
        }
    }

    #[test]
    fn channel_arrays_keep_order() {
        let block = gradient_block();
        let arrays = block.to_channel_arrays();
        assert_eq!(arrays[5], [80, 0, 0, 255]);
    }
}
