//! Common test imports and images for the API tests.
#![allow(unused_imports)]

pub use rstest::rstest;
pub use std::{vec, vec::Vec};

use texcomp_common::color_8888::Color8888;
use texcomp_common::pixel_block::PixelBlock;

/// A `width` x `height` RGBA8 image with smooth gradients and a little noise.
pub(crate) fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut state = 0x2545_F491u32;
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state & 0x0F) as usize;
            data.push(((x * 255) / width.max(1)) as u8);
            data.push(((y * 255) / height.max(1)) as u8);
            data.push((((x + y) * 8 + noise) & 0xFF) as u8);
            data.push((255 - ((x * 4 + noise) & 0x7F)) as u8);
        }
    }
    data
}

/// A block with a gradient and partial transparency.
pub(crate) fn sample_block() -> PixelBlock {
    let mut block = PixelBlock::new(Color8888::default());
    for y in 0..4 {
        for x in 0..4 {
            let t = (y * 4 + x) as u8;
            block.set_pixel(x, y, Color8888::new(t * 15, 200 - t * 10, 40 + t * 3, 255 - t * 4));
        }
    }
    block
}
