//! Common test imports for DXT tests
#![allow(unused_imports)]

extern crate alloc;

pub use alloc::{vec, vec::Vec};

pub use rstest::rstest;

pub use texcomp_common::color_8888::Color8888;
pub use texcomp_common::pixel_block::PixelBlock;

pub(crate) fn gradient_block(alpha_step: u8) -> PixelBlock {
    let mut block = PixelBlock::new(Color8888::default());
    for y in 0..4 {
        for x in 0..4 {
            let t = (y * 4 + x) as u8;
            block.set_pixel(
                x,
                y,
                Color8888::new(t * 16, 128 + t * 4, 255 - t * 8, 255 - t * alpha_step),
            );
        }
    }
    block
}
