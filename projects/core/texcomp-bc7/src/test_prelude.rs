//! Common test imports and sample data for BC7 tests
#![allow(unused_imports)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use alloc::{format, string::String, vec, vec::Vec};

pub use rstest::rstest;

pub use texcomp_common::color_8888::Color8888;
pub use texcomp_common::pixel_block::PixelBlock;

/// Small xorshift generator so "noisy" test blocks are reproducible.
pub(crate) struct TestRng(u32);

impl TestRng {
    pub(crate) fn new(seed: u32) -> Self {
        Self(seed | 1)
    }

    pub(crate) fn next_u8(&mut self) -> u8 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 >> 24) as u8
    }
}

fn block_from_fn(f: impl Fn(usize, usize) -> Color8888) -> PixelBlock {
    let mut block = PixelBlock::new(Color8888::default());
    for y in 0..4 {
        for x in 0..4 {
            block.set_pixel(x, y, f(x, y));
        }
    }
    block
}

/// A handful of blocks covering the different shapes the encoder has to deal with.
pub(crate) fn sample_blocks() -> Vec<(&'static str, PixelBlock)> {
    let mut rng = TestRng::new(0xC0FFEE);
    let mut noise = PixelBlock::new(Color8888::default());
    for pixel in noise.pixels.iter_mut() {
        *pixel = Color8888::new(rng.next_u8(), rng.next_u8(), rng.next_u8(), rng.next_u8());
    }

    let mut near_solid = PixelBlock::new(Color8888::new(90, 90, 90, 255));
    near_solid.set_pixel(2, 1, Color8888::new(91, 90, 90, 255));

    vec![
        (
            "opaque gradient",
            block_from_fn(|x, y| Color8888::new((x * 60) as u8, (y * 60) as u8, 128, 255)),
        ),
        (
            "alpha gradient",
            block_from_fn(|x, y| Color8888::new(200, 40, 90, (x * 16 + y * 64) as u8)),
        ),
        (
            "anticorrelated",
            block_from_fn(|x, y| {
                let t = (x + y * 4) as u8 * 16;
                Color8888::new(t, 255 - t, t / 2, 255)
            }),
        ),
        (
            "two colours",
            block_from_fn(|x, y| {
                if (x + y) % 3 == 0 {
                    Color8888::new(250, 10, 10, 255)
                } else {
                    Color8888::new(10, 10, 250, 128)
                }
            }),
        ),
        ("noise", noise),
        ("near solid", near_solid),
    ]
}

/// A block laid out in the shape of `partition`, one flat colour per subset.
pub(crate) fn partition_shaped_block(subsets: usize, partition: usize) -> PixelBlock {
    const COLORS: [Color8888; 3] = [
        Color8888::new(230, 20, 30, 255),
        Color8888::new(15, 200, 40, 255),
        Color8888::new(40, 60, 220, 255),
    ];
    let mut block = PixelBlock::new(Color8888::default());
    for (pixel, slot) in block.pixels.iter_mut().enumerate() {
        *slot = COLORS[crate::partitions::subset_of(subsets, partition, pixel)];
    }
    block
}
