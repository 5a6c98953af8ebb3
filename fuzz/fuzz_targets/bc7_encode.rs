#![no_main]

// Decodes our BC7 output with bcdec and checks it against the error the encoder reported.

use libfuzzer_sys::{arbitrary, fuzz_target};
use texcomp_bc7::{Bc7Encoder, Bc7Kernel};
use texcomp_common::color_8888::Color8888;
use texcomp_common::pixel_block::PixelBlock;
use texcomp_common::quality::QualityLevel;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub pixels: [[u8; 4]; 16],
    pub quality: u8,
}

fuzz_target!(|input: Input| {
    let block = PixelBlock::from_pixels(input.pixels.map(Color8888::from_bytes));
    let encoder = Bc7Encoder::new(
        QualityLevel::new(input.quality as i32 % 101),
        Bc7Kernel::Portable,
    );
    let (encoded, stats) = encoder.encode_block_with_stats(&block);

    let mut decoded = [0u8; 64];
    bcdec_rs::bc7(&encoded, &mut decoded, 16);

    let mut error = 0u32;
    for (source, actual) in input.pixels.iter().flatten().zip(decoded.iter()) {
        let d = *source as i32 - *actual as i32;
        error += (d * d) as u32;
    }
    assert_eq!(error, stats.error, "Reported error does not match decoded block");
});
