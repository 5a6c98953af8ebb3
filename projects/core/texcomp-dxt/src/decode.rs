//! Reference DXT1 and DXT5 decoders, used to verify the encoders.
//!
//! Uses the DX9 style rounding, matching the palettes built by the encoders.

use crate::alpha_block::alpha_palette;
use crate::color_block::color_palette;
use texcomp_common::color_565::Color565;
use texcomp_common::color_8888::Color8888;
use texcomp_common::pixel_block::PixelBlock;

fn decode_color(src: &[u8; 8]) -> [Color8888; 4] {
    let c0 = Color565::from_raw(u16::from_le_bytes([src[0], src[1]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([src[2], src[3]]));

    if c0.greater_than(&c1) {
        color_palette(c0, c1).map(|[r, g, b]| Color8888::new(r, g, b, 255))
    } else {
        // Three colour block, index 3 is transparent black.
        let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
        let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);
        [
            c0.to_color_8888(),
            c1.to_color_8888(),
            Color8888::new(
                ((r0 + r1) / 2) as u8,
                ((g0 + g1) / 2) as u8,
                ((b0 + b1) / 2) as u8,
                255,
            ),
            Color8888::new(0, 0, 0, 0),
        ]
    }
}

pub(crate) fn decode_dxt1_block(src: &[u8; 8]) -> PixelBlock {
    let dict = decode_color(src);
    let indices = u32::from_le_bytes([src[4], src[5], src[6], src[7]]);

    let mut result = PixelBlock::new(Color8888::default());
    for (position, pixel) in result.pixels.iter_mut().enumerate() {
        *pixel = dict[((indices >> (position * 2)) & 0b11) as usize];
    }
    result
}

pub(crate) fn decode_dxt5_block(src: &[u8; 16]) -> PixelBlock {
    let mut color = [0u8; 8];
    color.copy_from_slice(&src[8..]);
    let mut result = decode_dxt1_block(&color);

    let (alpha0, alpha1) = (src[0], src[1]);
    let alpha_values = if alpha0 > alpha1 {
        alpha_palette(alpha0, alpha1)
    } else {
        let (a0, a1) = (alpha0 as u16, alpha1 as u16);
        [
            alpha0,
            alpha1,
            ((4 * a0 + a1) / 5) as u8,
            ((3 * a0 + 2 * a1) / 5) as u8,
            ((2 * a0 + 3 * a1) / 5) as u8,
            ((a0 + 4 * a1) / 5) as u8,
            0,
            255,
        ]
    };

    let mut index_bytes = [0u8; 8];
    index_bytes[..6].copy_from_slice(&src[2..8]);
    let alpha_indices = u64::from_le_bytes(index_bytes);
    for (position, pixel) in result.pixels.iter_mut().enumerate() {
        pixel.a = alpha_values[((alpha_indices >> (position * 3)) & 0b111) as usize];
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use crate::{encode_dxt1_block, encode_dxt5_block};

    #[test]
    fn decodes_white_with_alpha_indices() {
        let block = [
            // Alpha data
            0, 0, 0, 255, 255, 255, 255, 255, // Color data
            255, 255, 255, 255, 0, 0, 0, 0,
        ];
        let decoded = decode_dxt5_block(&block);
        // Index 0 for the first pixel; equal endpoints select the 6 value palette.
        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(255, 255, 255, 0));
        // Index 7 maps to opaque.
        assert_eq!(decoded.get_pixel(3, 3), Color8888::new(255, 255, 255, 255));
    }

    #[test]
    fn solid_block_survives_dxt1() {
        let color = Color8888::new(255, 0, 0, 255);
        let block = PixelBlock::new(color);
        let decoded = decode_dxt1_block(&encode_dxt1_block(&block));
        assert_eq!(decoded, block);
    }

    #[rstest]
    #[case(4)]
    #[case(16)]
    fn dxt5_alpha_error_is_small(#[case] alpha_step: u8) {
        let block = gradient_block(alpha_step);
        let decoded = decode_dxt5_block(&encode_dxt5_block(&block));
        for (source, decoded) in block.pixels.iter().zip(decoded.pixels.iter()) {
            // Palette spacing is (max - min) / 7, so the nearest entry is within half a step.
            let step = (15 * alpha_step as i32) / 7 + 1;
            assert!((source.a as i32 - decoded.a as i32).abs() <= step / 2 + 1);
        }
    }

    #[test]
    fn dxt5_colour_half_matches_dxt1() {
        let block = gradient_block(8);
        let dxt1 = encode_dxt1_block(&block);
        let dxt5 = encode_dxt5_block(&block);
        assert_eq!(&dxt5[8..], &dxt1[..]);
    }
}
