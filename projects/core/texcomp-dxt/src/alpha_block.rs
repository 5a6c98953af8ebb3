//! BC4 style alpha block: two 8-bit endpoints and 3-bit indices.

use texcomp_common::pixel_block::PixelBlock;

/// 8 value palette for `a0 > a1`.
pub(crate) fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (a0, a1) = (a0 as u16, a1 as u16);
    let mut palette = [a0 as u8, a1 as u8, 0, 0, 0, 0, 0, 0];
    for (step, value) in palette[2..].iter_mut().enumerate() {
        let weight1 = step as u16 + 1;
        *value = (((7 - weight1) * a0 + weight1 * a1) / 7) as u8;
    }
    palette
}

/// Encodes the alpha channel of `block`, returning the 8 encoded bytes and the squared error.
pub(crate) fn encode_alpha_block(block: &PixelBlock) -> ([u8; 8], u32) {
    let mut a0 = 0u8;
    let mut a1 = u8::MAX;
    for pixel in &block.pixels {
        a0 = a0.max(pixel.a);
        a1 = a1.min(pixel.a);
    }

    let mut indices = 0u64;
    let mut error = 0u32;
    if a0 != a1 {
        let palette = alpha_palette(a0, a1);
        for (position, pixel) in block.pixels.iter().enumerate() {
            let mut best_index = 0u64;
            let mut best_error = u32::MAX;
            for (index, &value) in palette.iter().enumerate() {
                let d = pixel.a as i32 - value as i32;
                let distance = (d * d) as u32;
                if distance < best_error {
                    best_error = distance;
                    best_index = index as u64;
                }
            }
            indices |= best_index << (position * 3);
            error += best_error;
        }
    }

    let mut out = [0u8; 8];
    out[0] = a0;
    out[1] = a1;
    out[2..8].copy_from_slice(&indices.to_le_bytes()[..6]);
    (out, error)
}
