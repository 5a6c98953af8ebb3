//! DXT1 style colour block: two RGB565 endpoints and 2-bit indices.

use texcomp_common::color_565::Color565;
use texcomp_common::color_fit::principal_axis_endpoints;
use texcomp_common::pixel_block::PixelBlock;

/// 4 colour palette for `c0 > c1`, expanded to 8 bits per channel.
pub(crate) fn color_palette(c0: Color565, c1: Color565) -> [[u8; 3]; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);
    [
        [r0 as u8, g0 as u8, b0 as u8],
        [r1 as u8, g1 as u8, b1 as u8],
        [
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
        ],
        [
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
        ],
    ]
}

#[inline]
fn rgb_distance(a: &[u8; 4], b: &[u8; 3]) -> u32 {
    let mut sum = 0u32;
    for c in 0..3 {
        let d = a[c] as i32 - b[c] as i32;
        sum += (d * d) as u32;
    }
    sum
}

/// Encodes the RGB channels of `block`, returning the 8 encoded bytes and the squared RGB error.
pub(crate) fn encode_color_block(block: &PixelBlock) -> ([u8; 8], u32) {
    let pixels = block.to_channel_arrays();
    let [low, high] = principal_axis_endpoints(&pixels, 3);

    let mut c0 = Color565::from_rgb_rounded(high[0], high[1], high[2]);
    let mut c1 = Color565::from_rgb_rounded(low[0], low[1], low[2]);
    if c1.greater_than(&c0) {
        core::mem::swap(&mut c0, &mut c1);
    }

    let mut indices = 0u32;
    let mut error = 0u32;
    if c0 == c1 {
        // 3 colour mode by the ordering rule, but index 0 is still c0.
        let color = [c0.red(), c0.green(), c0.blue()];
        for pixel in &pixels {
            error += rgb_distance(pixel, &color);
        }
    } else {
        let palette = color_palette(c0, c1);
        for (position, pixel) in pixels.iter().enumerate() {
            let mut best_index = 0u32;
            let mut best_error = u32::MAX;
            for (index, entry) in palette.iter().enumerate() {
                let distance = rgb_distance(pixel, entry);
                if distance < best_error {
                    best_error = distance;
                    best_index = index as u32;
                }
            }
            indices |= best_index << (position * 2);
            error += best_error;
        }
    }

    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&c0.raw_value().to_le_bytes());
    out[2..4].copy_from_slice(&c1.raw_value().to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
    (out, error)
}
