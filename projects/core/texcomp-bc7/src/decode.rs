//! Reference BC7 decoder, used to check the encoder against an independent reading of the
//! bit stream.

use crate::bits::BitReader;
use crate::modes::{interpolate, unquantize, weights, PBits, MODES};
use crate::partitions::{is_anchor, subset_of};

/// Decodes a BC7 block into 16 `[R, G, B, A]` pixels. Reserved mode 8 decodes to zeroes.
pub(crate) fn decode_block(block: &[u8; 16]) -> [[u8; 4]; 16] {
    let mut reader = BitReader::new(block);

    let mut mode = 0;
    while mode < 8 && reader.read(1) == 0 {
        mode += 1;
    }
    if mode == 8 {
        return [[0; 4]; 16];
    }
    let info = &MODES[mode];

    let partition = reader.read(info.partition_bits) as usize;
    let rotation = reader.read(info.rotation_bits);
    let index_selection = reader.read(info.index_selection_bits);

    let mut endpoints = [[[0u8; 4]; 2]; 3];
    for c in 0..3 {
        for subset in endpoints.iter_mut().take(info.subsets) {
            for endpoint in subset.iter_mut() {
                endpoint[c] = reader.read(info.color_bits) as u8;
            }
        }
    }
    if info.has_alpha() {
        for subset in endpoints.iter_mut().take(info.subsets) {
            for endpoint in subset.iter_mut() {
                endpoint[3] = reader.read(info.alpha_bits) as u8;
            }
        }
    }

    let mut pbits = [[0u8; 2]; 3];
    match info.pbits {
        PBits::None => {}
        PBits::PerEndpoint => {
            for subset in pbits.iter_mut().take(info.subsets) {
                subset[0] = reader.read(1) as u8;
                subset[1] = reader.read(1) as u8;
            }
        }
        PBits::Shared => {
            for subset in pbits.iter_mut().take(info.subsets) {
                let bit = reader.read(1) as u8;
                *subset = [bit, bit];
            }
        }
    }

    // Expand to 8 bits.
    let has_pbits = info.pbits != PBits::None;
    for (subset, subset_pbits) in endpoints.iter_mut().zip(pbits.iter()) {
        for (endpoint, &pbit) in subset.iter_mut().zip(subset_pbits.iter()) {
            for c in 0..4 {
                let bits = if c < 3 { info.color_bits } else { info.alpha_bits };
                if bits == 0 {
                    endpoint[c] = 255;
                } else if has_pbits {
                    endpoint[c] = unquantize((endpoint[c] << 1) | pbit, bits + 1);
                } else {
                    endpoint[c] = unquantize(endpoint[c], bits);
                }
            }
        }
    }

    let mut primary = [0u8; 16];
    for (pixel, index) in primary.iter_mut().enumerate() {
        let bits = info.index_bits - is_anchor(info.subsets, partition, pixel) as u32;
        *index = reader.read(bits) as u8;
    }
    let mut secondary = [0u8; 16];
    if info.has_separate_alpha() {
        for (pixel, index) in secondary.iter_mut().enumerate() {
            let bits = info.secondary_index_bits - (pixel == 0) as u32;
            *index = reader.read(bits) as u8;
        }
    }

    let mut out = [[0u8; 4]; 16];
    for (pixel, value) in out.iter_mut().enumerate() {
        let subset = subset_of(info.subsets, partition, pixel);
        let [e0, e1] = endpoints[subset];

        if info.has_separate_alpha() {
            let (color_index, color_bits, alpha_index, alpha_bits) = if index_selection == 1 {
                (secondary[pixel], info.secondary_index_bits, primary[pixel], info.index_bits)
            } else {
                (primary[pixel], info.index_bits, secondary[pixel], info.secondary_index_bits)
            };
            let cw = weights(color_bits)[color_index as usize];
            let aw = weights(alpha_bits)[alpha_index as usize];
            for c in 0..3 {
                value[c] = interpolate(e0[c], e1[c], cw);
            }
            value[3] = interpolate(e0[3], e1[3], aw);
        } else {
            let w = weights(info.index_bits)[primary[pixel] as usize];
            for c in 0..4 {
                value[c] = interpolate(e0[c], e1[c], w);
            }
        }

        match rotation {
            1 => value.swap(0, 3),
            2 => value.swap(1, 3),
            3 => value.swap(2, 3),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_mode_decodes_to_zero() {
        assert_eq!(decode_block(&[0u8; 16]), [[0u8; 4]; 16]);
    }

    #[test]
    fn alpha_less_modes_decode_opaque() {
        // Mode 3 block with all fields zero.
        let mut block = [0u8; 16];
        block[0] = 0b1000;
        for pixel in decode_block(&block) {
            assert_eq!(pixel, [0, 0, 0, 255]);
        }
    }
}
