//! Solid colour blocks.
//!
//! A block whose 16 pixels are identical is encoded in mode 5 with every colour index set to 1
//! and every alpha index set to 0. Alpha endpoints are 8 bits wide, so alpha is exact. For
//! colour, a lookup table maps each 8-bit value to the pair of 7-bit endpoints whose index 1
//! blend reproduces it; every value has an exact pair, so these blocks are lossless.

use crate::block::EncodedBlock;
use crate::modes::{interpolate, unquantize, weights};
use alloc::boxed::Box;
use once_cell::race::OnceBox;
use texcomp_common::color_8888::Color8888;

/// Mode used for solid blocks.
pub(crate) const SOLID_MODE: usize = 5;

/// Colour index every pixel of a solid block uses.
const SOLID_COLOR_INDEX: u8 = 1;

/// Stored 7-bit endpoint pair for every 8-bit channel value.
type SolidTable = [[u8; 2]; 256];

static SOLID_TABLE: OnceBox<SolidTable> = OnceBox::new();

fn solid_table() -> &'static SolidTable {
    SOLID_TABLE.get_or_init(|| Box::new(build_solid_table()))
}

#[inline]
fn blend(a: u8, b: u8) -> u8 {
    let weight = weights(2)[SOLID_COLOR_INDEX as usize];
    interpolate(unquantize(a, 7), unquantize(b, 7), weight)
}

fn build_solid_table() -> SolidTable {
    let mut table = [[0u8; 2]; 256];
    let mut filled = [false; 256];

    // First pair in (a, b) order that hits a value exactly.
    for a in 0..128u8 {
        for b in 0..128u8 {
            let value = blend(a, b) as usize;
            if !filled[value] {
                filled[value] = true;
                table[value] = [a, b];
            }
        }
    }

    // Nearest pair for anything left over.
    for (value, entry) in table.iter_mut().enumerate() {
        if filled[value] {
            continue;
        }
        let mut best_error = i32::MAX;
        for a in 0..128u8 {
            for b in 0..128u8 {
                let error = (blend(a, b) as i32 - value as i32).abs();
                if error < best_error {
                    best_error = error;
                    *entry = [a, b];
                }
            }
        }
    }
    table
}

/// Encodes a block made of 16 copies of `pixel`.
pub(crate) fn encode_solid(pixel: Color8888) -> EncodedBlock {
    let table = solid_table();
    let channels = pixel.to_array();

    let mut block = EncodedBlock::new(SOLID_MODE);
    let mut error = 0u32;
    for c in 0..3 {
        let [a, b] = table[channels[c] as usize];
        block.endpoints[0][0][c] = a;
        block.endpoints[0][1][c] = b;
        let d = blend(a, b) as i32 - channels[c] as i32;
        error += 16 * (d * d) as u32;
    }
    block.endpoints[0][0][3] = pixel.a;
    block.endpoints[0][1][3] = pixel.a;
    block.color_indices = [SOLID_COLOR_INDEX; 16];
    block.alpha_indices = [0; 16];
    block.error = error;
    block
}
