//! BC7 partition tables.
//!
//! A partition assigns each of the 16 pixels of a block to a subset. Modes with 2 or 3 subsets
//! pick one of 64 standard partitions per block. Every subset has an anchor pixel whose index
//! is stored with one bit fewer; the encoder must make sure that bit is zero.

use texcomp_common::color_fit::total_variance;

/// Number of partitions in each table.
pub(crate) const PARTITION_COUNT: usize = 64;

/// 2 subset partitions. Bit `i` is the subset of pixel `i`.
const PARTITIONS_2: [u16; PARTITION_COUNT] = [
    0xCCCC, 0x8888, 0xEEEE, 0xECC8, 0xC880, 0xFEEC, 0xFEC8, 0xEC80,
    0xC800, 0xFFEC, 0xFE80, 0xE800, 0xFFE8, 0xFF00, 0xFFF0, 0xF000,
    0xF710, 0x008E, 0x7100, 0x08CE, 0x008C, 0x7310, 0x3100, 0x8CCE,
    0x088C, 0x3110, 0x6666, 0x366C, 0x17E8, 0x0FF0, 0x718E, 0x399C,
    0xAAAA, 0xF0F0, 0x5A5A, 0x33CC, 0x3C3C, 0x55AA, 0x9696, 0xA55A,
    0x73CE, 0x13C8, 0x324C, 0x3BDC, 0x6996, 0xC33C, 0x9966, 0x0660,
    0x0272, 0x04E4, 0x4E40, 0x2720, 0xC936, 0x936C, 0x39C6, 0x639C,
    0x9336, 0x9CC6, 0x817E, 0xE718, 0xCCF0, 0x0FCC, 0x7744, 0xEE22,
];

/// 3 subset partitions. Bits `2i..2i+2` are the subset of pixel `i`.
const PARTITIONS_3: [u32; PARTITION_COUNT] = [
    0xAA685050, 0x6A5A5040, 0x5A5A4200, 0x5450A0A8, 0xA5A50000, 0xA0A05050,
    0x5555A0A0, 0x5A5A5050, 0xAA550000, 0xAA555500, 0xAAAA5500, 0x90909090,
    0x94949494, 0xA4A4A4A4, 0xA9A59450, 0x2A0A4250, 0xA5945040, 0x0A425054,
    0xA5A5A500, 0x55A0A0A0, 0xA8A85454, 0x6A6A4040, 0xA4A45000, 0x1A1A0500,
    0x0050A4A4, 0xAAA59090, 0x14696914, 0x69691400, 0xA08585A0, 0xAA821414,
    0x50A4A450, 0x6A5A0200, 0xA9A58000, 0x5090A0A8, 0xA8A09050, 0x24242424,
    0x00AA5500, 0x24924924, 0x24499224, 0x50A50A50, 0x500AA550, 0xAAAA4444,
    0x66660000, 0xA5A0A5A0, 0x50A050A0, 0x69286928, 0x44AAAA44, 0x66666600,
    0xAA444444, 0x54A854A8, 0x95809580, 0x96969600, 0xA85454A8, 0x80959580,
    0xAA141414, 0x96960000, 0xAAAA1414, 0xA05050A0, 0xA0A5A5A0, 0x96000000,
    0x40804080, 0xA9A8A9A8, 0xAAAAAA44, 0x2A4A5254,
];

/// Anchor pixel of the second subset, 2 subset partitions.
const ANCHORS_2: [u8; PARTITION_COUNT] = [
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 2, 8, 2, 2, 8, 8, 15, 2, 8, 2, 2, 8, 8, 2, 2,
    15, 15, 6, 8, 2, 8, 15, 15, 2, 8, 2, 2, 2, 15, 15, 6,
    6, 2, 6, 8, 15, 15, 2, 2, 15, 15, 15, 15, 15, 2, 2, 15,
];

/// Anchor pixel of the second subset, 3 subset partitions.
const ANCHORS_3_SECOND: [u8; PARTITION_COUNT] = [
    3, 3, 15, 15, 8, 3, 15, 15, 8, 8, 6, 6, 6, 5, 3, 3,
    3, 3, 8, 15, 3, 3, 6, 10, 5, 8, 8, 6, 8, 5, 15, 15,
    8, 15, 3, 5, 6, 10, 8, 15, 15, 3, 15, 5, 15, 15, 15, 15,
    3, 15, 5, 5, 5, 8, 5, 10, 5, 10, 8, 13, 15, 12, 3, 3,
];

/// Anchor pixel of the third subset, 3 subset partitions.
const ANCHORS_3_THIRD: [u8; PARTITION_COUNT] = [
    15, 8, 8, 3, 15, 15, 3, 8, 15, 15, 15, 15, 15, 15, 15, 8,
    15, 8, 15, 3, 15, 8, 15, 8, 3, 15, 6, 10, 15, 15, 10, 8,
    15, 3, 15, 10, 10, 8, 9, 10, 6, 15, 8, 15, 3, 6, 6, 8,
    15, 3, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 3, 15, 15, 8,
];

/// Subset that `pixel` belongs to.
#[inline(always)]
pub(crate) const fn subset_of(subsets: usize, partition: usize, pixel: usize) -> usize {
    match subsets {
        2 => ((PARTITIONS_2[partition] >> pixel) & 1) as usize,
        3 => ((PARTITIONS_3[partition] >> (pixel * 2)) & 3) as usize,
        _ => 0,
    }
}

/// Anchor pixel of `subset`. Subset 0 is always anchored at pixel 0.
#[inline]
pub(crate) const fn anchor_index(subsets: usize, partition: usize, subset: usize) -> usize {
    match (subsets, subset) {
        (2, 1) => ANCHORS_2[partition] as usize,
        (3, 1) => ANCHORS_3_SECOND[partition] as usize,
        (3, 2) => ANCHORS_3_THIRD[partition] as usize,
        _ => 0,
    }
}

/// Whether `pixel` is the anchor of its own subset.
#[inline]
pub(crate) const fn is_anchor(subsets: usize, partition: usize, pixel: usize) -> bool {
    anchor_index(subsets, partition, subset_of(subsets, partition, pixel)) == pixel
}

/// Pixels of one block split by subset.
pub(crate) struct SubsetPixels {
    /// Pixel values, grouped by subset.
    pub pixels: [[[u8; 4]; 16]; 3],
    /// Original position of each grouped pixel.
    pub positions: [[u8; 16]; 3],
    /// Number of pixels in each subset.
    pub counts: [usize; 3],
}

impl SubsetPixels {
    /// Splits `block` according to a partition.
    pub fn split(block: &[[u8; 4]; 16], subsets: usize, partition: usize) -> Self {
        let mut out = SubsetPixels {
            pixels: [[[0; 4]; 16]; 3],
            positions: [[0; 16]; 3],
            counts: [0; 3],
        };
        for (index, pixel) in block.iter().enumerate() {
            let subset = subset_of(subsets, partition, index);
            let slot = out.counts[subset];
            out.pixels[subset][slot] = *pixel;
            out.positions[subset][slot] = index as u8;
            out.counts[subset] += 1;
        }
        out
    }

    /// Pixels of a single subset.
    #[inline]
    pub fn subset(&self, subset: usize) -> &[[u8; 4]] {
        &self.pixels[subset][..self.counts[subset]]
    }
}

/// Orders all partitions for `subsets` by how well they split `block`.
///
/// The score is the summed RGBA variance of every subset, lower is better; ties keep table
/// order. The ranking does not depend on quality, so taking a longer prefix of it at a higher
/// quality only ever adds candidates.
pub(crate) fn rank_partitions(block: &[[u8; 4]; 16], subsets: usize) -> [u8; PARTITION_COUNT] {
    let mut scored = [(0.0f32, 0u8); PARTITION_COUNT];
    for (partition, entry) in scored.iter_mut().enumerate() {
        let split = SubsetPixels::split(block, subsets, partition);
        let mut score = 0.0f32;
        for subset in 0..subsets {
            score += total_variance(split.subset(subset), 4);
        }
        *entry = (score, partition as u8);
    }
    scored.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut ranked = [0u8; PARTITION_COUNT];
    for (slot, (_, partition)) in ranked.iter_mut().zip(scored.iter()) {
        *slot = *partition;
    }
    ranked
}
