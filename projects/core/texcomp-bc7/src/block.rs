//! An encoded BC7 block before packing, and the packing itself.

use crate::bits::BitWriter;
use crate::modes::{PBits, MODES};
use crate::partitions::{anchor_index, is_anchor, subset_of};

/// A fully decided BC7 encoding of one block.
///
/// Endpoint channels are `[R, G, B, A]` after rotation. For modes without alpha the `A`
/// channel is unused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct EncodedBlock {
    pub mode: usize,
    pub partition: usize,
    pub rotation: u32,
    pub index_selection: u32,
    /// Stored endpoint values, `[subset][endpoint][channel]`, p-bits excluded.
    pub endpoints: [[[u8; 4]; 2]; 3],
    /// `[subset][endpoint]`.
    pub pbits: [[u8; 2]; 3],
    /// Colour indices per pixel. For modes 0-3, 6 and 7 these cover all channels.
    pub color_indices: [u8; 16],
    /// Alpha indices per pixel. Modes 4 and 5 only.
    pub alpha_indices: [u8; 16],
    /// Squared RGBA error of the block against the source pixels.
    pub error: u32,
}

impl EncodedBlock {
    pub fn new(mode: usize) -> Self {
        Self {
            mode,
            partition: 0,
            rotation: 0,
            index_selection: 0,
            endpoints: [[[0; 4]; 2]; 3],
            pbits: [[0; 2]; 3],
            color_indices: [0; 16],
            alpha_indices: [0; 16],
            error: 0,
        }
    }

    /// Index bits used by the colour indices.
    #[inline]
    pub fn color_index_bits(&self) -> u32 {
        let info = &MODES[self.mode];
        if info.has_separate_alpha() && self.index_selection == 1 {
            info.secondary_index_bits
        } else {
            info.index_bits
        }
    }

    /// Index bits used by the alpha indices (modes 4 and 5).
    #[inline]
    pub fn alpha_index_bits(&self) -> u32 {
        let info = &MODES[self.mode];
        if self.index_selection == 1 {
            info.index_bits
        } else {
            info.secondary_index_bits
        }
    }

    /// Makes the anchor index of every index set start with a zero bit, by swapping that
    /// subset's endpoints and mirroring its indices. The decoded block does not change.
    fn fix_anchors(&mut self) {
        let info = &MODES[self.mode];

        if info.has_separate_alpha() {
            let color_bits = self.color_index_bits();
            if self.color_indices[0] >> (color_bits - 1) != 0 {
                for c in 0..3 {
                    let [e0, e1] = self.endpoints[0];
                    self.endpoints[0][0][c] = e1[c];
                    self.endpoints[0][1][c] = e0[c];
                }
                invert(&mut self.color_indices, color_bits, |_| true);
            }

            let alpha_bits = self.alpha_index_bits();
            if self.alpha_indices[0] >> (alpha_bits - 1) != 0 {
                let [e0, e1] = self.endpoints[0];
                self.endpoints[0][0][3] = e1[3];
                self.endpoints[0][1][3] = e0[3];
                invert(&mut self.alpha_indices, alpha_bits, |_| true);
            }
            return;
        }

        let (subsets, partition) = (info.subsets, self.partition);
        for subset in 0..subsets {
            let anchor = anchor_index(subsets, partition, subset);
            if self.color_indices[anchor] >> (info.index_bits - 1) == 0 {
                continue;
            }
            self.endpoints[subset].swap(0, 1);
            self.pbits[subset].swap(0, 1);
            invert(&mut self.color_indices, info.index_bits, |pixel| {
                subset_of(subsets, partition, pixel) == subset
            });
        }
    }

    /// Packs the block into its 16 byte BC7 representation.
    pub fn pack(mut self) -> [u8; 16] {
        self.fix_anchors();

        let info = &MODES[self.mode];
        let mut writer = BitWriter::new();

        writer.write(1 << self.mode, self.mode as u32 + 1);
        writer.write(self.partition as u32, info.partition_bits);
        writer.write(self.rotation, info.rotation_bits);
        writer.write(self.index_selection, info.index_selection_bits);

        for c in 0..3 {
            for subset in &self.endpoints[..info.subsets] {
                for endpoint in subset {
                    writer.write(endpoint[c] as u32, info.color_bits);
                }
            }
        }
        if info.has_alpha() {
            for subset in &self.endpoints[..info.subsets] {
                for endpoint in subset {
                    writer.write(endpoint[3] as u32, info.alpha_bits);
                }
            }
        }

        match info.pbits {
            PBits::None => {}
            PBits::PerEndpoint => {
                for pbits in &self.pbits[..info.subsets] {
                    writer.write(pbits[0] as u32, 1);
                    writer.write(pbits[1] as u32, 1);
                }
            }
            PBits::Shared => {
                for pbits in &self.pbits[..info.subsets] {
                    writer.write(pbits[0] as u32, 1);
                }
            }
        }

        let (primary, secondary) = if info.has_separate_alpha() && self.index_selection == 1 {
            (&self.alpha_indices, &self.color_indices)
        } else {
            (&self.color_indices, &self.alpha_indices)
        };

        for (pixel, &index) in primary.iter().enumerate() {
            let anchor = is_anchor(info.subsets, self.partition, pixel) as u32;
            writer.write(index as u32, info.index_bits - anchor);
        }
        if info.has_separate_alpha() {
            for (pixel, &index) in secondary.iter().enumerate() {
                let anchor = (pixel == 0) as u32;
                writer.write(index as u32, info.secondary_index_bits - anchor);
            }
        }

        writer.into_bytes()
    }
}

fn invert(indices: &mut [u8; 16], bits: u32, mut selected: impl FnMut(usize) -> bool) {
    let max = ((1u32 << bits) - 1) as u8;
    for (pixel, index) in indices.iter_mut().enumerate() {
        if selected(pixel) {
            *index = max - *index;
        }
    }
}
