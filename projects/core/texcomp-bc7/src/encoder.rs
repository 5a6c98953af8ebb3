//! The BC7 candidate search.

use crate::block::EncodedBlock;
use crate::component::solve_component;
use crate::effort::SearchEffort;
use crate::kernel::Bc7Kernel;
use crate::modes::{ModeInfo, PBits, MODES};
use crate::partitions::{rank_partitions, SubsetPixels, PARTITION_COUNT};
use crate::quantize::ComponentFormat;
use crate::solid::encode_solid;
use crate::stats::Bc7BlockStats;
use texcomp_common::pixel_block::PixelBlock;
use texcomp_common::quality::QualityLevel;

/// Encodes 4x4 blocks to BC7 with fixed settings.
///
/// The quality and kernel are fixed for the lifetime of the encoder, so one value can be shared
/// by every thread of a compression call.
///
/// # Examples
///
/// ```
/// use texcomp_bc7::{Bc7Encoder, Bc7Kernel};
/// use texcomp_common::color_8888::Color8888;
/// use texcomp_common::pixel_block::PixelBlock;
/// use texcomp_common::quality::QualityLevel;
///
/// let encoder = Bc7Encoder::new(QualityLevel::DEFAULT, Bc7Kernel::Portable);
/// let block = PixelBlock::new(Color8888::new(200, 100, 50, 255));
///
/// let (bytes, stats) = encoder.encode_block_with_stats(&block);
/// assert_eq!(bytes.len(), 16);
/// assert_eq!(stats.error, 0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bc7Encoder {
    quality: QualityLevel,
    kernel: Bc7Kernel,
    effort: SearchEffort,
}

impl Bc7Encoder {
    /// Creates an encoder searching at `quality`, using `kernel` for index assignment.
    pub fn new(quality: QualityLevel, kernel: Bc7Kernel) -> Self {
        Self {
            quality,
            kernel,
            effort: SearchEffort::from_quality(quality),
        }
    }

    /// Quality this encoder searches at.
    pub fn quality(&self) -> QualityLevel {
        self.quality
    }

    /// Index assignment kernel in use.
    pub fn kernel(&self) -> Bc7Kernel {
        self.kernel
    }

    /// Search effort derived from the quality.
    pub fn effort(&self) -> &SearchEffort {
        &self.effort
    }

    /// Encodes a single block.
    #[inline]
    pub fn encode_block(&self, block: &PixelBlock) -> [u8; 16] {
        self.search(block).pack()
    }

    /// Encodes a single block and reports what was chosen.
    pub fn encode_block_with_stats(&self, block: &PixelBlock) -> ([u8; 16], Bc7BlockStats) {
        let best = self.search(block);
        let stats = Bc7BlockStats {
            mode: best.mode as u8,
            partition: best.partition as u8,
            rotation: best.rotation as u8,
            index_selection: best.index_selection as u8,
            error: best.error,
        };
        (best.pack(), stats)
    }

    fn search(&self, block: &PixelBlock) -> EncodedBlock {
        if block.has_identical_pixels() {
            return encode_solid(block.pixels[0]);
        }

        let pixels = block.to_channel_arrays();
        let ranked_2 = self
            .effort
            .any_mode_with_subsets(2)
            .then(|| rank_partitions(&pixels, 2));
        let ranked_3 = self
            .effort
            .any_mode_with_subsets(3)
            .then(|| rank_partitions(&pixels, 3));

        let mut best: Option<EncodedBlock> = None;
        for (mode, info) in MODES.iter().enumerate() {
            if !self.effort.modes[mode] {
                continue;
            }

            if info.has_separate_alpha() {
                let rotations = if self.effort.rotations { 4 } else { 1 };
                let selections = if info.index_selection_bits != 0 && self.effort.index_selection {
                    2
                } else {
                    1
                };
                for rotation in 0..rotations {
                    for index_selection in 0..selections {
                        let limit = best.as_ref().map_or(u32::MAX, |b| b.error);
                        let candidate =
                            self.encode_separate(&pixels, mode, info, rotation, index_selection);
                        if candidate.error < limit {
                            best = Some(candidate);
                        }
                    }
                }
                continue;
            }

            let ranked: &[u8] = match info.subsets {
                2 => ranked_2.as_ref().map_or(&[], |r| &r[..]),
                3 => ranked_3.as_ref().map_or(&[], |r| &r[..]),
                _ => &[0],
            };
            let tried = if info.subsets == 1 {
                1
            } else {
                self.effort.partitions.min(PARTITION_COUNT)
            };
            // Mode 0 only addresses the first 16 partitions of its table.
            let addressable = 1usize << info.partition_bits;
            for &partition in ranked
                .iter()
                .filter(|&&p| (p as usize) < addressable)
                .take(tried)
            {
                let limit = best.as_ref().map_or(u32::MAX, |b| b.error);
                if let Some(candidate) =
                    self.encode_partitioned(&pixels, mode, info, partition as usize, limit)
                {
                    best = Some(candidate);
                }
            }
        }

        // Mode 6 is enabled at every quality, so the search always produces a candidate.
        best.unwrap_or_else(|| encode_solid(block.pixels[0]))
    }

    /// Encodes a mode where all channels share the indices of their subset.
    ///
    /// Returns `None` as soon as the error reaches `limit`, since the candidate could no
    /// longer win.
    fn encode_partitioned(
        &self,
        pixels: &[[u8; 4]; 16],
        mode: usize,
        info: &ModeInfo,
        partition: usize,
        limit: u32,
    ) -> Option<EncodedBlock> {
        let mut local = *pixels;
        let mut error = 0u32;
        if !info.has_alpha() {
            // Alpha decodes as 255, which costs the same for every candidate of this mode.
            for pixel in local.iter_mut() {
                let d = 255 - pixel[3] as u32;
                error += d * d;
                pixel[3] = 0;
            }
        }
        if error >= limit {
            return None;
        }

        let format = ComponentFormat {
            channels: if info.has_alpha() { 4 } else { 3 },
            bits: info.color_bits,
            pbits: info.pbits,
            index_bits: info.index_bits,
        };

        let split = SubsetPixels::split(&local, info.subsets, partition);
        let mut block = EncodedBlock::new(mode);
        block.partition = partition;

        for subset in 0..info.subsets {
            let solution =
                solve_component(split.subset(subset), &format, &self.effort, self.kernel);
            error += solution.error;
            if error >= limit {
                return None;
            }

            block.endpoints[subset] = solution.endpoints.values;
            block.pbits[subset] = solution.endpoints.pbits;
            for (slot, &position) in split.positions[subset][..split.counts[subset]]
                .iter()
                .enumerate()
            {
                block.color_indices[position as usize] = solution.indices[slot];
            }
        }

        block.error = error;
        Some(block)
    }

    /// Encodes mode 4 or 5, where colour and alpha have independent indices.
    fn encode_separate(
        &self,
        pixels: &[[u8; 4]; 16],
        mode: usize,
        info: &ModeInfo,
        rotation: u32,
        index_selection: u32,
    ) -> EncodedBlock {
        let mut color = [[0u8; 4]; 16];
        let mut alpha = [[0u8; 4]; 16];
        for ((pixel, color), alpha) in pixels.iter().zip(color.iter_mut()).zip(alpha.iter_mut()) {
            let rotated = rotate(*pixel, rotation);
            *color = [rotated[0], rotated[1], rotated[2], 0];
            *alpha = [rotated[3], 0, 0, 0];
        }

        let mut block = EncodedBlock::new(mode);
        block.rotation = rotation;
        block.index_selection = index_selection;

        let color_format = ComponentFormat {
            channels: 3,
            bits: info.color_bits,
            pbits: PBits::None,
            index_bits: block.color_index_bits(),
        };
        let alpha_format = ComponentFormat {
            channels: 1,
            bits: info.alpha_bits,
            pbits: PBits::None,
            index_bits: block.alpha_index_bits(),
        };

        let color_solution = solve_component(&color, &color_format, &self.effort, self.kernel);
        let alpha_solution = solve_component(&alpha, &alpha_format, &self.effort, self.kernel);

        for ep in 0..2 {
            let c = color_solution.endpoints.values[ep];
            let a = alpha_solution.endpoints.values[ep][0];
            block.endpoints[0][ep] = [c[0], c[1], c[2], a];
        }
        block.color_indices = color_solution.indices;
        block.alpha_indices = alpha_solution.indices;
        block.error = color_solution.error + alpha_solution.error;
        block
    }
}

/// Swaps alpha with red, green or blue for rotations 1, 2 and 3.
#[inline]
fn rotate(mut pixel: [u8; 4], rotation: u32) -> [u8; 4] {
    if rotation != 0 {
        pixel.swap(rotation as usize - 1, 3);
    }
    pixel
}

/// Encodes `block` at `quality` with the portable kernel.
///
/// Shorthand for [`Bc7Encoder::encode_block`] when only a single block is needed.
pub fn encode_block(block: &PixelBlock, quality: QualityLevel) -> [u8; 16] {
    Bc7Encoder::new(quality, Bc7Kernel::Portable).encode_block(block)
}

/// Encodes `block` at `quality` with the portable kernel and reports what was chosen.
pub fn encode_block_with_stats(
    block: &PixelBlock,
    quality: QualityLevel,
) -> ([u8; 16], Bc7BlockStats) {
    Bc7Encoder::new(quality, Bc7Kernel::Portable).encode_block_with_stats(block)
}
