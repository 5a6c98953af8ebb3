//! BC7 mode descriptions and index interpolation weights.

/// How p-bits (the shared low bit of every endpoint channel) are laid out in a mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PBits {
    /// The mode has no p-bits.
    None,
    /// Every endpoint has its own p-bit.
    PerEndpoint,
    /// Both endpoints of a subset share one p-bit.
    Shared,
}

/// Parameters of a single BC7 mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ModeInfo {
    /// Number of subsets (1-3).
    pub subsets: usize,
    /// Bits used to store the partition number.
    pub partition_bits: u32,
    /// Bits used to store the channel rotation.
    pub rotation_bits: u32,
    /// Bits used to store the index selection flag.
    pub index_selection_bits: u32,
    /// Bits per colour channel of an endpoint, excluding p-bits.
    pub color_bits: u32,
    /// Bits per alpha channel of an endpoint, excluding p-bits. `0` when alpha is implied 255.
    pub alpha_bits: u32,
    pub pbits: PBits,
    /// Bits per primary index.
    pub index_bits: u32,
    /// Bits per secondary index. `0` when the mode has a single index set.
    pub secondary_index_bits: u32,
}

impl ModeInfo {
    /// Colour and alpha are encoded with separate index sets (modes 4 and 5).
    #[inline]
    pub const fn has_separate_alpha(&self) -> bool {
        self.secondary_index_bits != 0
    }

    /// Alpha is stored in the endpoints at all.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.alpha_bits != 0
    }

    /// Endpoint bits per channel once p-bits are included.
    #[inline]
    pub const fn total_color_bits(&self) -> u32 {
        self.color_bits + self.pbit_count()
    }

    #[inline]
    pub const fn total_alpha_bits(&self) -> u32 {
        self.alpha_bits + self.pbit_count()
    }

    #[inline]
    const fn pbit_count(&self) -> u32 {
        match self.pbits {
            PBits::None => 0,
            PBits::PerEndpoint | PBits::Shared => 1,
        }
    }
}

/// The 8 BC7 modes, indexed by mode number.
pub(crate) const MODES: [ModeInfo; 8] = [
    mode(3, 4, 0, 0, 4, 0, PBits::PerEndpoint, 3, 0),
    mode(2, 6, 0, 0, 6, 0, PBits::Shared, 3, 0),
    mode(3, 6, 0, 0, 5, 0, PBits::None, 2, 0),
    mode(2, 6, 0, 0, 7, 0, PBits::PerEndpoint, 2, 0),
    mode(1, 0, 2, 1, 5, 6, PBits::None, 2, 3),
    mode(1, 0, 2, 0, 7, 8, PBits::None, 2, 2),
    mode(1, 0, 0, 0, 7, 7, PBits::PerEndpoint, 4, 0),
    mode(2, 6, 0, 0, 5, 5, PBits::PerEndpoint, 2, 0),
];

#[allow(clippy::too_many_arguments)]
const fn mode(
    subsets: usize,
    partition_bits: u32,
    rotation_bits: u32,
    index_selection_bits: u32,
    color_bits: u32,
    alpha_bits: u32,
    pbits: PBits,
    index_bits: u32,
    secondary_index_bits: u32,
) -> ModeInfo {
    ModeInfo {
        subsets,
        partition_bits,
        rotation_bits,
        index_selection_bits,
        color_bits,
        alpha_bits,
        pbits,
        index_bits,
        secondary_index_bits,
    }
}

const WEIGHTS_2: [u8; 4] = [0, 21, 43, 64];
const WEIGHTS_3: [u8; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
const WEIGHTS_4: [u8; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

/// Interpolation weights for an index of `index_bits` bits (2, 3 or 4).
#[inline]
pub(crate) const fn weights(index_bits: u32) -> &'static [u8] {
    match index_bits {
        2 => &WEIGHTS_2,
        3 => &WEIGHTS_3,
        _ => &WEIGHTS_4,
    }
}

/// Blends two 8-bit endpoint values with a 6-bit weight.
#[inline(always)]
pub(crate) const fn interpolate(e0: u8, e1: u8, weight: u8) -> u8 {
    (((64 - weight as u32) * e0 as u32 + weight as u32 * e1 as u32 + 32) >> 6) as u8
}

/// Expands an endpoint stored with `total_bits` bits (p-bit included) to 8 bits by
/// replicating its top bits.
#[inline(always)]
pub(crate) const fn unquantize(value: u8, total_bits: u32) -> u8 {
    let v = (value as u32) << (8 - total_bits);
    (v | (v >> total_bits)) as u8
}
