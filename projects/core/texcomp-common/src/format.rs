//! The block compressed formats a caller can ask for.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use derive_enum_all_values::AllValues;
use thiserror::Error;

/// A GPU block compression format.
///
/// The discriminants are the raw format ids accepted by
/// [`CompressionFormat::try_from`]`(u32)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
#[repr(u32)]
pub enum CompressionFormat {
    /// BC7, 16 bytes per block.
    #[default]
    Bptc = 0,
    /// BC1, 8 bytes per block.
    Dxt1 = 1,
    /// BC3, 16 bytes per block.
    Dxt5 = 2,
}

impl CompressionFormat {
    /// Size of a single compressed 4x4 block in bytes.
    #[inline]
    pub const fn bytes_per_block(self) -> usize {
        match self {
            CompressionFormat::Dxt1 => 8,
            CompressionFormat::Bptc | CompressionFormat::Dxt5 => 16,
        }
    }

    /// Number of output bytes needed to compress `input_len` bytes of RGBA8 pixel data.
    ///
    /// A 4x4 block of RGBA8 pixels is 64 bytes, so DXT1 needs `input_len / 8` and the
    /// 16-byte formats need `input_len / 4`.
    ///
    /// ```
    /// use texcomp_common::format::CompressionFormat;
    ///
    /// assert_eq!(CompressionFormat::Dxt1.required_output_size(64), 8);
    /// assert_eq!(CompressionFormat::Bptc.required_output_size(128), 32);
    /// ```
    #[inline]
    pub const fn required_output_size(self, input_len: usize) -> usize {
        match self {
            CompressionFormat::Dxt1 => input_len / 8,
            CompressionFormat::Bptc | CompressionFormat::Dxt5 => input_len / 4,
        }
    }

    /// Whether the codec for this format can report per-block statistics.
    #[inline]
    pub const fn supports_stats(self) -> bool {
        matches!(self, CompressionFormat::Bptc)
    }

    /// Whether the codec for this format has a SIMD-targeted variant.
    #[inline]
    pub const fn supports_simd(self) -> bool {
        matches!(self, CompressionFormat::Bptc)
    }

    /// Short upper case name, as used in logs.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            CompressionFormat::Bptc => "BPTC",
            CompressionFormat::Dxt1 => "DXT1",
            CompressionFormat::Dxt5 => "DXT5",
        }
    }
}

impl fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A format name or raw id that does not map to a [`CompressionFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownFormat {
    /// Raw id outside of `0..=2`.
    #[error("Unknown compression format id: {0}")]
    Id(u32),
    /// Unrecognised format name.
    #[error("Unknown compression format: '{0}'. Expected one of bptc, bc7, dxt1, bc1, dxt5, bc3")]
    Name(String),
}

impl TryFrom<u32> for CompressionFormat {
    type Error = UnknownFormat;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CompressionFormat::all_values()
            .iter()
            .copied()
            .find(|format| *format as u32 == value)
            .ok_or(UnknownFormat::Id(value))
    }
}

impl FromStr for CompressionFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bptc" | "bc7" => Ok(CompressionFormat::Bptc),
            "dxt1" | "bc1" => Ok(CompressionFormat::Dxt1),
            "dxt5" | "bc3" => Ok(CompressionFormat::Dxt5),
            _ => Err(UnknownFormat::Name(String::from(s))),
        }
    }
}
