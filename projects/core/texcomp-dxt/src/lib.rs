#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

mod alpha_block;
mod color_block;

#[cfg(test)]
mod decode;

use texcomp_common::pixel_block::PixelBlock;

/// Size of an encoded DXT1 block in bytes.
pub const DXT1_BLOCK_SIZE: usize = 8;

/// Size of an encoded DXT5 block in bytes.
pub const DXT5_BLOCK_SIZE: usize = 16;

/// Encodes a block to DXT1. Alpha is ignored.
///
/// ```
/// use texcomp_common::color_8888::Color8888;
/// use texcomp_common::pixel_block::PixelBlock;
/// use texcomp_dxt::encode_dxt1_block;
///
/// let block = PixelBlock::new(Color8888::new(255, 255, 255, 255));
/// let encoded = encode_dxt1_block(&block);
/// // Solid white: both endpoints white, every index 0.
/// assert_eq!(encoded, [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);
/// ```
#[inline]
pub fn encode_dxt1_block(block: &PixelBlock) -> [u8; DXT1_BLOCK_SIZE] {
    color_block::encode_color_block(block).0
}

/// Encodes a block to DXT5: an alpha block followed by a DXT1 style colour block.
#[inline]
pub fn encode_dxt5_block(block: &PixelBlock) -> [u8; DXT5_BLOCK_SIZE] {
    let mut out = [0u8; DXT5_BLOCK_SIZE];
    out[..8].copy_from_slice(&alpha_block::encode_alpha_block(block).0);
    out[8..].copy_from_slice(&color_block::encode_color_block(block).0);
    out
}

#[cfg(test)]
pub(crate) mod test_prelude;
