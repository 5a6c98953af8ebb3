#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod allocate;
pub mod color_565;
pub mod color_8888;
pub mod color_fit;
pub mod cpu_detect;
pub mod format;
pub mod pixel_block;
pub mod quality;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
