#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bits;
mod block;
mod component;
mod effort;
mod encoder;
mod kernel;
mod modes;
mod partitions;
mod quantize;
mod solid;
mod stats;

#[cfg(test)]
mod decode;

pub use effort::SearchEffort;
pub use encoder::{encode_block, encode_block_with_stats, Bc7Encoder};
pub use kernel::Bc7Kernel;
pub use stats::Bc7BlockStats;

/// Size of an encoded BC7 block in bytes.
pub const BC7_BLOCK_SIZE: usize = 16;

#[cfg(test)]
pub(crate) mod test_prelude;
