//! Common test imports shared by the unit tests of this crate.
#![allow(unused_imports)]

#[cfg(feature = "std")]
extern crate std;

pub use rstest::rstest;

#[cfg(feature = "std")]
pub use std::{vec, vec::Vec};

pub use crate::color_8888::Color8888;
pub use crate::pixel_block::PixelBlock;
