mod image;
mod padding;
mod throughput;

pub use image::*;
pub use padding::*;
pub use throughput::*;
