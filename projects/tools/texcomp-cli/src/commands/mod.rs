pub mod benchmark;
pub mod compress;
