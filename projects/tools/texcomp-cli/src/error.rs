use std::io;
use texcomp_api::CompressError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Compress(#[from] CompressError),
    #[error("Input is {actual} bytes, but a {width}x{height} RGBA8 image is {expected} bytes")]
    InputSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{strategy} output differs from Serial")]
    StrategyMismatch { strategy: &'static str },
}
