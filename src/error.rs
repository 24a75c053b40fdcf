use thiserror::Error;

use crate::pixel::ColorSpace;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Pixel count {actual} does not match {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
    #[error("Expected {expected} pixel data, found {found}")]
    PixelFormatMismatch {
        expected: ColorSpace,
        found: ColorSpace,
    },
    #[error("Image dimensions {width}x{height} are not divisible by the block size")]
    UnalignedDimensions { width: usize, height: usize },
    #[error("Entropy stream has not been produced for this block")]
    EntropyNotReady,
    #[error("Malformed entropy stream: {0}")]
    MalformedStream(String),
    #[error("Amplitude {0} exceeds the 10-bit size category range")]
    AmplitudeOutOfRange(i32),
    #[error("Unsupported block size {0}: stage requires 8x8 blocks")]
    UnsupportedBlockSize(usize),
    #[error("Channel has {actual} blocks, expected {expected}")]
    BlockCountMismatch { expected: usize, actual: usize },
    #[error("Malformed image file: {0}")]
    MalformedFile(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
