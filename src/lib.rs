//! Baseline JPEG block-transform pipeline.
//!
//! Implements the classic DCT-based lossy still-image pipeline over a
//! plain-text pixel format:
//! - RGB <-> YUV color conversion with 4:2:0-style chroma subsampling.
//! - Per-block forward/inverse 2D DCT with level shifting.
//! - Quantization against a fixed divisor matrix.
//! - Zigzag run-length / size / amplitude entropy coding (symbol level,
//!   no bit packing).
//!
//! Encoding flows image -> YUV -> channel blocks -> DCT -> quantize ->
//! symbol streams; decoding reverses the same stages. Blocks are
//! independent, so both directions parallelize per block under the
//! `parallel` feature.

pub mod block;
pub mod constants;
pub mod dct;
pub mod decoder;
pub mod encoder;
pub mod entropy;
pub mod error;
pub mod file_io;
pub mod image;
pub mod partition;
pub mod pixel;
pub mod quantization;
pub mod zigzag;

pub use decoder::PipelineDecoder;
pub use encoder::{EncodedImage, PipelineEncoder};
pub use error::{PipelineError, Result};
pub use image::{Image, Pixels};
pub use pixel::{ColorSpace, PixelRgb, PixelYuv};
