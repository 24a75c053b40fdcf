//! Forward pipeline: color conversion, partitioning, block transform, and
//! entropy coding.
//!
//! Blocks are independent once partitioned, so the per-block stage runs on
//! the rayon pool when the `parallel` feature is enabled. The shared
//! zigzag table is resolved before the parallel region.

use crate::block::Block;
use crate::constants::{CHROMA_SUBSAMPLE_FACTOR, LEVEL_SHIFT};
use crate::dct;
use crate::entropy::{self, Symbol};
use crate::error::Result;
use crate::image::Image;
use crate::partition;
use crate::pixel::ColorSpace;
use crate::quantization;
use crate::zigzag::{ZigzagTable, zigzag_8x8};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Entropy-coded output of the forward pipeline: one symbol stream per
/// block per channel, in partition (row-major tile) order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub width: usize,
    pub height: usize,
    pub depth: u16,
    pub description: String,
    pub y: Vec<Vec<Symbol>>,
    pub u: Vec<Vec<Symbol>>,
    pub v: Vec<Vec<Symbol>>,
}

/// Runs the full forward pipeline over an image.
pub struct PipelineEncoder;

impl PipelineEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Consumes an image and produces its entropy-coded representation.
    /// RGB input is converted to YUV first; YUV input is taken as-is.
    pub fn encode(&self, mut image: Image) -> Result<EncodedImage> {
        image.convert_color_space(ColorSpace::Yuv);
        let blocks = partition::split_into_blocks(&image)?;
        let zigzag = zigzag_8x8();

        Ok(EncodedImage {
            width: image.width,
            height: image.height,
            depth: image.depth,
            description: image.description,
            y: encode_channel(blocks.y, false, zigzag)?,
            u: encode_channel(blocks.u, true, zigzag)?,
            v: encode_channel(blocks.v, true, zigzag)?,
        })
    }
}

impl Default for PipelineEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Transforms one block: chroma is grown back to full resolution, then
/// level shift, forward DCT, quantization, and entropy coding.
fn encode_block(mut block: Block, chroma: bool, zigzag: &ZigzagTable) -> Result<Vec<Symbol>> {
    if chroma {
        block.grow(CHROMA_SUBSAMPLE_FACTOR);
    }
    block.subtract_from_values(LEVEL_SHIFT);
    dct::forward_block(&mut block);
    quantization::quantize_block(&mut block);
    entropy::encode_block(&block, zigzag)
}

#[cfg(feature = "parallel")]
fn encode_channel(
    blocks: Vec<Block>,
    chroma: bool,
    zigzag: &ZigzagTable,
) -> Result<Vec<Vec<Symbol>>> {
    blocks
        .into_par_iter()
        .map(|block| encode_block(block, chroma, zigzag))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn encode_channel(
    blocks: Vec<Block>,
    chroma: bool,
    zigzag: &ZigzagTable,
) -> Result<Vec<Vec<Symbol>>> {
    blocks
        .into_iter()
        .map(|block| encode_block(block, chroma, zigzag))
        .collect()
}
