//! Inverse pipeline: entropy decoding, dequantization, inverse DCT, and
//! image reassembly.
//!
//! Per-block work is independent and runs on the rayon pool when the
//! `parallel` feature is enabled; reassembly is the single barrier that
//! waits for every block before placing results into the pixel grid.

use crate::block::Block;
use crate::constants::LEVEL_SHIFT;
use crate::dct;
use crate::encoder::EncodedImage;
use crate::entropy::{self, Symbol};
use crate::error::Result;
use crate::image::Image;
use crate::partition::{self, ChannelBlocks};
use crate::pixel::ColorSpace;
use crate::quantization;
use crate::zigzag::{ZigzagTable, zigzag_8x8};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs the full inverse pipeline over an entropy-coded image.
pub struct PipelineDecoder;

impl PipelineDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Reconstructs an RGB image from its entropy-coded representation.
    pub fn decode(&self, encoded: &EncodedImage) -> Result<Image> {
        let zigzag = zigzag_8x8();
        let blocks = ChannelBlocks {
            y: decode_channel(&encoded.y, zigzag)?,
            u: decode_channel(&encoded.u, zigzag)?,
            v: decode_channel(&encoded.v, zigzag)?,
        };
        let mut image = partition::construct_from_blocks(
            &blocks,
            encoded.width,
            encoded.height,
            encoded.depth,
            encoded.description.clone(),
        )?;
        image.convert_color_space(ColorSpace::Rgb);
        Ok(image)
    }
}

impl Default for PipelineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverses one block: entropy decode, dequantize, inverse DCT, and the
/// level shift back into the pixel range. Chroma streams were encoded at
/// full resolution, so no regrowth happens here.
fn decode_block(symbols: &[Symbol], position: usize, zigzag: &ZigzagTable) -> Result<Block> {
    let mut block = entropy::decode_block(symbols, zigzag, position)?;
    quantization::dequantize_block(&mut block);
    dct::inverse_block(&mut block);
    block.add_to_values(LEVEL_SHIFT);
    Ok(block)
}

#[cfg(feature = "parallel")]
fn decode_channel(streams: &[Vec<Symbol>], zigzag: &ZigzagTable) -> Result<Vec<Block>> {
    streams
        .par_iter()
        .enumerate()
        .map(|(position, symbols)| decode_block(symbols, position, zigzag))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn decode_channel(streams: &[Vec<Symbol>], zigzag: &ZigzagTable) -> Result<Vec<Block>> {
    streams
        .iter()
        .enumerate()
        .map(|(position, symbols)| decode_block(symbols, position, zigzag))
        .collect()
}
