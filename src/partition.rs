//! Slicing a YUV image into per-channel blocks and reassembling it.
//!
//! Both passes walk the 8x8 tiles row-major and derive every block's
//! position from the loop indices, so splitting and reassembly always
//! agree on the order.

use crate::block::Block;
use crate::constants::{BLOCK_DIM, BLOCK_SIZE, CHROMA_SUBSAMPLE_FACTOR};
use crate::error::{PipelineError, Result};
use crate::image::{Image, Pixels};
use crate::pixel::{ColorSpace, PixelYuv};

/// Per-channel blocks from one partition pass, all three channels in the
/// same row-major tile order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBlocks {
    pub y: Vec<Block>,
    pub u: Vec<Block>,
    pub v: Vec<Block>,
}

/// Splits a YUV image into 8x8 luma blocks and quarter-resolution chroma
/// blocks (U and V are shrunk to 4x4 right after extraction).
pub fn split_into_blocks(image: &Image) -> Result<ChannelBlocks> {
    let Pixels::Yuv(pixels) = &image.pixels else {
        return Err(PipelineError::PixelFormatMismatch {
            expected: ColorSpace::Yuv,
            found: image.color_space(),
        });
    };
    if image.width % BLOCK_SIZE != 0 || image.height % BLOCK_SIZE != 0 {
        return Err(PipelineError::UnalignedDimensions {
            width: image.width,
            height: image.height,
        });
    }
    if pixels.len() != image.width * image.height {
        return Err(PipelineError::SizeMismatch {
            width: image.width,
            height: image.height,
            actual: pixels.len(),
        });
    }

    let tiles_per_row = image.width / BLOCK_SIZE;
    let tile_rows = image.height / BLOCK_SIZE;
    let tile_count = tiles_per_row * tile_rows;
    let mut blocks = ChannelBlocks {
        y: Vec::with_capacity(tile_count),
        u: Vec::with_capacity(tile_count),
        v: Vec::with_capacity(tile_count),
    };

    for tile_row in 0..tile_rows {
        for tile_col in 0..tiles_per_row {
            let position = tile_row * tiles_per_row + tile_col;
            let mut y_samples = Vec::with_capacity(BLOCK_DIM);
            let mut u_samples = Vec::with_capacity(BLOCK_DIM);
            let mut v_samples = Vec::with_capacity(BLOCK_DIM);
            for row in 0..BLOCK_SIZE {
                for col in 0..BLOCK_SIZE {
                    let pixel_row = tile_row * BLOCK_SIZE + row;
                    let pixel_col = tile_col * BLOCK_SIZE + col;
                    let pixel = pixels[pixel_row * image.width + pixel_col];
                    y_samples.push(pixel.y);
                    u_samples.push(pixel.u);
                    v_samples.push(pixel.v);
                }
            }
            blocks.y.push(Block::new(y_samples, position));

            let mut u_block = Block::new(u_samples, position);
            u_block.shrink(CHROMA_SUBSAMPLE_FACTOR);
            blocks.u.push(u_block);

            let mut v_block = Block::new(v_samples, position);
            v_block.shrink(CHROMA_SUBSAMPLE_FACTOR);
            blocks.v.push(v_block);
        }
    }
    Ok(blocks)
}

/// Rebuilds a YUV image from transformed channel blocks. Every channel
/// must carry one full-resolution 8x8 block per tile (chroma grown back
/// before this point); samples are clamped into the pixel range as they
/// are placed.
pub fn construct_from_blocks(
    blocks: &ChannelBlocks,
    width: usize,
    height: usize,
    depth: u16,
    description: String,
) -> Result<Image> {
    if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
        return Err(PipelineError::UnalignedDimensions { width, height });
    }
    let tiles_per_row = width / BLOCK_SIZE;
    let tile_count = tiles_per_row * (height / BLOCK_SIZE);
    for channel in [&blocks.y, &blocks.u, &blocks.v] {
        if channel.len() != tile_count {
            return Err(PipelineError::BlockCountMismatch {
                expected: tile_count,
                actual: channel.len(),
            });
        }
        if let Some(block) = channel.iter().find(|b| b.size() != BLOCK_SIZE) {
            return Err(PipelineError::UnsupportedBlockSize(block.size()));
        }
    }

    let mut pixels = vec![PixelYuv::default(); width * height];
    for ((y_block, u_block), v_block) in blocks.y.iter().zip(&blocks.u).zip(&blocks.v) {
        let position = y_block.position();
        let tile_row = position / tiles_per_row;
        let tile_col = position % tiles_per_row;
        for row in 0..BLOCK_SIZE {
            for col in 0..BLOCK_SIZE {
                let pixel_row = tile_row * BLOCK_SIZE + row;
                let pixel_col = tile_col * BLOCK_SIZE + col;
                pixels[pixel_row * width + pixel_col] = PixelYuv::new(
                    y_block.clamped_sample(row, col),
                    u_block.clamped_sample(row, col),
                    v_block.clamped_sample(row, col),
                );
            }
        }
    }
    Ok(Image::new(
        width,
        height,
        depth,
        description,
        Pixels::Yuv(pixels),
    ))
}
