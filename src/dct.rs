//! Forward and inverse 2D discrete cosine transform over 8x8 blocks.
//!
//! Direct double-sum evaluation. Each block transforms independently;
//! samples are expected to be level-shifted around zero before the
//! forward pass.

use std::f64::consts::PI;

use crate::block::Block;
use crate::constants::{BLOCK_DIM, BLOCK_SIZE};

pub fn fdct_8x8(input: &[f64; BLOCK_DIM], output: &mut [f64; BLOCK_DIM]) {
    for u in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0f64;
            for x in 0..BLOCK_SIZE {
                for y in 0..BLOCK_SIZE {
                    let cos_x = (((2 * x + 1) * u) as f64 * PI) / 16.0;
                    let cos_y = (((2 * y + 1) * v) as f64 * PI) / 16.0;
                    sum += input[x * BLOCK_SIZE + y] * cos_x.cos() * cos_y.cos();
                }
            }
            let cu = if u == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
            let cv = if v == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
            output[u * BLOCK_SIZE + v] = 0.25 * cu * cv * sum;
        }
    }
}

pub fn idct_8x8(input: &[f64; BLOCK_DIM], output: &mut [f64; BLOCK_DIM]) {
    for x in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0f64;
            for u in 0..BLOCK_SIZE {
                for v in 0..BLOCK_SIZE {
                    let cu = if u == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
                    let cv = if v == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
                    let cos_x = (((2 * x + 1) * u) as f64 * PI) / 16.0;
                    let cos_y = (((2 * y + 1) * v) as f64 * PI) / 16.0;
                    sum += cu * cv * input[u * BLOCK_SIZE + v] * cos_x.cos() * cos_y.cos();
                }
            }
            output[x * BLOCK_SIZE + y] = 0.25 * sum;
        }
    }
}

/// Replaces a block's samples with their frequency-domain coefficients.
pub fn forward_block(block: &mut Block) {
    debug_assert_eq!(block.size(), BLOCK_SIZE);
    let mut input = [0.0f64; BLOCK_DIM];
    input.copy_from_slice(block.samples());
    let mut output = [0.0f64; BLOCK_DIM];
    fdct_8x8(&input, &mut output);
    block.replace_samples(output.to_vec());
}

/// Replaces a block's coefficients with spatial samples.
pub fn inverse_block(block: &mut Block) {
    debug_assert_eq!(block.size(), BLOCK_SIZE);
    let mut input = [0.0f64; BLOCK_DIM];
    input.copy_from_slice(block.samples());
    let mut output = [0.0f64; BLOCK_DIM];
    idct_8x8(&input, &mut output);
    block.replace_samples(output.to_vec());
}
