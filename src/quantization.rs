//! Quantization of DCT coefficients against the fixed divisor table.
//!
//! The only lossy numeric step after color truncation: coefficients are
//! divided position-for-position, rounded to the nearest integer, and
//! multiplied back on decode. Rounding to nearest is the crate-wide
//! policy, shared with the entropy stage's amplitude classification.

use crate::block::Block;
use crate::constants::BLOCK_DIM;

/// Fixed quantization matrix applied to every channel block (row-major).
pub const QUANT_TABLE: [u8; BLOCK_DIM] = [
    6, 4, 4, 6, 10, 16, 20, 24, //
    5, 5, 6, 8, 10, 23, 24, 22, //
    6, 5, 6, 10, 16, 23, 28, 22, //
    6, 7, 9, 12, 20, 35, 32, 25, //
    7, 9, 15, 22, 27, 44, 41, 31, //
    10, 14, 22, 26, 32, 42, 45, 37, //
    20, 26, 31, 35, 41, 48, 48, 40, //
    29, 37, 38, 39, 45, 40, 41, 40,
];

/// Divides every coefficient by the matching table entry, rounding to
/// the nearest integer.
pub fn quantize_block(block: &mut Block) {
    debug_assert_eq!(block.samples().len(), BLOCK_DIM);
    for (sample, &divisor) in block.samples_mut().iter_mut().zip(QUANT_TABLE.iter()) {
        *sample = (*sample / divisor as f64).round();
    }
}

/// Multiplies every coefficient back by the matching table entry.
pub fn dequantize_block(block: &mut Block) {
    debug_assert_eq!(block.samples().len(), BLOCK_DIM);
    for (sample, &divisor) in block.samples_mut().iter_mut().zip(QUANT_TABLE.iter()) {
        *sample *= divisor as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_to_nearest() {
        let mut samples = vec![0.0f64; BLOCK_DIM];
        samples[0] = 13.0; // divisor 6 -> 2
        samples[1] = -13.0; // divisor 4 -> -3
        samples[2] = 10.0; // divisor 4 -> 3 (half away from zero)
        let mut block = Block::new(samples, 0);
        quantize_block(&mut block);
        assert_eq!(block.samples()[0], 2.0);
        assert_eq!(block.samples()[1], -3.0);
        assert_eq!(block.samples()[2], 3.0);
    }

    #[test]
    fn test_tiny_residues_quantize_to_zero() {
        let mut block = Block::new(vec![-1e-13; BLOCK_DIM], 0);
        quantize_block(&mut block);
        assert!(block.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_roundtrip_error_bounded_by_one_step() {
        let samples: Vec<f64> = (0..BLOCK_DIM)
            .map(|i| ((i * 97 + 13) % 512) as f64 - 256.0)
            .collect();
        let mut block = Block::new(samples.clone(), 0);
        quantize_block(&mut block);
        dequantize_block(&mut block);
        for (i, (original, recovered)) in samples.iter().zip(block.samples()).enumerate() {
            let step = QUANT_TABLE[i] as f64;
            assert!(
                (original - recovered).abs() < step,
                "coefficient {i}: {original} -> {recovered} exceeds step {step}"
            );
        }
    }
}
