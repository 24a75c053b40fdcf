//! Run-length / size / amplitude symbol coding over the zigzag scan.
//!
//! The symbol stream stops at the bit-packing boundary: symbols carry the
//! magnitude category and signed amplitude directly, with no code
//! assignment. Coding is only defined for full 8x8 blocks; the size
//! category table covers the 10-bit amplitude range used at that size.

use crate::block::Block;
use crate::constants::{BLOCK_DIM, BLOCK_SIZE, MAX_AMPLITUDE_SIZE};
use crate::error::{PipelineError, Result};
use crate::zigzag::ZigzagTable;

/// One entropy symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Leading DC coefficient: size category and literal amplitude.
    Dc { size: u8, amplitude: i32 },
    /// AC coefficient preceded by `run` zero coefficients.
    Ac { run: u8, size: u8, amplitude: i32 },
    /// All remaining coefficients in the block are zero.
    EndOfBlock,
}

/// Magnitude category of an amplitude: 1 covers |a| = 1, 2 covers
/// |a| in [2,3], doubling up to 10 for [512, 1023]. The amplitude is
/// rounded to the nearest integer first. Zero classifies as 0, which is
/// only meaningful as the literal DC value.
pub fn amplitude_size(amplitude: f64) -> Result<u8> {
    category(amplitude.round() as i32)
}

fn category(amplitude: i32) -> Result<u8> {
    if amplitude == 0 {
        return Ok(0);
    }
    let size = (32 - amplitude.unsigned_abs().leading_zeros()) as u8;
    if size > MAX_AMPLITUDE_SIZE {
        return Err(PipelineError::AmplitudeOutOfRange(amplitude));
    }
    Ok(size)
}

/// Scans a quantized block in zigzag order and emits its symbol stream.
///
/// The first symbol is always the DC coefficient. Zero AC coefficients
/// accumulate into the run of the next nonzero symbol; a trailing zero
/// run is closed by [`Symbol::EndOfBlock`].
pub fn encode_block(block: &Block, zigzag: &ZigzagTable) -> Result<Vec<Symbol>> {
    if block.size() != BLOCK_SIZE {
        return Err(PipelineError::UnsupportedBlockSize(block.size()));
    }
    debug_assert_eq!(zigzag.size(), BLOCK_SIZE);

    let mut symbols = Vec::with_capacity(BLOCK_DIM / 4);
    let mut run = 0u8;
    for (i, &(row, col)) in zigzag.coords().iter().enumerate() {
        let amplitude = block.sample(row, col).round() as i32;
        if i == 0 {
            symbols.push(Symbol::Dc {
                size: category(amplitude)?,
                amplitude,
            });
            continue;
        }
        if amplitude == 0 {
            run += 1;
            continue;
        }
        symbols.push(Symbol::Ac {
            run,
            size: category(amplitude)?,
            amplitude,
        });
        run = 0;
    }
    if run > 0 {
        symbols.push(Symbol::EndOfBlock);
    }
    Ok(symbols)
}

/// Rebuilds an 8x8 block from its symbol stream, placing recovered sample
/// i at zigzag coordinate i.
///
/// An empty stream means entropy coding never ran for this block; a
/// stream whose runs do not add up to 64 samples is malformed.
pub fn decode_block(symbols: &[Symbol], zigzag: &ZigzagTable, position: usize) -> Result<Block> {
    if symbols.is_empty() {
        return Err(PipelineError::EntropyNotReady);
    }
    debug_assert_eq!(zigzag.size(), BLOCK_SIZE);

    let mut recovered = Vec::with_capacity(BLOCK_DIM);
    let mut stream = symbols.iter();
    match stream.next() {
        Some(Symbol::Dc { amplitude, .. }) => recovered.push(*amplitude as f64),
        _ => {
            return Err(PipelineError::MalformedStream(
                "stream does not start with a DC symbol".to_string(),
            ));
        }
    }

    for symbol in stream {
        match *symbol {
            Symbol::Ac { run, amplitude, .. } => {
                recovered.resize(recovered.len() + run as usize, 0.0);
                recovered.push(amplitude as f64);
            }
            Symbol::EndOfBlock => {
                if recovered.len() >= BLOCK_DIM {
                    return Err(PipelineError::MalformedStream(
                        "end-of-block after a full block".to_string(),
                    ));
                }
                recovered.resize(BLOCK_DIM, 0.0);
                break;
            }
            Symbol::Dc { .. } => {
                return Err(PipelineError::MalformedStream(
                    "DC symbol after the first position".to_string(),
                ));
            }
        }
    }
    if recovered.len() != BLOCK_DIM {
        return Err(PipelineError::MalformedStream(format!(
            "stream yields {} samples, expected {}",
            recovered.len(),
            BLOCK_DIM
        )));
    }

    let mut samples = vec![0.0f64; BLOCK_DIM];
    for (i, &(row, col)) in zigzag.coords().iter().enumerate() {
        samples[row * BLOCK_SIZE + col] = recovered[i];
    }
    Ok(Block::new(samples, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zigzag::zigzag_8x8;

    fn block_with(entries: &[(usize, usize, f64)]) -> Block {
        let mut samples = vec![0.0f64; BLOCK_DIM];
        for &(row, col, value) in entries {
            samples[row * BLOCK_SIZE + col] = value;
        }
        Block::new(samples, 0)
    }

    #[test]
    fn test_size_category_boundaries() {
        for (amplitude, expected) in [
            (1.0, 1),
            (3.0, 2),
            (4.0, 3),
            (7.0, 3),
            (8.0, 4),
            (15.0, 4),
            (16.0, 5),
            (511.0, 9),
            (512.0, 10),
            (1023.0, 10),
        ] {
            assert_eq!(amplitude_size(amplitude).unwrap(), expected);
            assert_eq!(amplitude_size(-amplitude).unwrap(), expected);
        }
        assert_eq!(amplitude_size(0.0).unwrap(), 0);
        assert_eq!(amplitude_size(0.4).unwrap(), 0);
    }

    #[test]
    fn test_size_category_rejects_out_of_range() {
        assert_eq!(
            amplitude_size(1024.0),
            Err(PipelineError::AmplitudeOutOfRange(1024))
        );
        assert_eq!(
            amplitude_size(-2000.0),
            Err(PipelineError::AmplitudeOutOfRange(-2000))
        );
    }

    #[test]
    fn test_all_zero_block_encodes_to_two_symbols() {
        let block = block_with(&[]);
        let symbols = encode_block(&block, zigzag_8x8()).unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::Dc {
                    size: 0,
                    amplitude: 0
                },
                Symbol::EndOfBlock,
            ]
        );

        let decoded = decode_block(&symbols, zigzag_8x8(), 0).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_dc_only_block() {
        let block = block_with(&[(0, 0, 5.0)]);
        let symbols = encode_block(&block, zigzag_8x8()).unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::Dc {
                    size: 3,
                    amplitude: 5
                },
                Symbol::EndOfBlock,
            ]
        );
        assert_eq!(decode_block(&symbols, zigzag_8x8(), 0).unwrap(), block);
    }

    #[test]
    fn test_runs_count_zigzag_zeros() {
        // Zigzag order starts (0,0), (0,1), (1,0), (2,0), (1,1), ...
        let block = block_with(&[(0, 0, -3.0), (1, 0, 7.0), (1, 1, -1.0)]);
        let symbols = encode_block(&block, zigzag_8x8()).unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::Dc {
                    size: 2,
                    amplitude: -3
                },
                Symbol::Ac {
                    run: 1,
                    size: 3,
                    amplitude: 7
                },
                Symbol::Ac {
                    run: 1,
                    size: 1,
                    amplitude: -1
                },
                Symbol::EndOfBlock,
            ]
        );
        assert_eq!(decode_block(&symbols, zigzag_8x8(), 0).unwrap(), block);
    }

    #[test]
    fn test_block_ending_in_nonzero_has_no_sentinel() {
        let block = block_with(&[(7, 7, 2.0)]);
        let symbols = encode_block(&block, zigzag_8x8()).unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::Dc {
                    size: 0,
                    amplitude: 0
                },
                Symbol::Ac {
                    run: 62,
                    size: 2,
                    amplitude: 2
                },
            ]
        );
        assert_eq!(decode_block(&symbols, zigzag_8x8(), 0).unwrap(), block);
    }

    #[test]
    fn test_roundtrip_is_exact_for_integer_blocks() {
        let samples: Vec<f64> = (0..BLOCK_DIM)
            .map(|i| match i % 7 {
                0 => ((i as i32 % 19) - 9) as f64,
                3 => -((i as i32 % 11) as f64),
                _ => 0.0,
            })
            .collect();
        let block = Block::new(samples, 4);
        let symbols = encode_block(&block, zigzag_8x8()).unwrap();
        let decoded = decode_block(&symbols, zigzag_8x8(), 4).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.position(), 4);
    }

    #[test]
    fn test_encode_rejects_non_standard_blocks() {
        let block = Block::new(vec![0.0; 16], 0);
        assert_eq!(
            encode_block(&block, zigzag_8x8()),
            Err(PipelineError::UnsupportedBlockSize(4))
        );
    }

    #[test]
    fn test_decode_empty_stream_is_not_ready() {
        assert_eq!(
            decode_block(&[], zigzag_8x8(), 0),
            Err(PipelineError::EntropyNotReady)
        );
    }

    #[test]
    fn test_decode_rejects_short_stream() {
        let symbols = vec![
            Symbol::Dc {
                size: 1,
                amplitude: 1,
            },
            Symbol::Ac {
                run: 5,
                size: 1,
                amplitude: 1,
            },
        ];
        assert!(matches!(
            decode_block(&symbols, zigzag_8x8(), 0),
            Err(PipelineError::MalformedStream(_))
        ));
    }

    #[test]
    fn test_decode_rejects_leading_ac() {
        let symbols = vec![Symbol::Ac {
            run: 0,
            size: 1,
            amplitude: 1,
        }];
        assert!(matches!(
            decode_block(&symbols, zigzag_8x8(), 0),
            Err(PipelineError::MalformedStream(_))
        ));
    }
}
