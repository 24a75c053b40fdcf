/// Side length of the transform blocks the pipeline operates on.
pub const BLOCK_SIZE: usize = 8;
/// Sample count of a full transform block.
pub const BLOCK_DIM: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Upper bound of the pixel sample range.
pub const SAMPLE_MAX: f64 = 255.0;

/// Conventional bit-depth tag carried by text pixel files.
pub const DEFAULT_DEPTH: u16 = 255;

/// Offset subtracted before the forward DCT and added back after the inverse.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Sample-count ratio used when subsampling chroma blocks (4:2:0-style,
/// one chroma sample per 2x2 luma neighborhood).
pub const CHROMA_SUBSAMPLE_FACTOR: usize = 4;

/// Largest amplitude size category; categories cover |amplitude| <= 1023.
pub const MAX_AMPLITUDE_SIZE: u8 = 10;
