//! Zigzag traversal tables, computed once per block size and shared.

use std::sync::OnceLock;

use crate::constants::BLOCK_SIZE;

/// The diagonal scan order of an N x N coefficient grid.
///
/// Built once per size and immutable afterwards; every block of that size
/// reads the same table. Coordinate i serves both directions: scanning
/// (read the sample at coordinate i) and placement (write recovered
/// sample i back to it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZigzagTable {
    size: usize,
    coords: Vec<(usize, usize)>,
}

impl ZigzagTable {
    /// Walks the diagonals from (0,0) to (N-1,N-1), reflecting at the
    /// grid boundary, visiting every cell exactly once.
    pub fn new(size: usize) -> Self {
        let mut coords = Vec::with_capacity(size * size);
        let (mut row, mut col) = (0usize, 0usize);
        let mut upward = true;
        for _ in 0..size * size {
            coords.push((row, col));
            if upward {
                if col + 1 == size {
                    row += 1;
                    upward = false;
                } else if row == 0 {
                    col += 1;
                    upward = false;
                } else {
                    row -= 1;
                    col += 1;
                }
            } else if row + 1 == size {
                col += 1;
                upward = true;
            } else if col == 0 {
                row += 1;
                upward = true;
            } else {
                row += 1;
                col -= 1;
            }
        }
        Self { size, coords }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn coords(&self) -> &[(usize, usize)] {
        &self.coords
    }

    pub fn coord(&self, index: usize) -> (usize, usize) {
        self.coords[index]
    }
}

/// The shared table for standard 8x8 blocks, built on first use.
pub fn zigzag_8x8() -> &'static ZigzagTable {
    static TABLE: OnceLock<ZigzagTable> = OnceLock::new();
    TABLE.get_or_init(|| ZigzagTable::new(BLOCK_SIZE))
}
