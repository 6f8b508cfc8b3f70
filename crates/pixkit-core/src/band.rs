//! Row-band views of output buffers.
//!
//! The scheduler carves a caller's output buffer into one [`RowBand`] per
//! tile. Each band owns a disjoint run of whole rows, so tiles can write
//! their output concurrently without any synchronization: the borrow checker
//! already proves the writes never overlap.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{Region, RowBand};
//!
//! let mut buf = vec![0u8; 4 * 6];
//! let tiles = Region::full(4, 6).split_rows(3);
//! let mut bands = RowBand::carve(&mut buf, 4, &tiles);
//! bands[1].row_mut(2)[0] = 9;
//! drop(bands);
//! assert_eq!(buf[2 * 4], 9);
//! ```

use crate::Region;

/// Mutable view of rows `[first_row, first_row + rows)` of a row-major buffer.
///
/// Rows are addressed by their absolute image row, not by their offset
/// inside the band.
#[derive(Debug)]
pub struct RowBand<'a, T> {
    data: &'a mut [T],
    first_row: usize,
    row_len: usize,
}

impl<'a, T> RowBand<'a, T> {
    /// Wraps `data`, which must hold a whole number of `row_len` rows
    /// starting at image row `first_row`.
    #[inline]
    pub fn new(data: &'a mut [T], first_row: usize, row_len: usize) -> Self {
        debug_assert!(row_len > 0 && data.len() % row_len == 0);
        Self {
            data,
            first_row,
            row_len,
        }
    }

    /// Splits `data` into one band per tile.
    ///
    /// `tiles` must be sorted top to bottom and must not overlap; rows
    /// between tiles are skipped. `data` must extend at least to the last
    /// tile's `end_y`.
    pub fn carve(data: &'a mut [T], row_len: usize, tiles: &[Region]) -> Vec<Self> {
        let mut rest = data;
        let mut row = 0;
        let mut bands = Vec::with_capacity(tiles.len());
        for tile in tiles {
            assert!(tile.start_y >= row, "tiles must be sorted and disjoint");
            let (_, tail) = std::mem::take(&mut rest).split_at_mut((tile.start_y - row) * row_len);
            let (head, tail) = tail.split_at_mut(tile.height() * row_len);
            bands.push(RowBand::new(head, tile.start_y, row_len));
            rest = tail;
            row = tile.end_y;
        }
        bands
    }

    /// First image row held by the band.
    #[inline]
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Number of rows held by the band.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len() / self.row_len
    }

    /// Elements per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Immutable access to image row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = (y - self.first_row) * self.row_len;
        &self.data[start..start + self.row_len]
    }

    /// Mutable access to image row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = (y - self.first_row) * self.row_len;
        &mut self.data[start..start + self.row_len]
    }
}
