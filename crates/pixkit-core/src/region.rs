//! Region type restricting which pixels a kernel processes.
//!
//! A [`Region`] is half-open on both axes, in pixel coordinates with the
//! origin at the top-left corner:
//!
//! ```text
//! (0,0) ────────► X
//!   │   start_x      end_x
//!   │   ┌────────────┐ start_y
//!   │   │   Region   │
//!   │   └────────────┘ end_y
//!   ▼
//!   Y
//! ```
//!
//! Regions are also what the tile scheduler hands to kernels: a tile is a
//! horizontal band of the processed region, produced by
//! [`Region::split_rows`].
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::Region;
//!
//! let region = Region::new(10, 110, 20, 70);
//! assert_eq!(region.width(), 100);
//! assert_eq!(region.height(), 50);
//! assert!(region.contains(15, 25));
//!
//! let full = Region::resolve("blur", None, 64, 48).unwrap();
//! assert_eq!(full, Region::full(64, 48));
//! ```

use crate::{Error, Result};

/// Half-open rectangle `[start_x, end_x) x [start_y, end_y)`.
///
/// # Invariants
///
/// A region accepted by [`Region::validate`] satisfies
/// `start_x < end_x <= size_x` and `start_y < end_y <= size_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// First column (inclusive)
    pub start_x: usize,
    /// Last column (exclusive)
    pub end_x: usize,
    /// First row (inclusive)
    pub start_y: usize,
    /// Last row (exclusive)
    pub end_y: usize,
}

impl Region {
    /// Creates a region from its four bounds.
    #[inline]
    pub const fn new(start_x: usize, end_x: usize, start_y: usize, end_y: usize) -> Self {
        Self {
            start_x,
            end_x,
            start_y,
            end_y,
        }
    }

    /// Creates a region covering a whole `size_x` x `size_y` image.
    #[inline]
    pub const fn full(size_x: usize, size_y: usize) -> Self {
        Self::new(0, size_x, 0, size_y)
    }

    /// Number of columns.
    #[inline]
    pub const fn width(&self) -> usize {
        self.end_x.saturating_sub(self.start_x)
    }

    /// Number of rows.
    #[inline]
    pub const fn height(&self) -> usize {
        self.end_y.saturating_sub(self.start_y)
    }

    /// Number of pixels.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns `true` if the region covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns `true` if pixel (x, y) lies inside the region.
    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.start_x && x < self.end_x && y >= self.start_y && y < self.end_y
    }

    /// Checks that the region is non-empty and lies within a
    /// `size_x` x `size_y` image.
    ///
    /// `op` names the calling operation in the error.
    pub fn validate(&self, op: &'static str, size_x: usize, size_y: usize) -> Result<()> {
        if self.start_x >= self.end_x || self.start_y >= self.end_y {
            return Err(Error::invalid_argument(
                op,
                format!(
                    "region start must be less than end, got x {}..{} y {}..{}",
                    self.start_x, self.end_x, self.start_y, self.end_y
                ),
            ));
        }
        if self.end_x > size_x || self.end_y > size_y {
            return Err(Error::invalid_argument(
                op,
                format!(
                    "region x {}..{} y {}..{} exceeds image {}x{}",
                    self.start_x, self.end_x, self.start_y, self.end_y, size_x, size_y
                ),
            ));
        }
        Ok(())
    }

    /// Validates an optional region, defaulting to the full image.
    pub fn resolve(
        op: &'static str,
        region: Option<Region>,
        size_x: usize,
        size_y: usize,
    ) -> Result<Region> {
        match region {
            Some(region) => {
                region.validate(op, size_x, size_y)?;
                Ok(region)
            }
            None => Ok(Region::full(size_x, size_y)),
        }
    }

    /// Splits the region into horizontal bands for `workers` threads.
    ///
    /// Each band holds `ceil(height / workers)` rows, the last one takes the
    /// remainder. When there are fewer rows than workers every row becomes
    /// its own band, so no band is ever empty. Bands span the full
    /// `[start_x, end_x)` and are returned top to bottom.
    pub fn split_rows(&self, workers: usize) -> Vec<Region> {
        if self.is_empty() {
            return Vec::new();
        }
        let rows_per_band = self.height().div_ceil(workers.max(1));
        (self.start_y..self.end_y)
            .step_by(rows_per_band)
            .map(|y| {
                Region::new(
                    self.start_x,
                    self.end_x,
                    y,
                    (y + rows_per_band).min(self.end_y),
                )
            })
            .collect()
    }
}
