//! Tile scheduler: fork-join dispatch of kernels over a region.
//!
//! The region is split into at most one horizontal band per worker
//! ([`Region::split_rows`]). Writing kernels get their band's rows of the
//! output as a [`RowBand`]; reducing kernels return a partial value per tile
//! which the caller merges after the join.
//!
//! Both entry points return only after every tile has completed. A panic in
//! a tile is propagated to the caller once the remaining tiles finish.

use crate::pool::WorkerPool;
use pixkit_core::{Region, RowBand};
use rayon::prelude::*;
use tracing::trace;

/// Runs `kernel` once per tile of `region`, each with its own rows of `out`.
///
/// `out` is a row-major buffer of `row_len` elements per row that extends
/// at least to `region.end_y`. Rows outside the region are not touched.
pub fn for_each_band<T, F>(
    pool: &WorkerPool,
    region: Region,
    out: &mut [T],
    row_len: usize,
    kernel: F,
) where
    T: Send,
    F: Fn(Region, &mut RowBand<'_, T>) + Sync,
{
    let tiles = region.split_rows(pool.threads());
    trace!(tiles = tiles.len(), rows = region.height(), "dispatch bands");
    let bands = RowBand::carve(out, row_len, &tiles);
    let kernel = &kernel;
    pool.pool().scope(|s| {
        for (tile, mut band) in tiles.into_iter().zip(bands) {
            s.spawn(move |_| kernel(tile, &mut band));
        }
    });
}

/// Runs `kernel` once per tile of `region` and returns the results in tile
/// order (top to bottom).
pub fn map_tiles<A, F>(pool: &WorkerPool, region: Region, kernel: F) -> Vec<A>
where
    A: Send,
    F: Fn(Region) -> A + Sync,
{
    let tiles = region.split_rows(pool.threads());
    trace!(tiles = tiles.len(), rows = region.height(), "dispatch partials");
    pool.pool()
        .install(|| tiles.par_iter().map(|&tile| kernel(tile)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_bands_cover_region_once() {
        let pool = WorkerPool::new(4, "t").unwrap();
        let (sx, sy) = (5, 11);
        let mut out = vec![0u32; sx * sy];
        let region = Region::new(1, 4, 2, 9);
        for_each_band(&pool, region, &mut out, sx, |tile, band| {
            for y in tile.start_y..tile.end_y {
                for v in &mut band.row_mut(y)[tile.start_x..tile.end_x] {
                    *v += 1;
                }
            }
        });
        for y in 0..sy {
            for x in 0..sx {
                let expected = u32::from(region.contains(x, y));
                assert_eq!(out[y * sx + x], expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_tile_count_bounded_by_workers() {
        let pool = WorkerPool::new(3, "t").unwrap();
        let calls = AtomicUsize::new(0);
        let mut out = vec![0u8; 100];
        for_each_band(&pool, Region::full(1, 100), &mut out, 1, |_, _| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_map_tiles_in_order() {
        let pool = WorkerPool::new(4, "t").unwrap();
        let starts = map_tiles(&pool, Region::full(2, 10), |tile| tile.start_y);
        assert_eq!(starts, vec![0, 3, 6, 9]);
    }

    #[test]
    #[should_panic(expected = "tile failed")]
    fn test_panic_propagates() {
        let pool = WorkerPool::new(2, "t").unwrap();
        let mut out = vec![0u8; 4];
        for_each_band(&pool, Region::full(1, 4), &mut out, 1, |tile, _| {
            if tile.start_y == 0 {
                panic!("tile failed");
            }
        });
    }
}
