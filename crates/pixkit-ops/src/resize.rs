//! Bicubic (Catmull-Rom) resampling.
//!
//! Output pixel `(x, y)` samples the input at
//! `((x + 0.5) * scale_x - 0.5, (y + 0.5) * scale_y - 0.5)` from the 4x4
//! neighborhood around that point, clamped to the input edges. Pixel
//! centers line up, so resizing to the same size reproduces the input.
//!
//! The tile region is in output coordinates.

use crate::clamp_index;
use pixkit_core::{PixelFormat, Region, RowBand};
use tracing::trace;

/// Catmull-Rom interpolation between `p1` and `p2` at fraction `x`.
#[inline]
pub fn cubic_interpolate(p0: f32, p1: f32, p2: f32, p3: f32, x: f32) -> f32 {
    p1 + 0.5
        * x
        * (p2 - p0 + x * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3 + x * (3.0 * (p1 - p2) + p3 - p0)))
}

/// Source taps and fraction for output coordinate `dst`.
#[inline]
fn taps(dst: usize, scale: f32, len: usize) -> ([usize; 4], f32) {
    let src = (dst as f32 + 0.5) * scale - 0.5;
    let floor = src.floor();
    let base = floor as isize;
    let idx = std::array::from_fn(|i| clamp_index(base + i as isize - 1, len));
    (idx, src - floor)
}

/// Resamples the output pixels of `tile`.
///
/// `input` is `input_size_x` x `input_size_y`, `out` belongs to an
/// `output_size_x` x `output_size_y` image; both have `vector_size`
/// channels.
#[allow(clippy::too_many_arguments)]
pub fn resize_tile<T: PixelFormat>(
    input: &[T],
    out: &mut RowBand<'_, T>,
    vector_size: usize,
    input_size_x: usize,
    input_size_y: usize,
    output_size_x: usize,
    output_size_y: usize,
    tile: Region,
) {
    let scale_x = input_size_x as f32 / output_size_x as f32;
    let scale_y = input_size_y as f32 / output_size_y as f32;
    let in_row_len = input_size_x * vector_size;
    trace!(scale_x, scale_y, rows = tile.height(), "resize tile");
    let sample =
        |y: usize, x: usize, c: usize| input[y * in_row_len + x * vector_size + c].to_f32();

    // Horizontal taps are the same for every row.
    let columns: Vec<([usize; 4], f32)> = (tile.start_x..tile.end_x)
        .map(|x| taps(x, scale_x, input_size_x))
        .collect();

    for y in tile.start_y..tile.end_y {
        let (ys, fy) = taps(y, scale_y, input_size_y);
        let dst_row = out.row_mut(y);
        for (x, (xs, fx)) in (tile.start_x..tile.end_x).zip(&columns) {
            for c in 0..vector_size {
                let rows: [f32; 4] = std::array::from_fn(|j| {
                    cubic_interpolate(
                        sample(ys[j], xs[0], c),
                        sample(ys[j], xs[1], c),
                        sample(ys[j], xs[2], c),
                        sample(ys[j], xs[3], c),
                        *fx,
                    )
                });
                let value = cubic_interpolate(rows[0], rows[1], rows[2], rows[3], fy);
                dst_row[x * vector_size + c] = T::from_f32(value);
            }
        }
    }
}
