//! Separable Gaussian blur.
//!
//! The blur radius selects a Gaussian with `sigma = 0.4 * radius + 0.6`,
//! sampled at integer offsets `-radius..=radius` and normalized to sum to 1.
//!
//! Each output row is produced independently: a vertical pass gathers the
//! column neighborhood into a float scratch row, then a horizontal pass
//! filters that row. Both passes clamp samples to the image edge. Because a
//! row never depends on another tile's output, any row partition produces
//! the same bytes.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::blur::gaussian_weights;
//!
//! let w = gaussian_weights(3);
//! assert_eq!(w.len(), 7);
//! assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-5);
//! ```

use crate::clamp_index;
use pixkit_core::{Region, RowBand};
use tracing::trace;

/// Largest accepted blur radius.
pub const MAX_RADIUS: usize = 25;

/// Blur strength plus how many times to apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurConfig {
    /// Kernel radius in pixels.
    pub radius: usize,
    /// Number of successive passes.
    pub repeat: usize,
}

impl BlurConfig {
    /// One pass at `radius`.
    pub fn new(radius: usize) -> Self {
        Self { radius, repeat: 1 }
    }

    /// Sets the number of passes.
    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Clamps radius and repeat into `0..=MAX_RADIUS`.
    pub fn coerced(self) -> Self {
        Self {
            radius: self.radius.min(MAX_RADIUS),
            repeat: self.repeat.min(MAX_RADIUS),
        }
    }

    /// Returns `true` if applying this config leaves the image unchanged.
    pub fn is_noop(&self) -> bool {
        self.radius == 0 || self.repeat == 0
    }
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Normalized Gaussian weights for offsets `-radius..=radius`.
pub fn gaussian_weights(radius: usize) -> Vec<f32> {
    let sigma = 0.4 * radius as f32 + 0.6;
    let coeff1 = 1.0 / ((2.0 * std::f32::consts::PI).sqrt() * sigma);
    let coeff2 = -1.0 / (2.0 * sigma * sigma);

    let r = radius as isize;
    let mut weights: Vec<f32> = (-r..=r)
        .map(|i| coeff1 * ((i * i) as f32 * coeff2).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Blurs the rows of `tile` from `input` into `out`.
///
/// `input` is the whole `size_x` x `size_y` image with `vector_size`
/// channels; `weights` comes from [`gaussian_weights`].
pub fn blur_tile(
    input: &[u8],
    out: &mut RowBand<'_, u8>,
    size_x: usize,
    size_y: usize,
    vector_size: usize,
    weights: &[f32],
    tile: Region,
) {
    let radius = weights.len() / 2;
    let row_len = size_x * vector_size;
    // Columns the horizontal pass can reach from this tile.
    let span_lo = tile.start_x.saturating_sub(radius);
    let span_hi = (tile.end_x + radius).min(size_x);
    let mut scratch = vec![0.0f32; row_len];
    trace!(radius, rows = tile.height(), span = span_hi - span_lo, "blur tile");

    for y in tile.start_y..tile.end_y {
        for (k, &w) in weights.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius as isize, size_y);
            let src_row = &input[sy * row_len..(sy + 1) * row_len];
            let lo = span_lo * vector_size;
            let hi = span_hi * vector_size;
            if k == 0 {
                for (acc, &v) in scratch[lo..hi].iter_mut().zip(&src_row[lo..hi]) {
                    *acc = w * v as f32;
                }
            } else {
                for (acc, &v) in scratch[lo..hi].iter_mut().zip(&src_row[lo..hi]) {
                    *acc += w * v as f32;
                }
            }
        }

        let dst_row = out.row_mut(y);
        for x in tile.start_x..tile.end_x {
            for c in 0..vector_size {
                let mut sum = 0.0f32;
                for (k, &w) in weights.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - radius as isize, size_x);
                    sum += w * scratch[sx * vector_size + c];
                }
                dst_row[x * vector_size + c] = (sum + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }
}
