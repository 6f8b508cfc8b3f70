//! 3x3 and 5x5 convolution with caller-supplied coefficients.
//!
//! Coefficient `k[ky * size + kx]` weighs the input pixel at
//! `(x + kx - r, y + ky - r)` where `r = size / 2`; samples outside the image
//! are clamped to the nearest edge pixel. Arithmetic is per channel in
//! normalized units, so `u8` output is rounded and saturated while `f32`
//! output is left as computed.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::convolve::{KernelSize, IDENTITY_3X3};
//!
//! assert_eq!(KernelSize::Three.coefficient_count(), IDENTITY_3X3.len());
//! ```

use crate::clamp_index;
use pixkit_core::{PixelFormat, Region, RowBand};

/// Coefficients of the 3x3 identity convolution.
pub const IDENTITY_3X3: [f32; 9] = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];

/// Supported kernel sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelSize {
    /// 3x3, 9 coefficients.
    Three,
    /// 5x5, 25 coefficients.
    Five,
}

impl KernelSize {
    /// Side length.
    #[inline]
    pub fn side(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    /// Half side length.
    #[inline]
    pub fn radius(self) -> usize {
        self.side() / 2
    }

    /// Number of coefficients the kernel needs.
    #[inline]
    pub fn coefficient_count(self) -> usize {
        self.side() * self.side()
    }
}

/// Convolves the pixels of `tile`.
#[allow(clippy::too_many_arguments)]
pub fn convolve_tile<T: PixelFormat>(
    input: &[T],
    out: &mut RowBand<'_, T>,
    vector_size: usize,
    size_x: usize,
    size_y: usize,
    kernel: KernelSize,
    coefficients: &[f32],
    tile: Region,
) {
    let side = kernel.side();
    let r = kernel.radius() as isize;
    let row_len = size_x * vector_size;

    for y in tile.start_y..tile.end_y {
        let dst_row = out.row_mut(y);
        for x in tile.start_x..tile.end_x {
            let mut sums = [0.0f32; 4];
            for ky in 0..side {
                let sy = clamp_index(y as isize + ky as isize - r, size_y);
                let src_row = &input[sy * row_len..(sy + 1) * row_len];
                for kx in 0..side {
                    let sx = clamp_index(x as isize + kx as isize - r, size_x);
                    let w = coefficients[ky * side + kx];
                    let px = &src_row[sx * vector_size..(sx + 1) * vector_size];
                    for (s, &v) in sums.iter_mut().zip(px) {
                        *s += w * v.to_f32();
                    }
                }
            }
            let dst = &mut dst_row[x * vector_size..(x + 1) * vector_size];
            for (d, &s) in dst.iter_mut().zip(&sums) {
                *d = T::from_f32(s);
            }
        }
    }
}
