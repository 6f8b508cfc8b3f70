//! Per-pixel affine channel transform: `out = M * in + add`.
//!
//! `M` is row-major with `output_vector_size` rows and `input_vector_size`
//! columns, so `out[o] = sum_i M[o * input_vector_size + i] * in[i] + add[o]`.
//! Values are handled in normalized units (see
//! [`PixelFormat`](pixkit_core::PixelFormat)), which means the add vector is
//! expressed in the same `[0, 1]` scale for `u8` and `f32` images.
//!
//! Differing channel counts are allowed, e.g. RGBA to greyscale with a
//! 1x4 matrix.
//!
//! # Presets
//!
//! The 4x4 presets operate on RGBA and pass alpha through:
//!
//! - [`GREYSCALE`] - Rec.601 luma replicated to R, G and B
//! - [`RGB_TO_YUV`] / [`YUV_TO_RGB`] - analog YUV conversions
//!
//! Use [`shrink`] to cut a preset down to fewer channels.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::color_matrix::{shrink, GREYSCALE};
//!
//! // RGBA in, single luma channel out.
//! let m = shrink(&GREYSCALE, 1, 4);
//! assert_eq!(m, vec![0.299, 0.587, 0.114, 0.0]);
//! ```

use pixkit_core::{PixelFormat, Region, RowBand};

/// 4x4 identity.
pub const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Rec.601 luma into R, G and B; alpha kept.
pub const GREYSCALE: [f32; 16] = [
    0.299, 0.587, 0.114, 0.0, //
    0.299, 0.587, 0.114, 0.0, //
    0.299, 0.587, 0.114, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// RGB to YUV (U and V centered on zero); alpha kept.
pub const RGB_TO_YUV: [f32; 16] = [
    0.299, 0.587, 0.114, 0.0, //
    -0.14713, -0.28886, 0.436, 0.0, //
    0.615, -0.51499, -0.10001, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// YUV (U and V centered on zero) to RGB; alpha kept.
pub const YUV_TO_RGB: [f32; 16] = [
    1.0, 0.0, 1.13983, 0.0, //
    1.0, -0.39465, -0.5806, 0.0, //
    1.0, 2.03211, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// `n x n` identity matrix, row-major.
pub fn identity(n: usize) -> Vec<f32> {
    let mut m = vec![0.0; n * n];
    for i in 0..n {
        m[i * n + i] = 1.0;
    }
    m
}

/// Top-left `output_vector_size x input_vector_size` block of a 4x4 matrix.
pub fn shrink(matrix: &[f32; 16], output_vector_size: usize, input_vector_size: usize) -> Vec<f32> {
    (0..output_vector_size.min(4))
        .flat_map(|o| (0..input_vector_size.min(4)).map(move |i| matrix[o * 4 + i]))
        .collect()
}

/// Applies the matrix to the pixels of `tile`.
///
/// `input` holds `input_vector_size` channels per pixel and `out` holds
/// `output_vector_size`; both images are `size_x` pixels wide.
#[allow(clippy::too_many_arguments)]
pub fn color_matrix_tile<T: PixelFormat>(
    input: &[T],
    out: &mut RowBand<'_, T>,
    input_vector_size: usize,
    output_vector_size: usize,
    size_x: usize,
    matrix: &[f32],
    add_vector: &[f32],
    tile: Region,
) {
    let (ivs, ovs) = (input_vector_size, output_vector_size);
    let in_row_len = size_x * ivs;

    for y in tile.start_y..tile.end_y {
        let src_row =
            &input[y * in_row_len + tile.start_x * ivs..y * in_row_len + tile.end_x * ivs];
        let dst_row = &mut out.row_mut(y)[tile.start_x * ovs..tile.end_x * ovs];
        for (dst, src) in dst_row.chunks_exact_mut(ovs).zip(src_row.chunks_exact(ivs)) {
            let mut px = [0.0f32; 4];
            for (p, &v) in px.iter_mut().zip(src) {
                *p = v.to_f32();
            }
            for (o, d) in dst.iter_mut().enumerate() {
                let row = &matrix[o * ivs..(o + 1) * ivs];
                let sum = row.iter().zip(&px).fold(add_vector[o], |acc, (m, p)| acc + m * p);
                *d = T::from_f32(sum);
            }
        }
    }
}
