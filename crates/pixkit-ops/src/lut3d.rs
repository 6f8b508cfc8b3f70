//! 3D lookup table (color cube) with trilinear interpolation.
//!
//! The input pixel's R, G and B select a position inside the cube along X,
//! Y and Z; the eight surrounding entries are blended with 15-bit fixed-point
//! weights. Alpha passes through.
//!
//! # Cube layout
//!
//! Entries are 4 bytes (R, G, B, unused) stored X-fastest:
//!
//! ```text
//! offset(x, y, z) = ((z * size_y + y) * size_x + x) * 4
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::lut3d::{identity_cube, lut3d_pixel, Cube};
//!
//! let values = identity_cube(17, 17, 17);
//! let cube = Cube::new(&values, 17, 17, 17).unwrap();
//! let out = lut3d_pixel(&cube, [10, 128, 250, 42]);
//! assert_eq!(out[3], 42);
//! assert!(out[1].abs_diff(128) <= 1);
//! ```

use pixkit_core::{Error, Region, Result, RowBand};

/// Smallest and largest accepted cube side.
pub const CUBE_DIM_RANGE: std::ops::RangeInclusive<usize> = 2..=256;

/// Fixed-point one for the interpolation weights.
const ONE: u32 = 0x8000;

/// A borrowed, validated color cube.
#[derive(Debug, Clone, Copy)]
pub struct Cube<'a> {
    values: &'a [u8],
    size_x: usize,
    size_y: usize,
    size_z: usize,
}

impl<'a> Cube<'a> {
    /// Wraps `values` as a `size_x` x `size_y` x `size_z` cube.
    ///
    /// Each side must be in `2..=256` and `values` must hold at least
    /// `size_x * size_y * size_z * 4` bytes.
    pub fn new(values: &'a [u8], size_x: usize, size_y: usize, size_z: usize) -> Result<Self> {
        for (axis, dim) in [("x", size_x), ("y", size_y), ("z", size_z)] {
            if !CUBE_DIM_RANGE.contains(&dim) {
                return Err(Error::invalid_argument(
                    "lut3d",
                    format!("cube {axis} dimension must be 2..=256, got {dim}"),
                ));
            }
        }
        let needed = size_x * size_y * size_z * 4;
        if values.len() < needed {
            return Err(Error::invalid_argument(
                "lut3d",
                format!(
                    "cube {size_x}x{size_y}x{size_z} needs {needed} bytes, got {}",
                    values.len()
                ),
            ));
        }
        Ok(Self {
            values,
            size_x,
            size_y,
            size_z,
        })
    }

    /// Cube dimensions as `(x, y, z)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    #[inline]
    fn entry(&self, x: usize, y: usize, z: usize) -> &[u8] {
        let offset = ((z * self.size_y + y) * self.size_x + x) * 4;
        &self.values[offset..offset + 4]
    }
}

/// Builds a cube that maps every color to itself.
pub fn identity_cube(size_x: usize, size_y: usize, size_z: usize) -> Vec<u8> {
    let ramp = |i: usize, n: usize| ((i * 255 + (n - 1) / 2) / (n - 1)) as u8;
    let mut values = Vec::with_capacity(size_x * size_y * size_z * 4);
    for z in 0..size_z {
        for y in 0..size_y {
            for x in 0..size_x {
                values.extend_from_slice(&[ramp(x, size_x), ramp(y, size_y), ramp(z, size_z), 255]);
            }
        }
    }
    values
}

/// Cell index and 15-bit fractional weight of `v` along one axis.
#[inline]
fn axis(v: u8, size: usize) -> (usize, usize, u32) {
    let dims = size - 1;
    let coord_mul = (dims as f32 * ONE as f32 / 255.0) as u32;
    let base = v as u32 * coord_mul;
    let lo = (base >> 15) as usize;
    (lo, (lo + 1).min(dims), base & (ONE - 1))
}

/// Looks up one RGBA pixel.
pub fn lut3d_pixel(cube: &Cube<'_>, px: [u8; 4]) -> [u8; 4] {
    let (x0, x1, wx) = axis(px[0], cube.size_x);
    let (y0, y1, wy) = axis(px[1], cube.size_y);
    let (z0, z1, wz) = axis(px[2], cube.size_z);
    let (ix, iy, iz) = (ONE - wx, ONE - wy, ONE - wz);

    let corners = [
        cube.entry(x0, y0, z0),
        cube.entry(x1, y0, z0),
        cube.entry(x0, y1, z0),
        cube.entry(x1, y1, z0),
        cube.entry(x0, y0, z1),
        cube.entry(x1, y0, z1),
        cube.entry(x0, y1, z1),
        cube.entry(x1, y1, z1),
    ];

    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = |i: usize| corners[i][c] as u32;
        // 8.15 products reduced to 8.8 so the later stages stay in u32.
        let y0z0 = (v(0) * ix + v(1) * wx) >> 7;
        let y1z0 = (v(2) * ix + v(3) * wx) >> 7;
        let y0z1 = (v(4) * ix + v(5) * wx) >> 7;
        let y1z1 = (v(6) * ix + v(7) * wx) >> 7;
        let lo = (y0z0 * iy + y1z0 * wy) >> 15;
        let hi = (y0z1 * iy + y1z1 * wy) >> 15;
        let value = (lo * iz + hi * wz) >> 15;
        out[c] = ((value + 0x7f) >> 8).min(255) as u8;
    }
    out[3] = px[3];
    out
}

/// Maps the RGBA pixels of `tile` through `cube`.
pub fn lut3d_tile(
    input: &[u8],
    out: &mut RowBand<'_, u8>,
    size_x: usize,
    cube: &Cube<'_>,
    tile: Region,
) {
    let row_len = size_x * 4;
    let (x0, x1) = (tile.start_x * 4, tile.end_x * 4);
    for y in tile.start_y..tile.end_y {
        let src_row = &input[y * row_len + x0..y * row_len + x1];
        let dst_row = &mut out.row_mut(y)[x0..x1];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            d.copy_from_slice(&lut3d_pixel(cube, [s[0], s[1], s[2], s[3]]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_validation() {
        let values = vec![0u8; 2 * 2 * 2 * 4];
        assert!(Cube::new(&values, 2, 2, 2).is_ok());
        assert!(Cube::new(&values, 1, 2, 2).unwrap_err().is_invalid_argument());
        assert!(Cube::new(&values, 2, 257, 2).is_err());
        assert!(Cube::new(&values[..31], 2, 2, 2).is_err());
    }

    #[test]
    fn test_identity_cube_corners() {
        let values = identity_cube(3, 4, 5);
        assert_eq!(values.len(), 3 * 4 * 5 * 4);
        assert_eq!(&values[..4], &[0, 0, 0, 255]);
        assert_eq!(&values[values.len() - 4..], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_identity_within_one() {
        let values = identity_cube(17, 17, 17);
        let cube = Cube::new(&values, 17, 17, 17).unwrap();
        for v in (0..=255u8).step_by(3) {
            let out = lut3d_pixel(&cube, [v, 255 - v, v / 2, 7]);
            assert!(out[0].abs_diff(v) <= 1, "r {v} -> {}", out[0]);
            assert!(out[1].abs_diff(255 - v) <= 1);
            assert!(out[2].abs_diff(v / 2) <= 1);
            assert_eq!(out[3], 7);
        }
    }

    #[test]
    fn test_constant_cube() {
        let values: Vec<u8> = [9u8, 99, 199, 0].repeat(2 * 2 * 2);
        let cube = Cube::new(&values, 2, 2, 2).unwrap();
        assert_eq!(lut3d_pixel(&cube, [0, 0, 0, 1]), [9, 99, 199, 1]);
        assert_eq!(lut3d_pixel(&cube, [255, 128, 3, 2]), [9, 99, 199, 2]);
    }

    #[test]
    fn test_tile_respects_region() {
        let values = identity_cube(2, 2, 2);
        let cube = Cube::new(&values, 2, 2, 2).unwrap();
        let input = vec![0u8, 0, 0, 255, 0, 0, 0, 255];
        let mut out = vec![5u8; 8];
        let mut band = RowBand::new(&mut out, 0, 8);
        lut3d_tile(&input, &mut band, 2, &cube, Region::new(1, 2, 0, 1));
        assert_eq!(out, vec![5, 5, 5, 5, 0, 0, 0, 255]);
    }
}
