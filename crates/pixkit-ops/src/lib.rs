//! # pixkit-ops
//!
//! The kernel set: stateless pixel transforms that each process one tile.
//!
//! Every kernel takes the shared, read-only input buffer plus the tile
//! bounds, and either writes whole rows of a [`RowBand`](pixkit_core::RowBand)
//! or returns a partial accumulator. Kernels never validate their arguments;
//! the toolkit in `pixkit-compute` does that once per call before any tile
//! runs.
//!
//! # Modules
//!
//! - [`blend`] - Porter-Duff and arithmetic RGBA compositing (in place)
//! - [`blur`] - Separable Gaussian blur
//! - [`color_matrix`] - Affine per-pixel channel transform
//! - [`convolve`] - 3x3 and 5x5 convolution
//! - [`histogram`] - Per-channel and dot-product histograms (reducing)
//! - [`lut`] - Per-channel 256-entry lookup tables
//! - [`lut3d`] - 3D cube lookup with trilinear interpolation
//! - [`resize`] - Bicubic resampling
//! - [`yuv`] - NV21 / YV12 to RGBA conversion
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{Region, RowBand};
//! use pixkit_ops::blend::{blend_tile, BlendMode};
//!
//! let source = vec![200u8; 2 * 2 * 4];
//! let mut dest = vec![10u8; 2 * 2 * 4];
//! let region = Region::full(2, 2);
//! let mut band = RowBand::new(&mut dest, 0, 2 * 4);
//! blend_tile(BlendMode::Src, &source, &mut band, 2, region);
//! assert_eq!(dest, source);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blend;
pub mod blur;
pub mod color_matrix;
pub mod convolve;
pub mod histogram;
pub mod lut;
pub mod lut3d;
pub mod resize;
pub mod yuv;

pub use blend::BlendMode;
pub use blur::BlurConfig;
pub use lut::LutTables;
pub use lut3d::Cube;
pub use yuv::YuvFormat;

/// Clamps a signed coordinate into `[0, len)`.
#[inline]
pub(crate) fn clamp_index(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}
