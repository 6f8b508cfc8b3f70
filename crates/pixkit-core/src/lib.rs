//! # pixkit-core
//!
//! Core types shared by the pixkit kernels and the toolkit that runs them.
//!
//! - [`Region`] - Half-open rectangle restricting which pixels a kernel touches
//! - [`RowBand`] - Whole-row mutable view of an output buffer owned by one tile
//! - [`PixelFormat`] - Sample trait implemented for `u8` and `f32`
//! - [`Error`], [`Result`] - Validation errors
//!
//! ## Crate Structure
//!
//! ```text
//! pixkit-core (this crate)
//!    ^
//!    |
//!    +-- pixkit-ops (per-tile kernels)
//!    +-- pixkit-compute (worker pool, tile scheduler, Toolkit)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod band;
pub mod error;
pub mod region;
pub mod sample;

pub use band::RowBand;
pub use error::{Error, Result};
pub use region::Region;
pub use sample::PixelFormat;

