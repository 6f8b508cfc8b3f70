//! # pixkit-compute
//!
//! Parallel execution of pixkit kernels.
//!
//! # Architecture
//!
//! ```text
//! Toolkit (validation, one method per kernel)
//!     └── scheduler (split region into row bands, fork-join)
//!             └── WorkerPool (fixed-size rayon pool)
//!                     └── pixkit-ops kernels (one call per tile)
//! ```
//!
//! A [`Toolkit`] owns its pool. Every call validates its arguments, splits
//! the region into at most one band per worker, runs the kernel on each band
//! and returns once all of them are done. Results never depend on the
//! number of workers.
//!
//! # Example
//!
//! ```rust
//! use pixkit_compute::{Toolkit, ToolkitConfig};
//! use pixkit_ops::BlendMode;
//!
//! let toolkit = Toolkit::with_config(ToolkitConfig::default().with_threads(2))?;
//! let source = vec![255u8; 8 * 8 * 4];
//! let mut dest = vec![0u8; 8 * 8 * 4];
//! toolkit.blend(BlendMode::try_from(1)?, &source, &mut dest, 8, 8, None)?;
//! assert_eq!(dest, source);
//! # Ok::<(), pixkit_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod pool;
pub mod scheduler;
pub mod toolkit;
mod validate;

pub use config::ToolkitConfig;
pub use pool::WorkerPool;
pub use toolkit::Toolkit;
