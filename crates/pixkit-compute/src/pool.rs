//! Fixed-size worker pool.
//!
//! Each [`Toolkit`](crate::Toolkit) owns one [`WorkerPool`]. The worker count
//! is resolved once at construction and never changes; dropping the pool
//! shuts its workers down.

use pixkit_core::{Error, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use tracing::debug;

/// A rayon thread pool with a known worker count.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Builds a pool of `threads` workers named `<name>-<index>`.
    ///
    /// `threads == 0` means one worker per available core.
    pub fn new(threads: usize, name: &str) -> Result<Self> {
        let threads = resolve_threads(threads);
        let prefix = name.to_string();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |index| format!("{prefix}-{index}"))
            .build()
            .map_err(|e| Error::thread_pool(e.to_string()))?;
        debug!(threads, name, "worker pool started");
        Ok(Self { pool, threads })
    }

    /// Number of workers.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// The underlying rayon pool.
    #[inline]
    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }
}

/// Maps a requested worker count to an actual one (at least 1).
pub fn resolve_threads(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
