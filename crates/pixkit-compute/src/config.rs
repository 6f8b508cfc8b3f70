//! Toolkit configuration.
//!
//! # Environment
//!
//! [`ToolkitConfig::from_env`] reads:
//!
//! - `PIXKIT_THREADS` - worker count (`0` = one per available core)
//!
//! Values that do not parse are ignored.

use std::env;

/// Default worker thread name prefix.
pub const DEFAULT_THREAD_NAME: &str = "pixkit-worker";

/// How a [`Toolkit`](crate::Toolkit) builds its worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// Worker count; 0 resolves to the number of available cores.
    pub threads: usize,
    /// Prefix for worker thread names (`<name>-<index>`).
    pub thread_name: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Sets the worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the worker thread name prefix.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(threads) = env_threads() {
            config.threads = threads;
        }
        config
    }
}

fn env_threads() -> Option<usize> {
    parse_threads(env::var("PIXKIT_THREADS").ok().as_deref())
}

fn parse_threads(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolkitConfig::default();
        assert_eq!(config.threads, 0);
        assert_eq!(config.thread_name, "pixkit-worker");
    }

    #[test]
    fn test_builder() {
        let config = ToolkitConfig::default().with_threads(3).with_thread_name("blur");
        assert_eq!(config.threads, 3);
        assert_eq!(config.thread_name, "blur");
    }

    #[test]
    fn test_parse_threads() {
        assert_eq!(parse_threads(Some("4")), Some(4));
        assert_eq!(parse_threads(Some(" 6\n")), Some(6));
        assert_eq!(parse_threads(Some("0")), Some(0));
        assert_eq!(parse_threads(Some("many")), None);
        assert_eq!(parse_threads(Some("-2")), None);
        assert_eq!(parse_threads(Some("")), None);
        assert_eq!(parse_threads(None), None);
    }

    #[test]
    fn test_from_env_keeps_defaults_without_override() {
        let config = ToolkitConfig::from_env();
        assert_eq!(config.thread_name, DEFAULT_THREAD_NAME);
        if env::var_os("PIXKIT_THREADS").is_none() {
            assert_eq!(config, ToolkitConfig::default());
        }
    }
}
