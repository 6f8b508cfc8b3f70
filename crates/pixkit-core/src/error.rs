//! Error types for pixkit operations.
//!
//! Every failure is a caller programming error detected while validating a
//! call, before any tile is dispatched and before any buffer is written.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{Error, Result};
//!
//! fn check_vector_size(vector_size: usize) -> Result<()> {
//!     if !(1..=4).contains(&vector_size) {
//!         return Err(Error::invalid_argument(
//!             "histogram",
//!             format!("vector size must be 1..=4, got {vector_size}"),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_vector_size(5).unwrap_err().is_invalid_argument());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by pixkit.
///
/// # Categories
///
/// - **Argument errors**: [`InvalidArgument`](Error::InvalidArgument)
/// - **Enum codes**: [`Unsupported`](Error::Unsupported)
/// - **Construction**: [`ThreadPool`](Error::ThreadPool)
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed dimensions, out-of-range region, wrong-sized coefficient
    /// arrays, short buffers, or a vector size the kernel does not support.
    #[error("{op}: invalid argument: {reason}")]
    InvalidArgument {
        /// Operation that rejected the call
        op: &'static str,
        /// What was wrong
        reason: String,
    },

    /// A blend-mode or YUV-format code that does not name a known variant.
    #[error("unsupported {what} code {code}")]
    Unsupported {
        /// Kind of enumeration ("blend mode", "yuv format")
        what: &'static str,
        /// Raw code received at the boundary
        code: i64,
    },

    /// The worker pool could not be built.
    ///
    /// No partially constructed pool is left behind.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(op: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            op,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Unsupported`] error.
    #[inline]
    pub fn unsupported(what: &'static str, code: impl Into<i64>) -> Self {
        Self::Unsupported {
            what,
            code: code.into(),
        }
    }

    /// Creates an [`Error::ThreadPool`] error.
    #[inline]
    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    /// Returns `true` if this is an argument validation error.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` if this is an unknown enum code.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = Error::invalid_argument("blur", "radius must be 1..=25, got 30");
        let msg = err.to_string();
        assert!(msg.starts_with("blur"));
        assert!(msg.contains("30"));
        assert!(err.is_invalid_argument());
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_message() {
        let err = Error::unsupported("yuv format", 7i32);
        assert!(err.to_string().contains("yuv format"));
        assert!(err.to_string().contains('7'));
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_thread_pool_error() {
        let err = Error::thread_pool("out of memory");
        assert!(err.to_string().contains("out of memory"));
        assert!(!err.is_invalid_argument());
    }
}
