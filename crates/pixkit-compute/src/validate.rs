//! Argument checks shared by the toolkit methods.
//!
//! Every check runs before any tile is dispatched, so a rejected call never
//! writes to the caller's buffers.

use pixkit_core::{Error, Result};

/// Rejects zero dimensions and returns `size_x * size_y * vector_size`.
pub(crate) fn element_count(
    op: &'static str,
    size_x: usize,
    size_y: usize,
    vector_size: usize,
) -> Result<usize> {
    if size_x == 0 || size_y == 0 {
        return Err(Error::invalid_argument(
            op,
            format!("dimensions must be non-zero, got {size_x}x{size_y}"),
        ));
    }
    size_x
        .checked_mul(size_y)
        .and_then(|n| n.checked_mul(vector_size))
        .ok_or_else(|| {
            Error::invalid_argument(
                op,
                format!("{size_x}x{size_y}x{vector_size} overflows the address space"),
            )
        })
}

/// Rejects vector sizes not in `allowed`.
pub(crate) fn vector_size(op: &'static str, vector_size: usize, allowed: &[usize]) -> Result<()> {
    if allowed.contains(&vector_size) {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            op,
            format!("vector size must be one of {allowed:?}, got {vector_size}"),
        ))
    }
}

/// Rejects buffers shorter than `needed` elements.
pub(crate) fn buffer_len(op: &'static str, name: &str, len: usize, needed: usize) -> Result<()> {
    if len < needed {
        return Err(Error::invalid_argument(
            op,
            format!("{name} holds {len} elements, needs {needed}"),
        ));
    }
    Ok(())
}

/// Rejects parameter arrays whose length is not exactly `expected`.
pub(crate) fn exact_len(op: &'static str, name: &str, len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(Error::invalid_argument(
            op,
            format!("{name} must have {expected} entries, got {len}"),
        ));
    }
    Ok(())
}

/// Every vector size a generic kernel accepts.
pub(crate) const ANY_VECTOR_SIZE: &[usize] = &[1, 2, 3, 4];
