//! Per-channel 256-entry lookup tables on RGBA images.
//!
//! Each of the four channels is mapped through its own table; a missing
//! table leaves that channel unchanged.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::lut::LutTables;
//!
//! let invert: Vec<u8> = (0..=255u8).rev().collect();
//! let tables = LutTables::new().with_red(&invert);
//! let resolved = tables.resolve().unwrap();
//! assert_eq!(resolved[0][0], 255);
//! assert_eq!(resolved[1][0], 0); // green is identity
//! ```

use pixkit_core::{Error, Region, Result, RowBand};

/// Entries per table.
pub const TABLE_LEN: usize = 256;

/// Borrowed lookup tables for R, G, B and A.
#[derive(Debug, Clone, Copy, Default)]
pub struct LutTables<'a> {
    /// Red table, identity when `None`.
    pub red: Option<&'a [u8]>,
    /// Green table, identity when `None`.
    pub green: Option<&'a [u8]>,
    /// Blue table, identity when `None`.
    pub blue: Option<&'a [u8]>,
    /// Alpha table, identity when `None`.
    pub alpha: Option<&'a [u8]>,
}

impl<'a> LutTables<'a> {
    /// All channels identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the red table.
    pub fn with_red(mut self, table: &'a [u8]) -> Self {
        self.red = Some(table);
        self
    }

    /// Sets the green table.
    pub fn with_green(mut self, table: &'a [u8]) -> Self {
        self.green = Some(table);
        self
    }

    /// Sets the blue table.
    pub fn with_blue(mut self, table: &'a [u8]) -> Self {
        self.blue = Some(table);
        self
    }

    /// Sets the alpha table.
    pub fn with_alpha(mut self, table: &'a [u8]) -> Self {
        self.alpha = Some(table);
        self
    }

    /// Copies the tables into fixed arrays, filling gaps with identity.
    ///
    /// Fails with `InvalidArgument` if a table does not have exactly
    /// [`TABLE_LEN`] entries.
    pub fn resolve(&self) -> Result<[[u8; TABLE_LEN]; 4]> {
        let mut out = [identity_table(); 4];
        let channels = [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ];
        for (dst, (name, table)) in out.iter_mut().zip(channels) {
            if let Some(table) = table {
                *dst = table.try_into().map_err(|_| {
                    Error::invalid_argument(
                        "lut",
                        format!("{name} table must have {TABLE_LEN} entries, got {}", table.len()),
                    )
                })?;
            }
        }
        Ok(out)
    }
}

/// The table mapping every value to itself.
pub fn identity_table() -> [u8; TABLE_LEN] {
    std::array::from_fn(|i| i as u8)
}

/// Maps the RGBA pixels of `tile` through `tables`.
pub fn lut_tile(
    input: &[u8],
    out: &mut RowBand<'_, u8>,
    size_x: usize,
    tables: &[[u8; TABLE_LEN]; 4],
    tile: Region,
) {
    let row_len = size_x * 4;
    let (x0, x1) = (tile.start_x * 4, tile.end_x * 4);
    for y in tile.start_y..tile.end_y {
        let src_row = &input[y * row_len + x0..y * row_len + x1];
        let dst_row = &mut out.row_mut(y)[x0..x1];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            for c in 0..4 {
                d[c] = tables[c][s[c] as usize];
            }
        }
    }
}
