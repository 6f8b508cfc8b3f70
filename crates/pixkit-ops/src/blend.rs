//! RGBA compositing, written into the destination in place.
//!
//! Provides the Porter-Duff operators plus a few arithmetic modes, all on
//! 8-bit premultiplied-style RGBA with integer `>> 8` normalization and
//! saturation.
//!
//! # Porter-Duff Operations
//!
//! - [`BlendMode::SrcOver`] - `S + D * (1 - Sa)`
//! - [`BlendMode::DstOver`] - `D + S * (1 - Da)`
//! - [`BlendMode::SrcIn`] / [`BlendMode::DstIn`] - masked by the other alpha
//! - [`BlendMode::SrcOut`] / [`BlendMode::DstOut`] - masked by the other's inverse alpha
//! - [`BlendMode::SrcAtop`] / [`BlendMode::DstAtop`]
//! - [`BlendMode::Xor`] - bitwise exclusive or of the channel bytes
//!
//! # Arithmetic Modes
//!
//! - [`BlendMode::Multiply`], [`BlendMode::Add`], [`BlendMode::Subtract`],
//!   [`BlendMode::Screen`], [`BlendMode::Difference`]
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::blend::{blend_pixel, BlendMode};
//!
//! let src = [255, 0, 0, 255]; // opaque red
//! let dst = [0, 0, 255, 255]; // opaque blue
//! assert_eq!(blend_pixel(BlendMode::SrcOver, src, dst), [255, 0, 0, 255]);
//! assert_eq!(blend_pixel(BlendMode::Dst, src, dst), dst);
//! ```

use pixkit_core::{Error, Region, RowBand};

/// Compositing mode for [`blend_tile`].
///
/// The discriminants are the stable integer codes accepted at the call
/// boundary through [`TryFrom<i32>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum BlendMode {
    /// Sets every channel to zero.
    Clear = 0,
    /// Copies the source.
    Src = 1,
    /// Keeps the destination.
    Dst = 2,
    /// Source over destination.
    #[default]
    SrcOver = 3,
    /// Destination over source.
    DstOver = 4,
    /// Source scaled by destination alpha.
    SrcIn = 5,
    /// Destination scaled by source alpha.
    DstIn = 6,
    /// Source scaled by inverse destination alpha.
    SrcOut = 7,
    /// Destination scaled by inverse source alpha.
    DstOut = 8,
    /// Source atop destination; keeps destination alpha.
    SrcAtop = 9,
    /// Destination atop source; keeps source alpha.
    DstAtop = 10,
    /// Bitwise exclusive or.
    Xor = 11,
    /// Channel product.
    Multiply = 12,
    /// Saturating sum ("plus").
    Add = 13,
    /// Saturating `dest - source`.
    Subtract = 14,
    /// Inverse multiply of the inverses.
    Screen = 15,
    /// Absolute difference.
    Difference = 16,
}

impl BlendMode {
    /// Every mode, in code order.
    pub const ALL: [BlendMode; 17] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcAtop,
        BlendMode::DstAtop,
        BlendMode::Xor,
        BlendMode::Multiply,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Screen,
        BlendMode::Difference,
    ];

    /// Integer code of this mode.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for BlendMode {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::unsupported("blend mode", code))
    }
}

/// Blends one source pixel into one destination pixel.
#[inline]
pub fn blend_pixel(mode: BlendMode, src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let s = src.map(i32::from);
    let d = dst.map(i32::from);
    let inv_sa = 255 - s[3];
    let inv_da = 255 - d[3];

    let out: [i32; 4] = match mode {
        BlendMode::Clear => [0; 4],
        BlendMode::Src => s,
        BlendMode::Dst => d,
        BlendMode::SrcOver => std::array::from_fn(|c| s[c] + ((d[c] * inv_sa) >> 8)),
        BlendMode::DstOver => std::array::from_fn(|c| d[c] + ((s[c] * inv_da) >> 8)),
        BlendMode::SrcIn => std::array::from_fn(|c| (s[c] * d[3]) >> 8),
        BlendMode::DstIn => std::array::from_fn(|c| (d[c] * s[3]) >> 8),
        BlendMode::SrcOut => std::array::from_fn(|c| (s[c] * inv_da) >> 8),
        BlendMode::DstOut => std::array::from_fn(|c| (d[c] * inv_sa) >> 8),
        BlendMode::SrcAtop => {
            let mut px: [i32; 4] = std::array::from_fn(|c| (s[c] * d[3] + d[c] * inv_sa) >> 8);
            px[3] = d[3];
            px
        }
        BlendMode::DstAtop => {
            let mut px: [i32; 4] = std::array::from_fn(|c| (d[c] * s[3] + s[c] * inv_da) >> 8);
            px[3] = s[3];
            px
        }
        BlendMode::Xor => std::array::from_fn(|c| s[c] ^ d[c]),
        BlendMode::Multiply => std::array::from_fn(|c| (s[c] * d[c]) >> 8),
        BlendMode::Add => std::array::from_fn(|c| s[c] + d[c]),
        BlendMode::Subtract => std::array::from_fn(|c| d[c] - s[c]),
        BlendMode::Screen => std::array::from_fn(|c| s[c] + d[c] - ((s[c] * d[c]) >> 8)),
        BlendMode::Difference => std::array::from_fn(|c| (s[c] - d[c]).abs()),
    };

    out.map(|v| v.clamp(0, 255) as u8)
}

/// Blends `source` into the rows of `dest` covered by `tile`.
///
/// Both buffers are RGBA images `size_x` pixels wide; `dest` is the band
/// of the destination image owning the tile's rows. Only columns
/// `[tile.start_x, tile.end_x)` are written.
pub fn blend_tile(
    mode: BlendMode,
    source: &[u8],
    dest: &mut RowBand<'_, u8>,
    size_x: usize,
    tile: Region,
) {
    if mode == BlendMode::Dst {
        return;
    }
    let row_len = size_x * 4;
    let (x0, x1) = (tile.start_x * 4, tile.end_x * 4);

    for y in tile.start_y..tile.end_y {
        let src_row = &source[y * row_len + x0..y * row_len + x1];
        let dst_row = &mut dest.row_mut(y)[x0..x1];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let px = blend_pixel(mode, [s[0], s[1], s[2], s[3]], [d[0], d[1], d[2], d[3]]);
            d.copy_from_slice(&px);
        }
    }
}
