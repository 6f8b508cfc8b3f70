//! YUV 4:2:0 to RGBA conversion.
//!
//! Two planar layouts are supported, identified by their Android
//! `ImageFormat` codes:
//!
//! ```text
//! NV21 (0x11)         YV12 (0x32315659)
//! +-----------+       +-----------+  stride_y = align16(size_x)
//! |     Y     |       |     Y     |
//! +-----------+       +-----------+
//! | V U V U.. |       |  U  |        stride_uv = align16(stride_y / 2)
//! +-----------+       +-----+
//!                     |  V  |
//!                     +-----+
//! ```
//!
//! Each 2x2 block of luma samples shares one U and one V sample. Conversion
//! uses the BT.601 video-range integer formula and sets alpha to 255.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::yuv::{yuv_to_rgba_pixel, YuvFormat};
//!
//! assert_eq!(YuvFormat::try_from(0x11).unwrap(), YuvFormat::Nv21);
//! assert_eq!(yuv_to_rgba_pixel(235, 128, 128), [255, 255, 255, 255]);
//! ```

use pixkit_core::{Error, Region, RowBand};

/// Planar YUV layouts accepted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum YuvFormat {
    /// Y plane followed by an interleaved V/U plane.
    Nv21 = 0x11,
    /// 16-aligned Y plane followed by U and V planes.
    Yv12 = 0x3231_5659,
}

impl YuvFormat {
    /// Stable integer code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Plane strides and offsets for a `size_x` x `size_y` image, or `None`
    /// when the planes do not fit in `usize`.
    pub fn layout(self, size_x: usize, size_y: usize) -> Option<YuvLayout> {
        match self {
            Self::Nv21 => {
                let offset_v = size_x.checked_mul(size_y)?;
                Some(YuvLayout {
                    stride_y: size_x,
                    stride_uv: size_x,
                    offset_u: offset_v.checked_add(1)?,
                    offset_v,
                    chroma_step: 2,
                })
            }
            Self::Yv12 => {
                let stride_y = align16(size_x)?;
                let stride_uv = align16(stride_y / 2)?;
                let offset_u = stride_y.checked_mul(size_y)?;
                let plane_uv = stride_uv.checked_mul(size_y / 2)?;
                Some(YuvLayout {
                    stride_y,
                    stride_uv,
                    offset_u,
                    offset_v: offset_u.checked_add(plane_uv)?,
                    chroma_step: 1,
                })
            }
        }
    }

    /// Bytes an input buffer needs for a `size_x` x `size_y` image, or `None`
    /// on overflow.
    pub fn buffer_len(self, size_x: usize, size_y: usize) -> Option<usize> {
        let luma = size_x.checked_mul(size_y)?;
        match self {
            Self::Nv21 => luma.checked_add(luma / 2),
            Self::Yv12 => {
                let layout = self.layout(size_x, size_y)?;
                layout
                    .offset_v
                    .checked_add(layout.stride_uv.checked_mul(size_y / 2)?)
            }
        }
    }
}

impl TryFrom<i32> for YuvFormat {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0x11 => Ok(Self::Nv21),
            0x3231_5659 => Ok(Self::Yv12),
            _ => Err(Error::unsupported("yuv format", code)),
        }
    }
}

/// Where the planes of a YUV image live in its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YuvLayout {
    /// Bytes per luma row.
    pub stride_y: usize,
    /// Bytes per chroma row.
    pub stride_uv: usize,
    /// Offset of the first U sample.
    pub offset_u: usize,
    /// Offset of the first V sample.
    pub offset_v: usize,
    /// Bytes between horizontally adjacent chroma samples.
    pub chroma_step: usize,
}

#[inline]
fn align16(v: usize) -> Option<usize> {
    Some(v.checked_add(15)? & !15)
}

/// Converts one BT.601 video-range sample to RGBA.
#[inline]
pub fn yuv_to_rgba_pixel(y: u8, u: u8, v: u8) -> [u8; 4] {
    let y = (y as i32 - 16) * 298;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + 409 * v + 128) >> 8;
    let g = (y - 100 * u - 208 * v + 128) >> 8;
    let b = (y + 516 * u + 128) >> 8;
    [r.clamp(0, 255) as u8, g.clamp(0, 255) as u8, b.clamp(0, 255) as u8, 255]
}

/// Converts the pixels of `tile` into RGBA rows of `out`.
pub fn yuv_tile(input: &[u8], out: &mut RowBand<'_, u8>, layout: &YuvLayout, tile: Region) {
    for y in tile.start_y..tile.end_y {
        let row_y = y * layout.stride_y;
        let row_u = layout.offset_u + (y / 2) * layout.stride_uv;
        let row_v = layout.offset_v + (y / 2) * layout.stride_uv;
        let dst_row = out.row_mut(y);
        for x in tile.start_x..tile.end_x {
            let cx = (x / 2) * layout.chroma_step;
            let px = yuv_to_rgba_pixel(input[row_y + x], input[row_u + cx], input[row_v + cx]);
            dst_row[x * 4..x * 4 + 4].copy_from_slice(&px);
        }
    }
}
