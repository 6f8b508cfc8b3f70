//! Sample (channel element) formats.
//!
//! Kernels that accept either 8-bit or floating-point buffers are generic
//! over [`PixelFormat`]. Arithmetic happens in normalized `f32`: integers map
//! to `[0.0, 1.0]`, floats are used as-is.
//!
//! | Type | Range | Conversion back |
//! |------|-------|-----------------|
//! | `u8` | 0-255 | clamp to [0, 1], scale, round to nearest |
//! | `f32` | any | unchanged |

/// Channel element type of an image buffer.
///
/// # Example
///
/// ```
/// use pixkit_core::PixelFormat;
///
/// let v: u8 = 128;
/// assert!((v.to_f32() - 0.502).abs() < 0.01);
/// assert_eq!(<u8 as PixelFormat>::from_f32(1.7), 255);
/// assert_eq!(<f32 as PixelFormat>::from_f32(1.7), 1.7);
/// ```
pub trait PixelFormat: Copy + Default + Send + Sync + PartialOrd + 'static {
    /// Convert to f32, normalizing integers to [0.0, 1.0].
    fn to_f32(self) -> f32;

    /// Convert from normalized f32. Integers clamp and round to nearest.
    fn from_f32(v: f32) -> Self;

    /// Zero value.
    fn zero() -> Self;
}

impl PixelFormat for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}
