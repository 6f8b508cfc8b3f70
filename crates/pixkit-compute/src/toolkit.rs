//! The toolkit facade: one method per kernel.
//!
//! Every method follows the same steps:
//!
//! 1. validate dimensions, vector size, buffer lengths, parameters and region
//! 2. dispatch tiles on the instance's worker pool
//! 3. for reducing kernels, merge the partial results into the output
//!
//! Nothing is written before validation succeeds, and every method returns
//! only after all of its tiles have finished.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_compute::Toolkit;
//! use pixkit_core::Region;
//!
//! let toolkit = Toolkit::new(4)?;
//! let input = vec![128u8; 64 * 32 * 4];
//! let mut output = vec![0u8; input.len()];
//!
//! toolkit.blur(&input, &mut output, 64, 32, 4, 5, None)?;
//! assert!(output.iter().all(|&v| v == 128));
//!
//! let mut bins = vec![0i32; 256];
//! toolkit.histogram_dot(&input, &mut bins, 64, 32, 4, None, Some(Region::new(0, 8, 0, 8)))?;
//! assert_eq!(bins.iter().sum::<i32>(), 64);
//! # Ok::<(), pixkit_core::Error>(())
//! ```
//!
//! # Threading
//!
//! Methods take `&self` and the type is `Send + Sync`, but calls on one
//! instance are meant to be issued one at a time: each call already uses
//! every worker of the pool.

use crate::config::ToolkitConfig;
use crate::pool::WorkerPool;
use crate::scheduler::{for_each_band, map_tiles};
use crate::validate::{self, ANY_VECTOR_SIZE};
use pixkit_core::{Error, PixelFormat, Region, Result};
use pixkit_ops::blend::{blend_tile, BlendMode};
use pixkit_ops::blur::{blur_tile, gaussian_weights, BlurConfig, MAX_RADIUS};
use pixkit_ops::color_matrix::color_matrix_tile;
use pixkit_ops::convolve::{convolve_tile, KernelSize};
use pixkit_ops::histogram::{
    histogram_dot_tile, histogram_tile, merge_partials, quantize_coefficients, BINS,
    DEFAULT_DOT_COEFFICIENTS,
};
use pixkit_ops::lut::{lut_tile, LutTables};
use pixkit_ops::lut3d::{lut3d_tile, Cube};
use pixkit_ops::resize::resize_tile;
use pixkit_ops::yuv::{yuv_tile, YuvFormat};
use tracing::debug;

/// Runs pixel kernels on a private worker pool.
///
/// Dropping the toolkit shuts the pool down.
#[derive(Debug)]
pub struct Toolkit {
    pool: WorkerPool,
}

impl Toolkit {
    /// Creates a toolkit with `threads` workers (0 = one per core).
    pub fn new(threads: usize) -> Result<Self> {
        Self::with_config(ToolkitConfig::default().with_threads(threads))
    }

    /// Creates a toolkit from a full configuration.
    pub fn with_config(config: ToolkitConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.threads, &config.thread_name)?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    /// Blends `source` into `dest` in place. Both are RGBA images.
    pub fn blend(
        &self,
        mode: BlendMode,
        source: &[u8],
        dest: &mut [u8],
        size_x: usize,
        size_y: usize,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "blend";
        let len = validate::element_count(OP, size_x, size_y, 4)?;
        validate::buffer_len(OP, "source", source.len(), len)?;
        validate::buffer_len(OP, "dest", dest.len(), len)?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(?mode, size_x, size_y, ?region, "blend");

        if mode == BlendMode::Dst {
            return Ok(());
        }
        for_each_band(&self.pool, region, &mut dest[..len], size_x * 4, |tile, band| {
            blend_tile(mode, source, band, size_x, tile)
        });
        Ok(())
    }

    /// Gaussian blur of radius `1..=25`; `vector_size` must be 1 or 4.
    #[allow(clippy::too_many_arguments)]
    pub fn blur(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        vector_size: usize,
        radius: usize,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "blur";
        let len = validate::element_count(OP, size_x, size_y, vector_size)?;
        validate::vector_size(OP, vector_size, &[1, 4])?;
        if !(1..=MAX_RADIUS).contains(&radius) {
            return Err(Error::invalid_argument(
                OP,
                format!("radius must be 1..={MAX_RADIUS}, got {radius}"),
            ));
        }
        validate::buffer_len(OP, "input", input.len(), len)?;
        validate::buffer_len(OP, "output", output.len(), len)?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, vector_size, radius, ?region, "blur");

        let weights = gaussian_weights(radius);
        self.blur_pass(
            &input[..len],
            &mut output[..len],
            size_x,
            size_y,
            vector_size,
            &weights,
            region,
        );
        Ok(())
    }

    /// Applies the blur `config.repeat` times.
    ///
    /// The config is [coerced](BlurConfig::coerced) first. When it is a
    /// no-op the region is copied from `input` unchanged. Intermediate
    /// passes cover the whole image; only the last pass is limited to
    /// `region`.
    #[allow(clippy::too_many_arguments)]
    pub fn blur_repeated(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        vector_size: usize,
        config: BlurConfig,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "blur";
        let config = config.coerced();
        let len = validate::element_count(OP, size_x, size_y, vector_size)?;
        validate::vector_size(OP, vector_size, &[1, 4])?;
        validate::buffer_len(OP, "input", input.len(), len)?;
        validate::buffer_len(OP, "output", output.len(), len)?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, vector_size, ?config, ?region, "blur_repeated");

        let (input, output) = (&input[..len], &mut output[..len]);
        if config.is_noop() {
            let row_len = size_x * vector_size;
            let (x0, x1) = (region.start_x * vector_size, region.end_x * vector_size);
            for y in region.start_y..region.end_y {
                let row = y * row_len;
                output[row + x0..row + x1].copy_from_slice(&input[row + x0..row + x1]);
            }
            return Ok(());
        }

        let weights = gaussian_weights(config.radius);
        let full = Region::full(size_x, size_y);
        let mut src = input.to_vec();
        let mut dst = vec![0u8; len];
        for _ in 1..config.repeat {
            self.blur_pass(&src, &mut dst, size_x, size_y, vector_size, &weights, full);
            std::mem::swap(&mut src, &mut dst);
        }
        self.blur_pass(&src, output, size_x, size_y, vector_size, &weights, region);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn blur_pass(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        vector_size: usize,
        weights: &[f32],
        region: Region,
    ) {
        for_each_band(&self.pool, region, output, size_x * vector_size, |tile, band| {
            blur_tile(input, band, size_x, size_y, vector_size, weights, tile)
        });
    }

    /// Per-pixel `out = matrix * in + add_vector`.
    ///
    /// `matrix` is row-major with `output_vector_size` rows and
    /// `input_vector_size` columns. `add_vector` has `output_vector_size`
    /// entries in normalized units; `None` adds nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn color_matrix<T: PixelFormat>(
        &self,
        input: &[T],
        output: &mut [T],
        input_vector_size: usize,
        output_vector_size: usize,
        size_x: usize,
        size_y: usize,
        matrix: &[f32],
        add_vector: Option<&[f32]>,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "color_matrix";
        validate::vector_size(OP, input_vector_size, ANY_VECTOR_SIZE)?;
        validate::vector_size(OP, output_vector_size, ANY_VECTOR_SIZE)?;
        let in_len = validate::element_count(OP, size_x, size_y, input_vector_size)?;
        let out_len = validate::element_count(OP, size_x, size_y, output_vector_size)?;
        validate::buffer_len(OP, "input", input.len(), in_len)?;
        validate::buffer_len(OP, "output", output.len(), out_len)?;
        validate::exact_len(OP, "matrix", matrix.len(), output_vector_size * input_vector_size)?;
        let zeros = [0.0f32; 4];
        let add_vector = match add_vector {
            Some(add) => {
                validate::exact_len(OP, "add vector", add.len(), output_vector_size)?;
                add
            }
            None => &zeros[..output_vector_size],
        };
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, input_vector_size, output_vector_size, ?region, "color_matrix");

        let input = &input[..in_len];
        for_each_band(
            &self.pool,
            region,
            &mut output[..out_len],
            size_x * output_vector_size,
            |tile, band| {
                color_matrix_tile(
                    input,
                    band,
                    input_vector_size,
                    output_vector_size,
                    size_x,
                    matrix,
                    add_vector,
                    tile,
                )
            },
        );
        Ok(())
    }

    /// 3x3 convolution with 9 coefficients, clamped at the edges.
    #[allow(clippy::too_many_arguments)]
    pub fn convolve3x3<T: PixelFormat>(
        &self,
        input: &[T],
        output: &mut [T],
        vector_size: usize,
        size_x: usize,
        size_y: usize,
        coefficients: &[f32],
        region: Option<Region>,
    ) -> Result<()> {
        self.convolve(
            "convolve3x3",
            KernelSize::Three,
            input,
            output,
            vector_size,
            size_x,
            size_y,
            coefficients,
            region,
        )
    }

    /// 5x5 convolution with 25 coefficients, clamped at the edges.
    #[allow(clippy::too_many_arguments)]
    pub fn convolve5x5<T: PixelFormat>(
        &self,
        input: &[T],
        output: &mut [T],
        vector_size: usize,
        size_x: usize,
        size_y: usize,
        coefficients: &[f32],
        region: Option<Region>,
    ) -> Result<()> {
        self.convolve(
            "convolve5x5",
            KernelSize::Five,
            input,
            output,
            vector_size,
            size_x,
            size_y,
            coefficients,
            region,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn convolve<T: PixelFormat>(
        &self,
        op: &'static str,
        kernel: KernelSize,
        input: &[T],
        output: &mut [T],
        vector_size: usize,
        size_x: usize,
        size_y: usize,
        coefficients: &[f32],
        region: Option<Region>,
    ) -> Result<()> {
        validate::vector_size(op, vector_size, ANY_VECTOR_SIZE)?;
        let len = validate::element_count(op, size_x, size_y, vector_size)?;
        validate::buffer_len(op, "input", input.len(), len)?;
        validate::buffer_len(op, "output", output.len(), len)?;
        validate::exact_len(op, "coefficients", coefficients.len(), kernel.coefficient_count())?;
        let region = Region::resolve(op, region, size_x, size_y)?;
        debug!(op, size_x, size_y, vector_size, ?region, "convolve");

        let input = &input[..len];
        for_each_band(&self.pool, region, &mut output[..len], size_x * vector_size, |tile, band| {
            convolve_tile(input, band, vector_size, size_x, size_y, kernel, coefficients, tile)
        });
        Ok(())
    }

    /// Per-channel histogram into `256 * vector_size` bins.
    ///
    /// Bins are interleaved: `output[value * vector_size + channel]`. The
    /// first `256 * vector_size` entries of `output` are overwritten.
    pub fn histogram(
        &self,
        input: &[u8],
        output: &mut [i32],
        size_x: usize,
        size_y: usize,
        vector_size: usize,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "histogram";
        validate::vector_size(OP, vector_size, ANY_VECTOR_SIZE)?;
        let len = validate::element_count(OP, size_x, size_y, vector_size)?;
        validate::buffer_len(OP, "input", input.len(), len)?;
        let bins = BINS * vector_size;
        validate::buffer_len(OP, "output", output.len(), bins)?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, vector_size, ?region, "histogram");

        let partials = map_tiles(&self.pool, region, |tile| {
            histogram_tile(input, size_x, vector_size, tile)
        });
        merge_partials(&mut output[..bins], &partials);
        Ok(())
    }

    /// Histogram of the weighted channel sum into 256 bins.
    ///
    /// `coefficients` has `vector_size` non-negative entries summing to at
    /// most 1; `None` uses Rec.601 luma weights. The first 256 entries of
    /// `output` are overwritten.
    #[allow(clippy::too_many_arguments)]
    pub fn histogram_dot(
        &self,
        input: &[u8],
        output: &mut [i32],
        size_x: usize,
        size_y: usize,
        vector_size: usize,
        coefficients: Option<&[f32]>,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "histogram_dot";
        validate::vector_size(OP, vector_size, ANY_VECTOR_SIZE)?;
        let len = validate::element_count(OP, size_x, size_y, vector_size)?;
        validate::buffer_len(OP, "input", input.len(), len)?;
        validate::buffer_len(OP, "output", output.len(), BINS)?;
        let coefficients = match coefficients {
            Some(c) => {
                validate::exact_len(OP, "coefficients", c.len(), vector_size)?;
                check_dot_coefficients(c)?;
                c
            }
            None => &DEFAULT_DOT_COEFFICIENTS[..vector_size],
        };
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, vector_size, ?coefficients, ?region, "histogram_dot");

        let weights = quantize_coefficients(coefficients);
        let partials = map_tiles(&self.pool, region, |tile| {
            histogram_dot_tile(input, size_x, vector_size, &weights, tile)
        });
        merge_partials(&mut output[..BINS], &partials);
        Ok(())
    }

    /// Maps each RGBA channel through its lookup table.
    pub fn lut(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        tables: &LutTables<'_>,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "lut";
        let len = validate::element_count(OP, size_x, size_y, 4)?;
        validate::buffer_len(OP, "input", input.len(), len)?;
        validate::buffer_len(OP, "output", output.len(), len)?;
        let tables = tables.resolve()?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, ?region, "lut");

        for_each_band(&self.pool, region, &mut output[..len], size_x * 4, |tile, band| {
            lut_tile(input, band, size_x, &tables, tile)
        });
        Ok(())
    }

    /// Maps RGBA pixels through a 3D color cube. Alpha is copied.
    pub fn lut3d(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        cube: &Cube<'_>,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "lut3d";
        let len = validate::element_count(OP, size_x, size_y, 4)?;
        validate::buffer_len(OP, "input", input.len(), len)?;
        validate::buffer_len(OP, "output", output.len(), len)?;
        let region = Region::resolve(OP, region, size_x, size_y)?;
        debug!(size_x, size_y, cube = ?cube.dims(), ?region, "lut3d");

        for_each_band(&self.pool, region, &mut output[..len], size_x * 4, |tile, band| {
            lut3d_tile(input, band, size_x, cube, tile)
        });
        Ok(())
    }

    /// Bicubic resize. `region` is in output coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn resize<T: PixelFormat>(
        &self,
        input: &[T],
        output: &mut [T],
        input_size_x: usize,
        input_size_y: usize,
        vector_size: usize,
        output_size_x: usize,
        output_size_y: usize,
        region: Option<Region>,
    ) -> Result<()> {
        const OP: &str = "resize";
        validate::vector_size(OP, vector_size, ANY_VECTOR_SIZE)?;
        let in_len = validate::element_count(OP, input_size_x, input_size_y, vector_size)?;
        let out_len = validate::element_count(OP, output_size_x, output_size_y, vector_size)?;
        validate::buffer_len(OP, "input", input.len(), in_len)?;
        validate::buffer_len(OP, "output", output.len(), out_len)?;
        let region = Region::resolve(OP, region, output_size_x, output_size_y)?;
        debug!(
            input_size_x,
            input_size_y,
            output_size_x,
            output_size_y,
            vector_size,
            ?region,
            "resize"
        );

        let input = &input[..in_len];
        for_each_band(
            &self.pool,
            region,
            &mut output[..out_len],
            output_size_x * vector_size,
            |tile, band| {
                resize_tile(
                    input,
                    band,
                    vector_size,
                    input_size_x,
                    input_size_y,
                    output_size_x,
                    output_size_y,
                    tile,
                )
            },
        );
        Ok(())
    }

    /// Converts an NV21 or YV12 image to RGBA. Dimensions must be even.
    pub fn yuv_to_rgb(
        &self,
        input: &[u8],
        output: &mut [u8],
        size_x: usize,
        size_y: usize,
        format: YuvFormat,
    ) -> Result<()> {
        const OP: &str = "yuv_to_rgb";
        let len = validate::element_count(OP, size_x, size_y, 4)?;
        if size_x % 2 != 0 || size_y % 2 != 0 {
            return Err(Error::invalid_argument(
                OP,
                format!("dimensions must be even, got {size_x}x{size_y}"),
            ));
        }
        let (layout, in_len) = format
            .layout(size_x, size_y)
            .zip(format.buffer_len(size_x, size_y))
            .ok_or_else(|| {
                Error::invalid_argument(
                    OP,
                    format!("{format:?} planes for {size_x}x{size_y} overflow"),
                )
            })?;
        validate::buffer_len(OP, "input", input.len(), in_len)?;
        validate::buffer_len(OP, "output", output.len(), len)?;
        debug!(size_x, size_y, ?format, "yuv_to_rgb");

        for_each_band(
            &self.pool,
            Region::full(size_x, size_y),
            &mut output[..len],
            size_x * 4,
            |tile, band| yuv_tile(input, band, &layout, tile),
        );
        Ok(())
    }
}

fn check_dot_coefficients(coefficients: &[f32]) -> Result<()> {
    const OP: &str = "histogram_dot";
    if let Some((i, c)) = coefficients.iter().enumerate().find(|(_, c)| c.is_nan() || **c < 0.0) {
        return Err(Error::invalid_argument(
            OP,
            format!("coefficient {i} must be non-negative, got {c}"),
        ));
    }
    let sum: f32 = coefficients.iter().sum();
    if sum > 1.0 {
        return Err(Error::invalid_argument(
            OP,
            format!("coefficients must sum to at most 1, got {sum}"),
        ));
    }
    Ok(())
}
