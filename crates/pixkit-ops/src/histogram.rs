//! Histograms: the reducing kernels.
//!
//! Each tile returns its own partial count array; the caller merges the
//! partials with [`merge_partials`] after every tile has finished. Summation
//! is commutative and associative, so the merged result does not depend on
//! how the region was tiled or in which order tiles ran.
//!
//! # Layout
//!
//! - [`histogram_tile`]: `256 * vector_size` bins, interleaved as
//!   `bins[value * vector_size + channel]`
//! - [`histogram_dot_tile`]: 256 bins of the weighted channel sum

use pixkit_core::Region;

/// Bins per channel.
pub const BINS: usize = 256;

/// Rec.601 luma weights used when no dot coefficients are given.
pub const DEFAULT_DOT_COEFFICIENTS: [f32; 4] = [0.299, 0.587, 0.114, 0.0];

/// Counts channel values of the pixels in `tile`.
pub fn histogram_tile(input: &[u8], size_x: usize, vector_size: usize, tile: Region) -> Vec<i32> {
    let mut bins = vec![0i32; BINS * vector_size];
    let row_len = size_x * vector_size;
    for y in tile.start_y..tile.end_y {
        let row = &input
            [y * row_len + tile.start_x * vector_size..y * row_len + tile.end_x * vector_size];
        for px in row.chunks_exact(vector_size) {
            for (c, &v) in px.iter().enumerate() {
                bins[v as usize * vector_size + c] += 1;
            }
        }
    }
    bins
}

/// Converts dot coefficients into 8.8 fixed-point weights.
///
/// Missing channels get weight zero.
pub fn quantize_coefficients(coefficients: &[f32]) -> [u32; 4] {
    std::array::from_fn(|c| {
        coefficients
            .get(c)
            .map_or(0, |&w| (w * 256.0 + 0.5) as u32)
    })
}

/// Counts `dot(pixel, weights)` of the pixels in `tile` into 256 bins.
///
/// `weights` comes from [`quantize_coefficients`].
pub fn histogram_dot_tile(
    input: &[u8],
    size_x: usize,
    vector_size: usize,
    weights: &[u32; 4],
    tile: Region,
) -> Vec<i32> {
    let mut bins = vec![0i32; BINS];
    let row_len = size_x * vector_size;
    for y in tile.start_y..tile.end_y {
        let row = &input
            [y * row_len + tile.start_x * vector_size..y * row_len + tile.end_x * vector_size];
        for px in row.chunks_exact(vector_size) {
            let t: u32 = px.iter().zip(weights).map(|(&v, &w)| v as u32 * w).sum();
            let bin = ((t + 0x7f) >> 8).min(BINS as u32 - 1);
            bins[bin as usize] += 1;
        }
    }
    bins
}

/// Overwrites `output` with the element-wise sum of `partials`.
pub fn merge_partials<I>(output: &mut [i32], partials: I)
where
    I: IntoIterator,
    I::Item: AsRef<[i32]>,
{
    output.fill(0);
    for partial in partials {
        for (o, &p) in output.iter_mut().zip(partial.as_ref()) {
            *o += p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_channel() {
        let input = vec![0u8, 255, 0, 7, 1, 7];
        let bins = histogram_tile(&input, 3, 2, Region::full(3, 1));
        assert_eq!(bins.len(), 512);
        assert_eq!(bins[0], 2);
        assert_eq!(bins[2], 1);
        assert_eq!(bins[255 * 2 + 1], 1);
        assert_eq!(bins[7 * 2 + 1], 2);
        assert_eq!(bins.iter().sum::<i32>(), 6);
    }

    #[test]
    fn test_region_only() {
        let input: Vec<u8> = (0..16).collect();
        let bins = histogram_tile(&input, 4, 1, Region::new(1, 3, 2, 4));
        let hits: Vec<_> = (0..BINS).filter(|&b| bins[b] > 0).collect();
        assert_eq!(hits, vec![9, 10, 13, 14]);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize_coefficients(&DEFAULT_DOT_COEFFICIENTS), [77, 150, 29, 0]);
        assert_eq!(quantize_coefficients(&[1.0]), [256, 0, 0, 0]);
    }

    #[test]
    fn test_dot_bins() {
        let w = quantize_coefficients(&[1.0]);
        let input = vec![0u8, 128, 255, 255];
        let bins = histogram_dot_tile(&input, 4, 1, &w, Region::full(4, 1));
        assert_eq!(bins[0], 1);
        assert_eq!(bins[128], 1);
        assert_eq!(bins[255], 2);
    }

    #[test]
    fn test_dot_saturates_top_bin() {
        let w = quantize_coefficients(&[0.26, 0.26, 0.24, 0.24]);
        let bins = histogram_dot_tile(&[255u8; 4], 1, 4, &w, Region::full(1, 1));
        assert_eq!(bins[255], 1);
    }

    #[test]
    fn test_merge_overwrites() {
        let mut out = vec![99i32; 3];
        merge_partials(&mut out, vec![vec![1, 2, 3], vec![10, 0, 1]]);
        assert_eq!(out, vec![11, 2, 4]);
    }
}
