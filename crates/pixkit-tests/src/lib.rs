//! Property tests for pixkit.
//!
//! These run every kernel through the [`Toolkit`](pixkit_compute::Toolkit)
//! and check properties that must hold regardless of how the work is split:
//! results independent of the worker count, identities, histogram totals
//! and region confinement.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pixkit_compute::Toolkit;
    use pixkit_core::Region;
    use pixkit_ops::color_matrix::{identity, RGB_TO_YUV};
    use pixkit_ops::convolve::IDENTITY_3X3;
    use pixkit_ops::lut3d::{identity_cube, Cube};
    use pixkit_ops::{BlendMode, LutTables, YuvFormat};

    const SX: usize = 37;
    const SY: usize = 23;

    /// Worker counts compared against the single-worker reference.
    const WORKERS: [usize; 3] = [2, 5, 64];

    fn noise(len: usize, seed: u32) -> Vec<u8> {
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }

    fn noise_f32(len: usize, seed: u32) -> Vec<f32> {
        noise(len, seed).into_iter().map(|v| v as f32 / 127.0 - 0.5).collect()
    }

    fn regions() -> [Option<Region>; 3] {
        [None, Some(Region::new(3, 30, 4, 19)), Some(Region::new(0, SX, 22, 23))]
    }

    /// Runs `op` on a single-worker toolkit and on each multi-worker one and
    /// asserts identical output.
    fn assert_worker_independent<T, F>(out_len: usize, fill: T, op: F)
    where
        T: Copy + PartialEq + std::fmt::Debug,
        F: Fn(&Toolkit, &mut [T]),
    {
        let reference = {
            let tk = Toolkit::new(1).unwrap();
            let mut out = vec![fill; out_len];
            op(&tk, &mut out);
            out
        };
        for workers in WORKERS {
            let tk = Toolkit::new(workers).unwrap();
            let mut out = vec![fill; out_len];
            op(&tk, &mut out);
            assert_eq!(out, reference, "{workers} workers");
        }
    }

    // ========================================================================
    // Worker-count independence
    // ========================================================================

    #[test]
    fn test_blend_worker_independent() {
        let source = noise(SX * SY * 4, 1);
        let dest = noise(SX * SY * 4, 2);
        for code in 0..17 {
            let mode = BlendMode::try_from(code).unwrap();
            for region in regions() {
                assert_worker_independent(dest.len(), 0u8, |tk, out| {
                    out.copy_from_slice(&dest);
                    tk.blend(mode, &source, out, SX, SY, region).unwrap();
                });
            }
        }
    }

    #[test]
    fn test_blur_worker_independent() {
        for vs in [1, 4] {
            let input = noise(SX * SY * vs, 3);
            for radius in [1, 4, 25] {
                for region in regions() {
                    assert_worker_independent(input.len(), 0u8, |tk, out| {
                        tk.blur(&input, out, SX, SY, vs, radius, region).unwrap();
                    });
                }
            }
        }
    }

    #[test]
    fn test_color_matrix_worker_independent() {
        let input = noise_f32(SX * SY * 4, 4);
        let input_u8 = noise(SX * SY * 4, 4);
        for region in regions() {
            assert_worker_independent(SX * SY * 4, 0.0f32, |tk, out| {
                let add = [0.1, 0.5, 0.5, 0.0];
                tk.color_matrix(&input, out, 4, 4, SX, SY, &RGB_TO_YUV, Some(&add), region)
                    .unwrap();
            });
            assert_worker_independent(SX * SY * 2, 0u8, |tk, out| {
                let m = [0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0];
                tk.color_matrix(&input_u8, out, 4, 2, SX, SY, &m, None, region).unwrap();
            });
        }
    }

    #[test]
    fn test_convolve_worker_independent() {
        let k3: Vec<f32> = (0..9).map(|i| (i as f32 - 4.0) / 10.0).collect();
        let k5: Vec<f32> = (0..25).map(|i| 1.0 / (i + 1) as f32).collect();
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 5);
            let input_f = noise_f32(SX * SY * vs, 6);
            for region in regions() {
                assert_worker_independent(input.len(), 0u8, |tk, out| {
                    tk.convolve3x3(&input, out, vs, SX, SY, &k3, region).unwrap();
                });
                assert_worker_independent(input_f.len(), 0.0f32, |tk, out| {
                    tk.convolve5x5(&input_f, out, vs, SX, SY, &k5, region).unwrap();
                });
            }
        }
    }

    #[test]
    fn test_histograms_worker_independent() {
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 7);
            for region in regions() {
                assert_worker_independent(256 * vs, -1i32, |tk, out| {
                    tk.histogram(&input, out, SX, SY, vs, region).unwrap();
                });
                assert_worker_independent(256, -1i32, |tk, out| {
                    tk.histogram_dot(&input, out, SX, SY, vs, None, region).unwrap();
                });
            }
        }
    }

    #[test]
    fn test_luts_worker_independent() {
        let input = noise(SX * SY * 4, 8);
        let table = noise(256, 9);
        let tables = LutTables::new().with_green(&table).with_alpha(&table);
        let cube_values = noise(5 * 6 * 7 * 4, 10);
        let cube = Cube::new(&cube_values, 5, 6, 7).unwrap();
        for region in regions() {
            assert_worker_independent(input.len(), 0u8, |tk, out| {
                tk.lut(&input, out, SX, SY, &tables, region).unwrap();
            });
            assert_worker_independent(input.len(), 0u8, |tk, out| {
                tk.lut3d(&input, out, SX, SY, &cube, region).unwrap();
            });
        }
    }

    #[test]
    fn test_resize_worker_independent() {
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 11);
            let input_f = noise_f32(SX * SY * vs, 12);
            for (ox, oy) in [(80, 51), (9, 4), (SX, SY)] {
                assert_worker_independent(ox * oy * vs, 0u8, |tk, out| {
                    tk.resize(&input, out, SX, SY, vs, ox, oy, None).unwrap();
                });
                assert_worker_independent(ox * oy * vs, 0.0f32, |tk, out| {
                    let region = Region::new(1, ox, oy / 2, oy);
                    tk.resize(&input_f, out, SX, SY, vs, ox, oy, Some(region)).unwrap();
                });
            }
        }
    }

    #[test]
    fn test_yuv_worker_independent() {
        let (sx, sy) = (38, 24);
        for format in [YuvFormat::Nv21, YuvFormat::Yv12] {
            let input = noise(format.buffer_len(sx, sy).unwrap(), 13);
            assert_worker_independent(sx * sy * 4, 0u8, |tk, out| {
                tk.yuv_to_rgb(&input, out, sx, sy, format).unwrap();
            });
        }
    }

    // ========================================================================
    // Identities and totals
    // ========================================================================

    #[test]
    fn test_histogram_totals() {
        let tk = Toolkit::new(4).unwrap();
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 14);
            for region in regions() {
                let pixels = region.unwrap_or(Region::full(SX, SY)).area() as i32;

                let mut bins = vec![0i32; 256 * vs];
                tk.histogram(&input, &mut bins, SX, SY, vs, region).unwrap();
                for c in 0..vs {
                    let total: i32 = (0..256).map(|v| bins[v * vs + c]).sum();
                    assert_eq!(total, pixels);
                }

                let mut dot = vec![0i32; 256];
                tk.histogram_dot(&input, &mut dot, SX, SY, vs, None, region).unwrap();
                assert_eq!(dot.iter().sum::<i32>(), pixels);
            }
        }
    }

    #[test]
    fn test_lut_identity() {
        let tk = Toolkit::new(3).unwrap();
        let input = noise(SX * SY * 4, 15);
        let ident: Vec<u8> = (0..=255).collect();
        for tables in [
            LutTables::new(),
            LutTables::new()
                .with_red(&ident)
                .with_green(&ident)
                .with_blue(&ident)
                .with_alpha(&ident),
        ] {
            let mut out = vec![0u8; input.len()];
            tk.lut(&input, &mut out, SX, SY, &tables, None).unwrap();
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_lut3d_identity() {
        let tk = Toolkit::new(3).unwrap();
        let input = noise(SX * SY * 4, 16);
        let values = identity_cube(17, 17, 17);
        let cube = Cube::new(&values, 17, 17, 17).unwrap();
        let mut out = vec![0u8; input.len()];
        tk.lut3d(&input, &mut out, SX, SY, &cube, None).unwrap();
        for (o, i) in out.iter().zip(&input) {
            assert!(o.abs_diff(*i) <= 1);
        }
    }

    #[test]
    fn test_blend_src_and_dst() {
        let tk = Toolkit::new(4).unwrap();
        let source = noise(SX * SY * 4, 17);
        let before = noise(SX * SY * 4, 18);

        let mut dest = before.clone();
        tk.blend(BlendMode::Dst, &source, &mut dest, SX, SY, None).unwrap();
        assert_eq!(dest, before);

        tk.blend(BlendMode::Src, &source, &mut dest, SX, SY, None).unwrap();
        assert_eq!(dest, source);
    }

    #[test]
    fn test_color_matrix_identity() {
        let tk = Toolkit::new(4).unwrap();
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 19);
            let mut out = vec![0u8; input.len()];
            tk.color_matrix(&input, &mut out, vs, vs, SX, SY, &identity(vs), None, None).unwrap();
            assert_eq!(out, input);

            let input_f = noise_f32(SX * SY * vs, 20);
            let mut out_f = vec![0.0f32; input_f.len()];
            let zeros = vec![0.0f32; vs];
            tk.color_matrix(&input_f, &mut out_f, vs, vs, SX, SY, &identity(vs), Some(&zeros), None)
                .unwrap();
            assert_eq!(out_f, input_f);
        }
    }

    #[test]
    fn test_resize_identity() {
        let tk = Toolkit::new(4).unwrap();
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 21);
            let mut out = vec![0u8; input.len()];
            tk.resize(&input, &mut out, SX, SY, vs, SX, SY, None).unwrap();
            assert_eq!(out, input);

            let input_f = noise_f32(SX * SY * vs, 22);
            let mut out_f = vec![0.0f32; input_f.len()];
            tk.resize(&input_f, &mut out_f, SX, SY, vs, SX, SY, None).unwrap();
            for (a, b) in out_f.iter().zip(&input_f) {
                assert_relative_eq!(a, b, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_convolve_identity() {
        let tk = Toolkit::new(4).unwrap();
        for vs in 1..=4 {
            let input = noise(SX * SY * vs, 23);
            let mut out = vec![0u8; input.len()];
            tk.convolve3x3(&input, &mut out, vs, SX, SY, &IDENTITY_3X3, None).unwrap();
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_blur_radius_zero_rejected() {
        let tk = Toolkit::new(2).unwrap();
        let input = noise(SX * SY * 4, 24);
        let mut out = vec![0u8; input.len()];
        let err = tk.blur(&input, &mut out, SX, SY, 4, 0, None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    // ========================================================================
    // Regions
    // ========================================================================

    #[test]
    fn test_blend_region_confined() {
        let tk = Toolkit::new(4).unwrap();
        let source = noise(SX * SY * 4, 25);
        let before = noise(SX * SY * 4, 26);
        let region = Region::new(5, 21, 2, 17);

        let mut full = before.clone();
        tk.blend(BlendMode::Multiply, &source, &mut full, SX, SY, None).unwrap();
        let mut partial = before.clone();
        tk.blend(BlendMode::Multiply, &source, &mut partial, SX, SY, Some(region)).unwrap();

        for y in 0..SY {
            for x in 0..SX {
                let px = (y * SX + x) * 4..(y * SX + x + 1) * 4;
                let expected = if region.contains(x, y) {
                    &full[px.clone()]
                } else {
                    &before[px.clone()]
                };
                assert_eq!(&partial[px], expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_neighborhood_region_matches_full() {
        // Clamp-to-edge sampling is relative to the image, not the region.
        let tk = Toolkit::new(4).unwrap();
        let input = noise(SX * SY, 27);
        let region = Region::new(10, 20, 5, 9);
        let mut full = vec![0u8; input.len()];
        tk.blur(&input, &mut full, SX, SY, 1, 6, None).unwrap();
        let mut partial = vec![0u8; input.len()];
        tk.blur(&input, &mut partial, SX, SY, 1, 6, Some(region)).unwrap();
        for y in region.start_y..region.end_y {
            for x in region.start_x..region.end_x {
                assert_eq!(partial[y * SX + x], full[y * SX + x]);
            }
        }
    }

    #[test]
    fn test_zero_threads_has_workers() {
        let tk = Toolkit::new(0).unwrap();
        assert!(tk.threads() >= 1);
        let input = noise(8 * 8, 28);
        let mut bins = vec![0i32; 256];
        tk.histogram(&input, &mut bins, 8, 8, 1, None).unwrap();
        assert_eq!(bins.iter().sum::<i32>(), 64);
    }
}
