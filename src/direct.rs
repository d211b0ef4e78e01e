//! Reference evaluator summing every frequency bin at every vertex.
//!
//! Each point costs O(N²), a whole grid O(N⁴); use it for small grids and
//! for checking the FFT path.

use glam::{Vec2, Vec3};
use num_complex::Complex32;

use crate::grid::{SurfacePoint, WaveGrid};
use crate::spectrum::MIN_WAVENUMBER;

impl WaveGrid {
    /// Height, horizontal displacement and normal at world position `x` (x, z) and time `t`.
    pub fn evaluate_point(&self, x: Vec2, t: f32) -> SurfacePoint {
        let n = self.resolution();
        let mut height = Complex32::new(0.0, 0.0);
        let mut displacement = Vec2::ZERO;
        let mut slope = Vec3::ZERO;

        for m in 0..n {
            for col in 0..n {
                let k = self.wavevector(col, m);
                let phase = k.dot(x);
                let term = self.time_evolved_amplitude(t, col, m) * Complex32::new(phase.cos(), phase.sin());

                height += term;
                slope += Vec3::new(-k.x * term.im, 0.0, -k.y * term.im);

                let k_length = k.length();
                if k_length >= MIN_WAVENUMBER {
                    displacement += k / k_length * term.im;
                }
            }
        }

        SurfacePoint {
            height,
            displacement,
            normal: (Vec3::Y - slope).normalize(),
        }
    }
}

/// Owns the per-frame sample buffer of the direct path.
#[derive(Debug, Clone)]
pub struct DirectEvaluator {
    samples: Vec<SurfacePoint>,
}

impl DirectEvaluator {
    pub fn new(resolution: usize) -> Self {
        Self {
            samples: vec![SurfacePoint::default(); resolution * resolution],
        }
    }

    /// Evaluate every N x N vertex at its rest position.
    pub fn evaluate(&mut self, grid: &WaveGrid, t: f32) -> &[SurfacePoint] {
        let n = grid.resolution();
        for m in 0..n {
            for col in 0..n {
                let rest = grid.vertex(m, col).rest;
                self.samples[m * n + col] = grid.evaluate_point(Vec2::new(rest.x, rest.z), t);
            }
        }
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConjugatePairing, OceanConfig};
    use crate::spectrum::RngSource;

    fn small_grid(pairing: ConjugatePairing) -> WaveGrid {
        let config = OceanConfig {
            resolution: 8,
            length: 16.0,
            amplitude: 0.01,
            wind: Vec2::new(6.0, 2.0),
            pairing,
            ..Default::default()
        };
        WaveGrid::new(&config, &mut RngSource::seeded(21)).unwrap()
    }

    #[test]
    fn normals_are_unit_length_and_point_up() {
        let grid = small_grid(ConjugatePairing::Legacy);
        for &t in &[0.0, 1.5, 7.25] {
            let point = grid.evaluate_point(Vec2::new(1.3, -2.7), t);
            assert!((point.normal.length() - 1.0).abs() < 1e-5);
            assert!(point.normal.y > 0.0);
        }
    }

    #[test]
    fn single_bin_sum_is_explicit() {
        let grid = small_grid(ConjugatePairing::Legacy);
        let x = Vec2::new(0.75, 3.0);
        let t = 2.0;

        let point = grid.evaluate_point(x, t);

        let mut expected = Complex32::new(0.0, 0.0);
        for m in 0..8 {
            for col in 0..8 {
                let k = grid.wavevector(col, m);
                let phase = k.dot(x);
                expected += grid.time_evolved_amplitude(t, col, m) * Complex32::from_polar(1.0, phase);
            }
        }
        assert!((point.height - expected).norm() < 1e-4 * (1.0 + expected.norm()));
    }

    #[test]
    fn mirrored_pairing_gives_real_heights_on_grid_points() {
        let grid = small_grid(ConjugatePairing::Mirrored);
        let mut evaluator = DirectEvaluator::new(8);

        for &t in &[0.0, 0.8, 3.1] {
            let samples = evaluator.evaluate(&grid, t);
            let scale = samples.iter().map(|s| s.height.norm()).fold(0.0f32, f32::max);
            assert!(scale > 0.0);
            for sample in samples {
                assert!(sample.height.im.abs() < 1e-3 * scale, "imaginary height {}", sample.height.im);
            }
        }
    }

    #[test]
    fn flat_spectrum_gives_flat_surface() {
        let config = OceanConfig {
            resolution: 4,
            amplitude: 0.0,
            ..Default::default()
        };
        let grid = WaveGrid::new(&config, &mut RngSource::seeded(0)).unwrap();
        let point = grid.evaluate_point(Vec2::new(3.0, 1.0), 4.0);
        assert_eq!(point.height, Complex32::new(0.0, 0.0));
        assert_eq!(point.displacement, Vec2::ZERO);
        assert_eq!(point.normal, Vec3::Y);
    }
}
