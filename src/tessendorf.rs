use glam::{Vec2, Vec3};
use num_complex::Complex32;

use crate::config::{ConfigError, TransformLayout};
use crate::fft::{Direction, Fft};
use crate::grid::{SurfacePoint, WaveGrid};
use crate::spectrum::MIN_WAVENUMBER;

/// FFT-based evaluator: builds the height, slope and displacement spectra for
/// every bin and inverse transforms all five of them each frame.
///
/// The spectra buffers are sized once and reused across frames.
#[derive(Debug, Clone)]
pub struct FftEvaluator {
    resolution: usize,
    layout: TransformLayout,
    engine: Fft,
    height: Vec<Complex32>,
    slope_x: Vec<Complex32>,
    slope_z: Vec<Complex32>,
    displacement_x: Vec<Complex32>,
    displacement_z: Vec<Complex32>,
    samples: Vec<SurfacePoint>,
}

impl FftEvaluator {
    pub fn new(resolution: usize, layout: TransformLayout) -> Result<Self, ConfigError> {
        if resolution < 2 || !resolution.is_power_of_two() {
            return Err(ConfigError::Resolution(resolution));
        }

        let bins = resolution * resolution;
        let engine = match layout {
            TransformLayout::Separable => Fft::new(resolution)?,
            TransformLayout::Flattened => Fft::new(bins)?,
        };
        let zero = Complex32::new(0.0, 0.0);

        Ok(Self {
            resolution,
            layout,
            engine,
            height: vec![zero; bins],
            slope_x: vec![zero; bins],
            slope_z: vec![zero; bins],
            displacement_x: vec![zero; bins],
            displacement_z: vec![zero; bins],
            samples: vec![SurfacePoint::default(); bins],
        })
    }

    pub fn layout(&self) -> TransformLayout {
        self.layout
    }

    /// Evaluate the whole N x N grid at time `t`.
    ///
    /// # Panics
    /// If `grid` was built with a different resolution.
    pub fn evaluate(&mut self, grid: &WaveGrid, t: f32) -> &[SurfacePoint] {
        let n = self.resolution;
        assert_eq!(grid.resolution(), n, "grid and evaluator resolutions differ");

        self.fill_spectra(grid, t);

        let engine = &mut self.engine;
        for field in [
            &mut self.height,
            &mut self.slope_x,
            &mut self.slope_z,
            &mut self.displacement_x,
            &mut self.displacement_z,
        ] {
            match self.layout {
                TransformLayout::Separable => engine.transform_2d(field, Direction::Inverse),
                TransformLayout::Flattened => engine.process_in_place(field, 1, 0, Direction::Inverse),
            }
        }

        for m in 0..n {
            for col in 0..n {
                let i = m * n + col;
                let sign = checkerboard(col, m);

                // Normal from slope
                let slope_x = self.slope_x[i].re * sign;
                let slope_z = self.slope_z[i].re * sign;

                self.samples[i] = SurfacePoint {
                    height: self.height[i] * sign,
                    displacement: Vec2::new(self.displacement_x[i].re * sign, self.displacement_z[i].re * sign),
                    normal: Vec3::new(-slope_x, 1.0, -slope_z).normalize(),
                };
            }
        }

        &self.samples
    }

    fn fill_spectra(&mut self, grid: &WaveGrid, t: f32) {
        let n = self.resolution;
        // The separable transform samples the origin-centred rest positions only
        // when the input is pre-multiplied by the same checkerboard.
        let centred = self.layout == TransformLayout::Separable;

        for m in 0..n {
            for col in 0..n {
                let i = m * n + col;
                let k = grid.wavevector(col, m);
                let k_length = k.length();

                let mut h_tilde = grid.time_evolved_amplitude(t, col, m);
                if centred {
                    h_tilde *= checkerboard(col, m);
                }

                self.height[i] = h_tilde;
                self.slope_x[i] = h_tilde * Complex32::new(0.0, k.x);
                self.slope_z[i] = h_tilde * Complex32::new(0.0, k.y);

                // Displacement field for choppy waves
                if k_length < MIN_WAVENUMBER {
                    self.displacement_x[i] = Complex32::new(0.0, 0.0);
                    self.displacement_z[i] = Complex32::new(0.0, 0.0);
                } else {
                    self.displacement_x[i] = h_tilde * Complex32::new(0.0, -k.x / k_length);
                    self.displacement_z[i] = h_tilde * Complex32::new(0.0, -k.y / k_length);
                }
            }
        }
    }
}

/// `(-1)^(n + m)`
fn checkerboard(n: usize, m: usize) -> f32 {
    if (n + m) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}
