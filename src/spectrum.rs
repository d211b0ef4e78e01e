use glam::Vec2;
use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

use crate::config::OceanConfig;

/// Wavenumbers below this carry no energy and no horizontal displacement.
pub const MIN_WAVENUMBER: f32 = 1e-6;

/// Uniform samples in [-1, 1) feeding the Gaussian draws of the initial spectrum.
pub trait RandomSource {
    fn next_signed_unit(&mut self) -> f32;
}

/// Adapter exposing any `rand::Rng` as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_signed_unit(&mut self) -> f32 {
        self.0.gen_range(-1.0..1.0)
    }
}

/// Phillips spectrum over the centred frequency grid of an N x N patch
#[derive(Debug, Clone)]
pub struct PhillipsSpectrum {
    pub resolution: usize,
    pub length: f32,
    pub amplitude: f32,
    pub wind: Vec2,
    pub gravity: f32,
    pub damping: f32,
}

impl PhillipsSpectrum {
    pub fn from_config(config: &OceanConfig) -> Self {
        Self {
            resolution: config.resolution,
            length: config.length,
            amplitude: config.amplitude,
            wind: config.wind,
            gravity: config.gravity,
            damping: config.damping,
        }
    }

    /// Wavevector of bin (n, m): `k = π(2·idx − N)/L` per axis, so idx = N/2 is k = 0.
    /// `n` runs along x and `m` along z; negative indices are allowed.
    pub fn wavevector(&self, n: i32, m: i32) -> Vec2 {
        let size = self.resolution as f32;
        Vec2::new(
            PI * (2.0 * n as f32 - size) / self.length,
            PI * (2.0 * m as f32 - size) / self.length,
        )
    }

    /// Largest wave arising from the configured wind, `|wind|² / g`.
    pub fn wind_wavelength(&self) -> f32 {
        self.wind.length_squared() / self.gravity
    }

    /// Energy of bin (n, m). Zero at k = 0 and non-negative everywhere.
    pub fn phillips(&self, n: i32, m: i32) -> f32 {
        let k = self.wavevector(n, m);
        let k_length = k.length();
        if k_length < MIN_WAVENUMBER {
            return 0.0;
        }

        let k_length_squared = k_length * k_length;
        let k_dot_w = (k / k_length).dot(self.wind.normalize());

        let l = self.wind_wavelength();
        let l_squared = l * l;
        let damped = l_squared * self.damping * self.damping;

        self.amplitude * (-1.0 / (k_length_squared * l_squared)).exp()
            / (k_length_squared * k_length_squared)
            * k_dot_w
            * k_dot_w
            * (-k_length_squared * damped).exp()
    }

    /// Gaussian complex amplitude `ξ·sqrt(P(k)/2)` of bin (n, m).
    pub fn initial_amplitude<S: RandomSource + ?Sized>(&self, source: &mut S, n: i32, m: i32) -> Complex32 {
        let gaussian = gaussian_pair(source);
        gaussian * (self.phillips(n, m) / 2.0).sqrt()
    }
}

/// Standard normal complex pair from the Marsaglia polar method.
pub fn gaussian_pair<S: RandomSource + ?Sized>(source: &mut S) -> Complex32 {
    loop {
        let x = source.next_signed_unit();
        let y = source.next_signed_unit();
        let s = x * x + y * y;
        // s == 0 would feed ln(0)
        if s > 0.0 && s < 1.0 {
            let z = (-2.0 * s.ln() / s).sqrt();
            return Complex32::new(x * z, y * z);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::OceanConfig;

    /// Replays a fixed list of uniform draws, cycling when exhausted.
    pub(crate) struct ScriptedSource {
        draws: Vec<f32>,
        next: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new(draws: &[f32]) -> Self {
            Self { draws: draws.to_vec(), next: 0 }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_signed_unit(&mut self) -> f32 {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            value
        }
    }

    fn small_spectrum() -> PhillipsSpectrum {
        PhillipsSpectrum::from_config(&OceanConfig {
            resolution: 4,
            length: 4.0,
            amplitude: 1.0,
            wind: Vec2::new(1.0, 0.0),
            ..Default::default()
        })
    }

    #[test]
    fn centre_bin_has_zero_wavevector() {
        let spectrum = small_spectrum();
        assert_eq!(spectrum.wavevector(2, 2), Vec2::ZERO);
        assert!((spectrum.wavevector(0, 3).x + PI).abs() < 1e-6);
        assert!((spectrum.wavevector(0, 3).y - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn phillips_is_zero_at_origin_and_non_negative() {
        let spectrum = PhillipsSpectrum::from_config(&OceanConfig::default());
        let n = spectrum.resolution as i32;
        assert_eq!(spectrum.phillips(n / 2, n / 2), 0.0);

        for m in -n..=n {
            for bin in -n..=n {
                let p = spectrum.phillips(bin, m);
                assert!(p >= 0.0 && p.is_finite(), "P({}, {}) = {}", bin, m, p);
            }
        }
    }

    #[test]
    fn phillips_vanishes_perpendicular_to_wind() {
        let spectrum = small_spectrum();
        // k = (0, -π) is orthogonal to a wind blowing along x
        assert!(spectrum.phillips(2, 0).abs() < 1e-12);
        assert!(spectrum.phillips(0, 2) > 0.0);
    }

    #[test]
    fn phillips_matches_reference_value() {
        let spectrum = small_spectrum();
        let expected = 9.794015e-6;
        let actual = spectrum.phillips(0, 0);
        assert!((actual - expected).abs() < expected * 1e-4, "got {}", actual);
    }

    #[test]
    fn marsaglia_rejects_points_outside_unit_disc() {
        let mut source = ScriptedSource::new(&[0.9, 0.9, 0.0, 0.0, 0.5, -0.25]);
        let pair = gaussian_pair(&mut source);

        let s: f32 = 0.3125;
        let z = (-2.0 * s.ln() / s).sqrt();
        assert!((pair.re - 0.5 * z).abs() < 1e-6);
        assert!((pair.im + 0.25 * z).abs() < 1e-6);
        assert_eq!(source.next, 6);
    }

    #[test]
    fn seeded_sources_repeat() {
        let spectrum = small_spectrum();
        let mut a = RngSource::seeded(9);
        let mut b = RngSource::seeded(9);
        for _ in 0..16 {
            assert_eq!(
                spectrum.initial_amplitude(&mut a, 0, 1),
                spectrum.initial_amplitude(&mut b, 0, 1)
            );
        }
    }
}
