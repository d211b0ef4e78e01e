use glam::Vec2;
use num_complex::Complex32;

use crate::config::OceanConfig;

/// Deep-water dispersion relation `ω = sqrt(g·|k|)`, quantized to multiples of Δω
/// so every component repeats with a common period and long runs show no phase drift.
#[derive(Debug, Clone, Copy)]
pub struct DispersionRelation {
    pub gravity: f32,
    pub quantum: f32,
}

impl DispersionRelation {
    pub fn from_config(config: &OceanConfig) -> Self {
        Self {
            gravity: config.gravity,
            quantum: config.frequency_quantum,
        }
    }

    /// Angular frequency of a wave with wavevector `k`.
    pub fn angular_frequency(&self, k: Vec2) -> f32 {
        ((self.gravity * k.length()).sqrt() / self.quantum).floor() * self.quantum
    }

    /// Period after which every quantized component returns to its initial phase.
    pub fn repeat_period(&self) -> f32 {
        2.0 * std::f32::consts::PI / self.quantum
    }
}

/// `tilde0·e^{iωt} + tilde0_conj·e^{-iωt}`: the forward and backward travelling
/// components of one bin at time `t`.
pub fn time_evolved(tilde0: Complex32, tilde0_conj: Complex32, omega: f32, t: f32) -> Complex32 {
    let (sin, cos) = (omega * t).sin_cos();
    tilde0 * Complex32::new(cos, sin) + tilde0_conj * Complex32::new(cos, -sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn frequencies_are_multiples_of_the_quantum() {
        let dispersion = DispersionRelation::from_config(&OceanConfig::default());
        let quantum = 2.0 * PI / 200.0;

        for i in 1..50 {
            let k = Vec2::new(0.173 * i as f32, -0.05 * i as f32);
            let omega = dispersion.angular_frequency(k);
            let steps = omega / quantum;
            assert!((steps - steps.round()).abs() < 1e-3, "ω = {} is not quantized", omega);
            assert!(omega <= (9.81 * k.length()).sqrt());
            assert!((9.81 * k.length()).sqrt() - omega < quantum + 1e-5);
        }
    }

    #[test]
    fn zero_wavevector_does_not_oscillate() {
        let dispersion = DispersionRelation::from_config(&OceanConfig::default());
        assert_eq!(dispersion.angular_frequency(Vec2::ZERO), 0.0);
    }

    #[test]
    fn repeat_period_of_default_quantum() {
        let dispersion = DispersionRelation::from_config(&OceanConfig::default());
        assert!((dispersion.repeat_period() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn time_zero_is_plain_sum() {
        let tilde0 = Complex32::new(0.3, -0.7);
        let result = time_evolved(tilde0, tilde0.conj(), 1.7, 0.0);
        assert!((result.re - 0.6).abs() < 1e-6);
        assert!(result.im.abs() < 1e-6);
    }

    #[test]
    fn conjugate_pair_stays_real_over_time() {
        let tilde0 = Complex32::new(-1.25, 0.4);
        for step in 0..20 {
            let t = step as f32 * 0.37;
            let result = time_evolved(tilde0, tilde0.conj(), 2.2, t);
            assert!(result.im.abs() < 1e-5);
        }
    }
}
