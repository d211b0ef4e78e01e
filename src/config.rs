use glam::Vec2;
use std::f32::consts::PI;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while validating construction parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid resolution must be a power of two >= 2, got {0}")]
    Resolution(usize),
    #[error("FFT length must be a power of two, got {0}")]
    FftLength(usize),
    #[error("patch length must be finite and positive, got {0}")]
    Length(f32),
    #[error("wind vector must be finite and non-zero, got ({0}, {1})")]
    Wind(f32, f32),
    #[error("Phillips amplitude must be finite and non-negative, got {0}")]
    Amplitude(f32),
    #[error("gravity must be finite and positive, got {0}")]
    Gravity(f32),
    #[error("frequency quantum must be finite and positive, got {0}")]
    FrequencyQuantum(f32),
}

/// Which evaluator `WaveSimulation::evaluate` runs each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMethod {
    /// O(N² log N) inverse FFT over the whole grid
    #[default]
    Fft,
    /// O(N⁴) per-vertex summation, the reference path
    Direct,
}

/// How the FFT evaluator turns its N×N spectra into spatial samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformLayout {
    /// Row transforms followed by column transforms (a true 2D inverse FFT)
    #[default]
    Separable,
    /// One 1D transform over the flattened N² buffer, as older builds did
    Flattened,
}

/// How `tilde0_conj` is derived for each bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConjugatePairing {
    /// Fresh draw at the bin with its x-index negated, imaginary part flipped.
    /// The two draws are independent, so a bin's amplitude at t = 0 is
    /// generally not real under this pairing.
    #[default]
    Legacy,
    /// Conjugate of the stored amplitude at the mirrored bin (-k)
    Mirrored,
}

impl FromStr for EvaluationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fft" => Ok(EvaluationMethod::Fft),
            "direct" | "naive" => Ok(EvaluationMethod::Direct),
            _ => Err(format!("Unknown evaluation method: {} (expected fft or direct)", s)),
        }
    }
}

impl FromStr for TransformLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "separable" | "2d" => Ok(TransformLayout::Separable),
            "flattened" | "flat" => Ok(TransformLayout::Flattened),
            _ => Err(format!("Unknown transform layout: {} (expected separable or flattened)", s)),
        }
    }
}

impl FromStr for ConjugatePairing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(ConjugatePairing::Legacy),
            "mirrored" | "hermitian" => Ok(ConjugatePairing::Mirrored),
            _ => Err(format!("Unknown conjugate pairing: {} (expected legacy or mirrored)", s)),
        }
    }
}

/// Construction parameters for a wave grid
#[derive(Debug, Clone)]
pub struct OceanConfig {
    pub resolution: usize,           // Grid resolution N (bins per side)
    pub length: f32,                 // Physical side length L of the patch
    pub amplitude: f32,              // Phillips amplitude A
    pub wind: Vec2,                  // Wind velocity; must be non-zero
    pub gravity: f32,                // Gravity acceleration
    pub damping: f32,                // Small-wave suppression factor
    pub frequency_quantum: f32,      // Dispersion quantization step Δω
    pub choppiness: f32,             // Horizontal displacement scale λ (negative)
    pub method: EvaluationMethod,
    pub layout: TransformLayout,
    pub pairing: ConjugatePairing,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            resolution: 32,
            length: 32.0,
            amplitude: 0.0005,
            wind: Vec2::new(16.0, 16.0),
            gravity: 9.81,
            damping: 0.001,
            frequency_quantum: 2.0 * PI / 200.0,
            choppiness: -1.0,
            method: EvaluationMethod::default(),
            layout: TransformLayout::default(),
            pairing: ConjugatePairing::default(),
        }
    }
}

impl OceanConfig {
    /// Check every parameter that would otherwise produce NaNs or corrupt FFT output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 || !self.resolution.is_power_of_two() {
            return Err(ConfigError::Resolution(self.resolution));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(ConfigError::Length(self.length));
        }
        if !self.wind.is_finite() || self.wind.length_squared() == 0.0 {
            return Err(ConfigError::Wind(self.wind.x, self.wind.y));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(ConfigError::Amplitude(self.amplitude));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !self.frequency_quantum.is_finite() || self.frequency_quantum <= 0.0 {
            return Err(ConfigError::FrequencyQuantum(self.frequency_quantum));
        }
        Ok(())
    }
}
