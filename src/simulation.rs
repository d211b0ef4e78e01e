use crate::config::{ConfigError, EvaluationMethod, OceanConfig};
use crate::direct::DirectEvaluator;
use crate::grid::{SurfacePoint, VertexSink, WaveGrid};
use crate::spectrum::{RandomSource, RngSource};
use crate::tessendorf::FftEvaluator;

/// Height range of the last evaluated frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub time: f32,
    pub min_height: f32,
    pub max_height: f32,
}

/// Owns the wave grid and both evaluators; call [`WaveSimulation::evaluate`]
/// once per frame with the total elapsed time.
#[derive(Debug, Clone)]
pub struct WaveSimulation {
    config: OceanConfig,
    grid: WaveGrid,
    fft: FftEvaluator,
    direct: DirectEvaluator,
}

impl WaveSimulation {
    pub fn new<S: RandomSource + ?Sized>(config: OceanConfig, source: &mut S) -> Result<Self, ConfigError> {
        let grid = WaveGrid::new(&config, source)?;
        let fft = FftEvaluator::new(config.resolution, config.layout)?;
        let direct = DirectEvaluator::new(config.resolution);

        log::info!(
            "wave simulation ready: N={}, L={}, method {:?}, layout {:?}",
            config.resolution,
            config.length,
            config.method,
            config.layout
        );

        Ok(Self { config, grid, fft, direct })
    }

    /// Build with amplitudes drawn from a seeded `StdRng`.
    pub fn from_seed(config: OceanConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, &mut RngSource::seeded(seed))
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    pub fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    /// Evaluate with the configured method and publish the grid to `sink`.
    pub fn evaluate<K: VertexSink + ?Sized>(&mut self, t: f32, sink: &mut K) -> FrameStats {
        match self.config.method {
            EvaluationMethod::Fft => self.evaluate_fft(t, sink),
            EvaluationMethod::Direct => self.evaluate_direct(t, sink),
        }
    }

    pub fn evaluate_fft<K: VertexSink + ?Sized>(&mut self, t: f32, sink: &mut K) -> FrameStats {
        let samples = self.fft.evaluate(&self.grid, t);
        self.grid.assemble_and_publish(samples, self.config.choppiness, sink);
        frame_stats(t, samples)
    }

    pub fn evaluate_direct<K: VertexSink + ?Sized>(&mut self, t: f32, sink: &mut K) -> FrameStats {
        let samples = self.direct.evaluate(&self.grid, t);
        self.grid.assemble_and_publish(samples, self.config.choppiness, sink);
        frame_stats(t, samples)
    }
}

fn frame_stats(time: f32, samples: &[SurfacePoint]) -> FrameStats {
    let (min_height, max_height) = samples
        .iter()
        .map(|s| s.height.re)
        .fold((f32::MAX, f32::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));

    log::trace!("t={:.3}: height range [{:.4}, {:.4}]", time, min_height, max_height);

    FrameStats { time, min_height, max_height }
}
