use glam::{Vec2, Vec3};
use num_complex::Complex32;

use crate::config::{ConfigError, ConjugatePairing, OceanConfig};
use crate::dispersion::{self, DispersionRelation};
use crate::spectrum::{PhillipsSpectrum, RandomSource};

/// One vertex of the (N+1) x (N+1) wave grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub rest: Vec3,            // Set at construction, never moved
    pub tilde0: Complex32,     // Static amplitude of the matching bin
    pub tilde0_conj: Complex32,
}

/// Surface state at one sample point, produced by either evaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub height: Complex32,
    pub displacement: Vec2, // Horizontal (x, z) displacement before λ scaling
    pub normal: Vec3,
}

impl Default for SurfacePoint {
    fn default() -> Self {
        Self {
            height: Complex32::new(0.0, 0.0),
            displacement: Vec2::ZERO,
            normal: Vec3::Y,
        }
    }
}

/// Receives the flattened, row-major (N+1)² positions and normals after each pass.
pub trait VertexSink {
    fn update_vertex_buffer(&mut self, positions: &[Vec3], normals: &[Vec3]);
}

/// A sink that keeps the latest snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl VertexSink for Snapshot {
    fn update_vertex_buffer(&mut self, positions: &[Vec3], normals: &[Vec3]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
        self.normals.clear();
        self.normals.extend_from_slice(normals);
    }
}

/// The wave grid: static spectrum plus the per-frame vertex state.
///
/// Vertices are stored row-major with rows along z (index `m`) and columns
/// along x (index `n`), so vertex (m, n) lives at `m * (N + 1) + n`.
#[derive(Debug, Clone)]
pub struct WaveGrid {
    resolution: usize,
    length: f32,
    spectrum: PhillipsSpectrum,
    dispersion: DispersionRelation,
    vertices: Vec<GridVertex>,
}

impl WaveGrid {
    /// Build the grid and draw every bin's static amplitude from `source`.
    pub fn new<S: RandomSource + ?Sized>(config: &OceanConfig, source: &mut S) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = config.resolution;
        let side = n + 1;
        let spectrum = PhillipsSpectrum::from_config(config);
        let dispersion = DispersionRelation::from_config(config);
        let amplitudes = draw_amplitudes(&spectrum, config.pairing, source);

        let step = config.length / n as f32;
        let half = n as f32 / 2.0;
        let mut vertices = Vec::with_capacity(side * side);
        for m in 0..side {
            for col in 0..side {
                let (tilde0, tilde0_conj) = amplitudes[(m % n) * n + col % n];
                let rest = Vec3::new((col as f32 - half) * step, 0.0, (m as f32 - half) * step);
                vertices.push(GridVertex {
                    position: rest,
                    normal: Vec3::Y,
                    rest,
                    tilde0,
                    tilde0_conj,
                });
            }
        }

        log::debug!(
            "built {}x{} wave grid over {} units, wind {:?}, pairing {:?}",
            side,
            side,
            config.length,
            config.wind,
            config.pairing
        );

        Ok(Self {
            resolution: n,
            length: config.length,
            spectrum,
            dispersion,
            vertices,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn spectrum(&self) -> &PhillipsSpectrum {
        &self.spectrum
    }

    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    /// Vertex at row `m` (z) and column `n` (x), both in `0..=N`.
    pub fn vertex(&self, m: usize, n: usize) -> &GridVertex {
        &self.vertices[m * (self.resolution + 1) + n]
    }

    /// Wavevector of bin (n, m).
    pub fn wavevector(&self, n: usize, m: usize) -> Vec2 {
        self.spectrum.wavevector(n as i32, m as i32)
    }

    /// Quantized angular frequency of bin (n, m).
    pub fn dispersion(&self, n: usize, m: usize) -> f32 {
        self.dispersion.angular_frequency(self.wavevector(n, m))
    }

    /// Amplitude of bin (n, m) at time `t`.
    pub fn time_evolved_amplitude(&self, t: f32, n: usize, m: usize) -> Complex32 {
        let vertex = self.vertex(m, n);
        dispersion::time_evolved(vertex.tilde0, vertex.tilde0_conj, self.dispersion(n, m), t)
    }

    /// Write the N x N evaluated samples into the grid, copying row 0 into row N,
    /// column 0 into column N and (0, 0) into (N, N) so the patch tiles seamlessly.
    ///
    /// Each copy is displaced from its own rest position, so the far edge
    /// sits exactly one patch length away from the edge it duplicates.
    pub fn assemble(&mut self, samples: &[SurfacePoint], lambda: f32) {
        let n = self.resolution;
        assert_eq!(samples.len(), n * n, "expected {} evaluated samples", n * n);

        for m in 0..n {
            for col in 0..n {
                let sample = &samples[m * n + col];
                self.place(m, col, sample, lambda);
                if m == 0 {
                    self.place(n, col, sample, lambda);
                }
                if col == 0 {
                    self.place(m, n, sample, lambda);
                }
                if m == 0 && col == 0 {
                    self.place(n, n, sample, lambda);
                }
            }
        }
    }

    /// Hand the row-major (N+1)² positions and normals to `sink`.
    pub fn publish<K: VertexSink + ?Sized>(&self, sink: &mut K) {
        let positions: Vec<Vec3> = self.vertices.iter().map(|v| v.position).collect();
        let normals: Vec<Vec3> = self.vertices.iter().map(|v| v.normal).collect();
        sink.update_vertex_buffer(&positions, &normals);
    }

    pub fn assemble_and_publish<K: VertexSink + ?Sized>(&mut self, samples: &[SurfacePoint], lambda: f32, sink: &mut K) {
        self.assemble(samples, lambda);
        self.publish(sink);
    }

    fn place(&mut self, m: usize, col: usize, sample: &SurfacePoint, lambda: f32) {
        let index = m * (self.resolution + 1) + col;
        let vertex = &mut self.vertices[index];
        vertex.position = Vec3::new(
            vertex.rest.x + lambda * sample.displacement.x,
            sample.height.re,
            vertex.rest.z + lambda * sample.displacement.y,
        );
        vertex.normal = sample.normal;
    }
}

/// Static amplitudes `(tilde0, tilde0_conj)` for the N x N bins, row-major by `m`.
fn draw_amplitudes<S: RandomSource + ?Sized>(
    spectrum: &PhillipsSpectrum,
    pairing: ConjugatePairing,
    source: &mut S,
) -> Vec<(Complex32, Complex32)> {
    let n = spectrum.resolution;
    let mut amplitudes = Vec::with_capacity(n * n);

    match pairing {
        ConjugatePairing::Legacy => {
            for m in 0..n as i32 {
                for col in 0..n as i32 {
                    let tilde0 = spectrum.initial_amplitude(source, col, m);
                    let tilde0_conj = spectrum.initial_amplitude(source, -col, m).conj();
                    amplitudes.push((tilde0, tilde0_conj));
                }
            }
        }
        ConjugatePairing::Mirrored => {
            for m in 0..n as i32 {
                for col in 0..n as i32 {
                    let tilde0 = spectrum.initial_amplitude(source, col, m);
                    amplitudes.push((tilde0, Complex32::new(0.0, 0.0)));
                }
            }
            for m in 0..n {
                for col in 0..n {
                    let mirrored = ((n - m) % n) * n + (n - col) % n;
                    amplitudes[m * n + col].1 = amplitudes[mirrored].0.conj();
                }
            }
        }
    }

    amplitudes
}
