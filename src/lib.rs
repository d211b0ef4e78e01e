//! Ocean surface synthesis after Tessendorf: a Phillips-spectrum wave grid
//! evaluated either by direct summation or by a radix-2 inverse FFT, then
//! stitched into a seamlessly tiling (N+1) x (N+1) vertex grid.

pub mod config;
pub mod dispersion;
pub mod direct;
mod export;
pub mod fft;
pub mod grid;
mod mesh;
pub mod simulation;
pub mod spectrum;
pub mod tessendorf;

// Re-export everything for public use
pub use config::{ConfigError, ConjugatePairing, EvaluationMethod, OceanConfig, TransformLayout};
pub use direct::DirectEvaluator;
pub use export::{export_mesh, export_mesh_tiled, ExportFormat, Tiling};
pub use fft::{Direction, Fft};
pub use grid::{GridVertex, Snapshot, SurfacePoint, VertexSink, WaveGrid};
pub use mesh::{Face, Mesh, Vertex};
pub use simulation::{FrameStats, WaveSimulation};
pub use spectrum::{PhillipsSpectrum, RandomSource, RngSource};
pub use tessendorf::FftEvaluator;

pub mod prelude {
    pub use crate::config::{ConfigError, ConjugatePairing, EvaluationMethod, OceanConfig, TransformLayout};
    pub use crate::export::{export_mesh, export_mesh_tiled, ExportFormat, Tiling};
    pub use crate::grid::{SurfacePoint, VertexSink, WaveGrid};
    pub use crate::mesh::{Face, Mesh, Vertex};
    pub use crate::simulation::{FrameStats, WaveSimulation};
    pub use crate::spectrum::{RandomSource, RngSource};
}
