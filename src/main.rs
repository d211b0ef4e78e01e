use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use std::path::PathBuf;

use tessendorf_grid::prelude::*;

/// Animate a Tessendorf ocean patch and export the last frame as GLB
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid resolution N (power of two)
    #[arg(short = 'n', long, default_value_t = 32)]
    resolution: usize,

    /// Physical side length of the patch
    #[arg(short, long, default_value_t = 32.0)]
    length: f32,

    /// Phillips spectrum amplitude
    #[arg(short, long, default_value_t = 0.0005)]
    amplitude: f32,

    /// Wind velocity X component
    #[arg(long, default_value_t = 16.0)]
    wind_x: f32,

    /// Wind velocity Z component
    #[arg(long, default_value_t = 16.0)]
    wind_z: f32,

    /// Horizontal displacement scale (negative exaggerates choppiness)
    #[arg(short, long, default_value_t = -1.0, allow_negative_numbers = true)]
    choppiness: f32,

    /// Random seed for the initial spectrum
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Elapsed time of the first frame in seconds
    #[arg(short, long, default_value_t = 0.0)]
    time: f32,

    /// Number of frames to evaluate
    #[arg(short, long, default_value_t = 1)]
    frames: usize,

    /// Time between frames in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    time_step: f32,

    /// Evaluator: fft or direct
    #[arg(short, long, default_value = "fft")]
    method: EvaluationMethod,

    /// FFT layout: separable or flattened
    #[arg(long, default_value = "separable")]
    layout: TransformLayout,

    /// Conjugate pairing: legacy or mirrored
    #[arg(long, default_value = "legacy")]
    pairing: ConjugatePairing,

    /// Copies of the patch along each axis in the exported scene
    #[arg(long, default_value_t = 1)]
    tiles: usize,

    /// Output file path
    #[arg(short, long, default_value = "ocean_surface.glb")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = OceanConfig {
        resolution: args.resolution,
        length: args.length,
        amplitude: args.amplitude,
        wind: Vec2::new(args.wind_x, args.wind_z),
        choppiness: args.choppiness,
        method: args.method,
        layout: args.layout,
        pairing: args.pairing,
        ..Default::default()
    };

    println!("Building {}x{} wave grid over {} units...", args.resolution, args.resolution, args.length);
    let mut simulation = WaveSimulation::from_seed(config, args.seed).context("invalid ocean parameters")?;
    let mut mesh = Mesh::new_grid(args.resolution, args.length);

    for frame in 0..args.frames.max(1) {
        let t = args.time + frame as f32 * args.time_step;
        let stats = simulation.evaluate(t, &mut mesh);
        println!(
            "Frame {} (t = {:.3}s): height range min = {:.4}, max = {:.4}",
            frame, stats.time, stats.min_height, stats.max_height
        );
    }

    println!("Exporting to {}...", args.output.display());
    let tiling = Tiling {
        count_x: args.tiles.max(1),
        count_z: args.tiles.max(1),
        spacing: args.length,
    };
    mesh.save_glb(&args.output, tiling)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Done!");
    Ok(())
}
