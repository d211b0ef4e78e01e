use std::time::Instant;

use tessendorf_grid::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Running Tessendorf Grid Benchmarks");
    println!("==================================");

    for &resolution in &[8usize, 16, 32, 64] {
        println!("\nGrid size: {}x{} ({} vertices)", resolution, resolution, (resolution + 1) * (resolution + 1));

        let config = OceanConfig {
            resolution,
            length: resolution as f32,
            ..Default::default()
        };

        let start = Instant::now();
        let mut simulation = WaveSimulation::from_seed(config, 42)?;
        println!("  Spectrum initialisation: {:.2?}", start.elapsed());

        let mut mesh = Mesh::new_grid(resolution, resolution as f32);

        let start = Instant::now();
        for frame in 0..10 {
            simulation.evaluate_fft(frame as f32 / 60.0, &mut mesh);
        }
        println!("  FFT evaluation: {:.2?} per frame", start.elapsed() / 10);

        // The direct sum is O(N^4); skip it where it would take minutes
        if resolution <= 32 {
            let start = Instant::now();
            simulation.evaluate_direct(0.0, &mut mesh);
            println!("  Direct evaluation: {:.2?} per frame", start.elapsed());
        }
    }

    Ok(())
}
