use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::grid::VertexSink;

/// A vertex in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A face consisting of three vertex indices
#[derive(Debug, Clone, Copy)]
pub struct Face(pub usize, pub usize, pub usize);

/// The complete mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Flat Y-up patch of `resolution` x `resolution` cells centred on the origin,
    /// laid out like the wave grid so it can receive its vertex buffer directly.
    pub fn new_grid(resolution: usize, length: f32) -> Self {
        let side = resolution + 1;
        let step = length / resolution as f32;
        let half = length / 2.0;

        let vertices: Vec<Vertex> = (0..side)
            .into_par_iter()
            .flat_map(|row| {
                let v = row as f32 / resolution as f32;
                (0..side)
                    .map(move |col| {
                        let u = col as f32 / resolution as f32;
                        Vertex {
                            position: Vec3::new(col as f32 * step - half, 0.0, row as f32 * step - half),
                            normal: Vec3::Y,
                            uv: Vec2::new(u, v),
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let faces: Vec<Face> = (0..resolution)
            .into_par_iter()
            .flat_map(|row| {
                (0..resolution)
                    .flat_map(move |col| {
                        let a = col + row * side;
                        let b = col + (row + 1) * side;
                        let c = (col + 1) + (row + 1) * side;
                        let d = (col + 1) + row * side;

                        // Both triangles, wound so the face normal points up
                        [Face(a, b, d), Face(b, c, d)]
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Mesh { vertices, faces }
    }

    /// Lowest and highest vertex heights.
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v.position.y), hi.max(v.position.y)))
    }
}

impl VertexSink for Mesh {
    fn update_vertex_buffer(&mut self, positions: &[Vec3], normals: &[Vec3]) {
        if positions.len() != self.vertices.len() || normals.len() != self.vertices.len() {
            log::warn!(
                "ignoring vertex buffer update: mesh has {} vertices, got {} positions and {} normals",
                self.vertices.len(),
                positions.len(),
                normals.len()
            );
            return;
        }

        self.vertices
            .par_iter_mut()
            .zip(positions.par_iter().zip(normals.par_iter()))
            .for_each(|(vertex, (position, normal))| {
                vertex.position = *position;
                vertex.normal = *normal;
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OceanConfig;
    use crate::simulation::WaveSimulation;

    #[test]
    fn grid_mesh_layout() {
        let mesh = Mesh::new_grid(4, 8.0);
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.faces.len(), 32);
        assert_eq!(mesh.vertices[0].position, Vec3::new(-4.0, 0.0, -4.0));
        assert_eq!(mesh.vertices[24].position, Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(mesh.vertices[6].uv, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn faces_point_up() {
        let mesh = Mesh::new_grid(2, 2.0);
        for &Face(a, b, c) in &mesh.faces {
            let p = |i: usize| mesh.vertices[i].position;
            let normal = (p(b) - p(a)).cross(p(c) - p(a));
            assert!(normal.y > 0.0);
        }
    }

    #[test]
    fn receives_simulation_frames() {
        let config = OceanConfig { resolution: 8, length: 16.0, ..Default::default() };
        let mut simulation = WaveSimulation::from_seed(config, 12).unwrap();
        let mut mesh = Mesh::new_grid(8, 16.0);

        simulation.evaluate(1.0, &mut mesh);

        for (vertex, grid_vertex) in mesh.vertices.iter().zip(simulation.grid().vertices()) {
            assert_eq!(vertex.position, grid_vertex.position);
            assert_eq!(vertex.normal, grid_vertex.normal);
        }
        let (lo, hi) = mesh.height_range();
        assert!(lo <= hi);
    }

    #[test]
    fn ignores_mismatched_buffers() {
        let mut mesh = Mesh::new_grid(2, 2.0);
        mesh.update_vertex_buffer(&[Vec3::ONE; 4], &[Vec3::Y; 4]);
        assert!(mesh.vertices.iter().all(|v| v.position.y == 0.0));
    }
}
