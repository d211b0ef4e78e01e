use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::tempdir;

use crate::mesh::Mesh;

/// Only GLB format is supported for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFormat;

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "glb" => Ok(ExportFormat),
            _ => Err(format!("Only GLB format is supported for export, got: {}", s)),
        }
    }
}

/// How many copies of a seamless patch to lay out, and how far apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tiling {
    pub count_x: usize,
    pub count_z: usize,
    pub spacing: f32, // Patch side length; stitched patches meet edge to edge
}

impl Tiling {
    pub fn single() -> Self {
        Self { count_x: 1, count_z: 1, spacing: 0.0 }
    }
}

/// Export a single patch.
pub fn export_mesh<W: Write>(mesh: &Mesh, _format: ExportFormat, writer: &mut W) -> io::Result<()> {
    mesh.export_glb(writer, Tiling::single())
}

/// Export a grid of patch instances sharing one mesh.
pub fn export_mesh_tiled<W: Write>(mesh: &Mesh, _format: ExportFormat, writer: &mut W, tiling: Tiling) -> io::Result<()> {
    mesh.export_glb(writer, tiling)
}

impl Mesh {
    /// Export the mesh to a GLB file
    pub fn save_glb<P: AsRef<Path>>(&self, path: P, tiling: Tiling) -> io::Result<()> {
        let mut file = File::create(path)?;
        self.export_glb(&mut file, tiling)
    }

    /// Export the mesh as GLB, writing to the provided writer
    ///
    /// # Arguments
    /// * `writer` - The writer to write the GLB data to
    /// * `tiling` - Number of instances along X and Z and their spacing
    pub fn export_glb<W: Write>(&self, writer: &mut W, tiling: Tiling) -> io::Result<()> {
        // mesh-tools only writes to paths
        let temp_dir = tempdir()?;
        let temp_file_path = temp_dir.path().join("ocean.glb");

        let mut builder = mesh_tools::GltfBuilder::new();

        let water_material = builder.create_metallic_material(
            Some("WaterMaterial".to_string()),
            [0.0, 0.4, 0.8, 0.8], // Blue water with transparency
            0.9,
            0.1,
        );

        if let Some(materials) = &mut builder.gltf.materials {
            if let Some(material) = materials.get_mut(water_material) {
                material.double_sided = Some(true);
                material.alpha_mode = Some("BLEND".to_string());
            }
        }

        let positions: Vec<_> = self
            .vertices
            .iter()
            .map(|v| mesh_tools::compat::point3::new(v.position.x, v.position.y, v.position.z))
            .collect();
        let normals: Vec<_> = self
            .vertices
            .iter()
            .map(|v| mesh_tools::compat::vector3::new(v.normal.x, v.normal.y, v.normal.z))
            .collect();
        let texcoords: Vec<_> = self
            .vertices
            .iter()
            .map(|v| mesh_tools::compat::vector2::new(v.uv.x, v.uv.y))
            .collect();

        let triangles: Vec<_> = self
            .faces
            .iter()
            .map(|face| mesh_tools::Triangle::new(face.0 as u32, face.1 as u32, face.2 as u32))
            .collect();

        let mesh_index = builder.create_simple_mesh(
            Some("OceanMesh".to_string()),
            &positions,
            &triangles,
            Some(normals),
            Some(texcoords),
            Some(water_material),
        );

        // Centre the whole tiled block on the origin
        let origin_x = -(tiling.count_x.saturating_sub(1) as f32) * tiling.spacing / 2.0;
        let origin_z = -(tiling.count_z.saturating_sub(1) as f32) * tiling.spacing / 2.0;

        let mut tile_nodes = Vec::with_capacity(tiling.count_x * tiling.count_z);
        for row in 0..tiling.count_z {
            for col in 0..tiling.count_x {
                let x_offset = origin_x + col as f32 * tiling.spacing;
                let z_offset = origin_z + row as f32 * tiling.spacing;

                let node_index = builder.add_node(
                    Some(format!("OceanTile_{}_{}", row, col)),
                    Some(mesh_index),
                    Some([x_offset, 0.0, z_offset]),
                    None,
                    None,
                );
                tile_nodes.push(node_index);
            }
        }

        let grid_parent = builder.add_node_with_children(
            Some("OceanGrid".to_string()),
            None,
            None,
            None,
            None,
            tile_nodes,
        );

        let scene_index = builder.add_scene(Some("OceanScene".to_string()), Some(vec![grid_parent]));
        builder.gltf.scene = Some(scene_index);

        let temp_file_str = temp_file_path
            .to_str()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Failed to convert path to string"))?;

        builder
            .export_glb(temp_file_str)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to export GLB: {}", e)))?;

        let glb_data = std::fs::read(&temp_file_path)?;
        writer.write_all(&glb_data)?;

        log::debug!(
            "exported {} vertices, {} faces as {}x{} tiles ({} bytes)",
            self.vertices.len(),
            self.faces.len(),
            tiling.count_x,
            tiling.count_z,
            glb_data.len()
        );

        Ok(())
    }
}
