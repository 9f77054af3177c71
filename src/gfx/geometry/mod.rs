//! # Procedural Geometry Generation
//!
//! This module generates the meshes the viewer displays, so no model files
//! are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Axis-aligned cube spanning `[-1, 1]` with per-face normals
//! - **Sphere**: Unit UV sphere with configurable latitude/longitude bands
//! - **Cylinder**: Open unit cylinder along the Y axis, `y` in `[-1, 1]`
//!
//! ## Usage
//!
//! ```rust
//! use flyview::gfx::geometry::{generate_cube, generate_cylinder, generate_sphere};
//!
//! let cube = generate_cube();
//! let sphere = generate_sphere(32, 32);
//! let cylinder = generate_cylinder(32);
//!
//! assert_eq!(cube.triangle_count(), 12);
//! assert_eq!(sphere.vertex_count(), 33 * 33);
//! assert_eq!(cylinder.triangle_count(), 64);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
