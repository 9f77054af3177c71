//! # Primitive Shape Generation
//!
//! All shapes are centered at the origin, Y-up, and come with outward unit
//! normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a cube spanning `[-1, 1]` on every axis
///
/// Each face has its own four vertices so the normals stay flat.
pub fn generate_cube() -> GeometryData {
    #[rustfmt::skip]
    let positions = [
        // Front face
        [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
        // Back face
        [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
        // Left face
        [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
        // Right face
        [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
        // Top face
        [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
        // Bottom face
        [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    let mut data = GeometryData::new();
    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|&n| std::iter::repeat(n).take(4))
        .collect();

    // Two triangles per face
    data.indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    data
}

/// Generate a unit UV sphere
///
/// # Arguments
/// * `latitude_bands` - Number of horizontal bands from pole to pole (at least 2)
/// * `longitude_bands` - Number of vertical bands around the Y axis (at least 3)
///
/// The seam column is duplicated, giving `(lat + 1) * (lon + 1)` vertices.
pub fn generate_sphere(latitude_bands: u32, longitude_bands: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let lat_bands = latitude_bands.max(2);
    let lon_bands = longitude_bands.max(3);

    for lat in 0..=lat_bands {
        let theta = lat as f32 * PI / lat_bands as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=lon_bands {
            let phi = lon as f32 * 2.0 * PI / lon_bands as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let position = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            data.vertices.push(position);
            data.normals.push(position); // Normal is same as position for unit sphere
        }
    }

    for lat in 0..lat_bands {
        for lon in 0..lon_bands {
            let first = lat * (lon_bands + 1) + lon;
            let second = first + lon_bands + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate an open unit cylinder along the Y axis
///
/// # Arguments
/// * `segments` - Number of segments around the circumference (at least 3)
///
/// Only the side wall is generated; the ends are left open. Vertices come in
/// bottom/top pairs with radial normals.
pub fn generate_cylinder(segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (z, x) = angle.sin_cos();

        data.vertices.push([x, -1.0, z]);
        data.vertices.push([x, 1.0, z]);
        data.normals.push([x, 0.0, z]);
        data.normals.push([x, 0.0, z]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let next_bottom = bottom + 2;

        data.indices.extend_from_slice(&[bottom, bottom + 1, next_bottom + 1]);
        data.indices.extend_from_slice(&[bottom, next_bottom + 1, next_bottom]);
    }

    data
}
