//! Procedural mesh generation for the shapes the viewer draws.
//!
//! All meshes are centered at the origin with outward normals; sizing
//! happens per instance through the model matrix.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// CPU-side mesh: vertices plus triangle-list indices.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Unit cube, 1.0 across, four vertices per face for hard normals.
pub fn cube() -> MeshData {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    MeshData { vertices, indices }
}

/// Unit-radius UV sphere.
pub fn uv_sphere(longitude_segments: u32, latitude_segments: u32) -> MeshData {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let mut vertices = Vec::new();
    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            // Unit sphere: the normal equals the position.
            let n = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            vertices.push(Vertex {
                position: n,
                normal: n,
            });
        }
    }

    let mut indices = Vec::new();
    let stride = long_segs + 1;
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let a = lat * stride + long;
            let b = a + stride;
            // Counter-clockwise seen from outside.
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    MeshData { vertices, indices }
}

/// Torus in the XZ plane: `radius` from center to tube center, `tube` the
/// tube radius.
pub fn torus(radius: f32, tube: f32, major_segments: u32, tube_segments: u32) -> MeshData {
    let major_segs = major_segments.max(3);
    let tube_segs = tube_segments.max(3);

    let mut vertices = Vec::new();
    for major in 0..=major_segs {
        let u = major as f32 * TAU / major_segs as f32;
        let (sin_u, cos_u) = u.sin_cos();
        for minor in 0..=tube_segs {
            let v = minor as f32 * TAU / tube_segs as f32;
            let (sin_v, cos_v) = v.sin_cos();
            let ring = radius + tube * cos_v;
            vertices.push(Vertex {
                position: [ring * cos_u, tube * sin_v, ring * sin_u],
                normal: [cos_v * cos_u, sin_v, cos_v * sin_u],
            });
        }
    }

    let mut indices = Vec::new();
    let stride = tube_segs + 1;
    for major in 0..major_segs {
        for minor in 0..tube_segs {
            let a = major * stride + minor;
            let b = a + stride;
            // Counter-clockwise seen from outside.
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn cube_has_six_faces() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            assert!((length(v.normal) - 1.0).abs() < 1e-6);
            // Unit cube spans ±0.5.
            assert!(v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6));
        }
    }

    #[test]
    fn sphere_vertices_sit_on_unit_radius() {
        let mesh = uv_sphere(32, 16);
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        for v in &mesh.vertices {
            assert!((length(v.position) - 1.0).abs() < 1e-5);
            assert!((length(v.normal) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = uv_sphere(8, 4);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|i| *i < count));
    }

    #[test]
    fn degenerate_segment_counts_are_clamped() {
        let mesh = uv_sphere(0, 0);
        assert!(!mesh.vertices.is_empty());
        let mesh = torus(0.5, 0.2, 0, 0);
        assert!(!mesh.vertices.is_empty());
    }

    #[test]
    fn torus_vertices_stay_within_bounds() {
        let radius = 0.5;
        let tube = 0.2;
        let mesh = torus(radius, tube, 32, 16);
        for v in &mesh.vertices {
            let planar = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!(planar <= radius + tube + 1e-5);
            assert!(v.position[1].abs() <= tube + 1e-5);
            assert!((length(v.normal) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_indices_in_range() {
        let mesh = torus(0.5, 0.2, 12, 8);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|i| *i < count));
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}
