//! Procedural primitive meshes

use crate::math::{Vec2, Vec3};
use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as a line list, for wireframe drawing.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.extend_from_slice(&[key.0, key.1]);
                }
            }
        }
        lines
    }
}

/// UV sphere centred on the origin.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = Mesh::default();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push(normal * radius);
            mesh.normals.push(normal.normalize_or_zero());
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Open-ended tapered cylinder along +Y, centred on the origin.
///
/// `uv.y` is 0 along the bottom ring and 1 along the top ring.
pub fn open_cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let segments = radial_segments.max(3);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = Mesh::default();

    for ring in 0..=1u32 {
        let v = ring as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let theta = u * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.positions
                .push(Vec3::new(radius * sin, -v * height + half, radius * cos));
            mesh.normals.push(Vec3::new(sin, slope, cos).normalize());
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    let row = segments + 1;
    for ix in 0..segments {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let mesh = uv_sphere(2.0, 16, 16);
        assert_eq!(mesh.vertex_count(), 17 * 17);
        // Poles contribute one triangle per segment instead of two.
        assert_eq!(mesh.triangle_count(), 16 * 16 * 2 - 2 * 16);
        assert!(mesh
            .positions
            .iter()
            .all(|p| (p.length() - 2.0).abs() < 1e-4));
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = uv_sphere(1.0, 8, 6);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn cylinder_tapers_from_bottom_to_top() {
        let mesh = open_cylinder(0.2, 2.0, 40.0, 16);
        assert_eq!(mesh.vertex_count(), 2 * 17);
        assert_eq!(mesh.triangle_count(), 2 * 16);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            let r = Vec2::new(p.x, p.z).length();
            if p.y > 0.0 {
                assert!((r - 0.2).abs() < 1e-4);
                assert_eq!(uv.y, 1.0);
            } else {
                assert!((r - 2.0).abs() < 1e-4);
                assert_eq!(uv.y, 0.0);
            }
        }
    }

    #[test]
    fn wireframe_has_unique_edges() {
        let mesh = uv_sphere(1.0, 8, 4);
        let lines = mesh.wireframe_indices();
        assert_eq!(lines.len() % 2, 0);
        let mut edges: Vec<_> = lines.chunks_exact(2).map(|e| (e[0], e[1])).collect();
        let total = edges.len();
        edges.sort_unstable();
        edges.dedup();
        assert_eq!(edges.len(), total);
    }
}
