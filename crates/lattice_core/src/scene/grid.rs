//! Temporal lattice grid
//!
//! Stacked line-segment planes. Geometry is built once and stays flat on the
//! CPU; the vertex shader applies the travelling-wave displacement.

use crate::driver::FrameSignals;
use crate::math::Vec3;

/// Upper bound on planes above (and below) the origin plane.
pub const MAX_LAYERS: u32 = 64;

/// Upper bound on cells per plane edge.
pub const MAX_DIVISIONS: u32 = 4096;

/// Shape of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Edge length of each plane.
    pub size: f32,
    /// Cells per edge.
    pub divisions: u32,
    /// Planes above (and below) the origin plane.
    pub layers: u32,
    pub layer_spacing: f32,
    /// Linear RGB.
    pub color: [f32; 3],
}

impl GridSpec {
    /// Copy with `layers` and `divisions` pulled into the buildable range.
    pub fn clamped(self) -> Self {
        Self {
            layers: self.layers.min(MAX_LAYERS),
            divisions: self.divisions.clamp(1, MAX_DIVISIONS),
            ..self
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: 1200.0,
            divisions: 160,
            layers: 5,
            layer_spacing: 50.0,
            color: crate::math::hex_to_linear(0x3366ff),
        }
    }
}

/// Uniform values for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridParams {
    pub time: f32,
    pub day: f32,
    pub resonance_intensity: f32,
}

pub struct LatticeGrid {
    spec: GridSpec,
    vertices: Vec<Vec3>,
    params: GridParams,
}

impl LatticeGrid {
    pub fn new(spec: GridSpec) -> Self {
        let spec = spec.clamped();
        let vertices = build_vertices(&spec);
        tracing::debug!(
            planes = spec.layers * 2 + 1,
            vertices = vertices.len(),
            "Built lattice grid"
        );
        Self {
            spec,
            vertices,
            params: GridParams::default(),
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Line-list vertices, two per segment.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn params(&self) -> GridParams {
        self.params
    }

    pub fn update(&mut self, signals: &FrameSignals) {
        self.params = GridParams {
            time: signals.elapsed,
            day: signals.day,
            resonance_intensity: signals.resonance_intensity,
        };
    }
}

fn build_vertices(spec: &GridSpec) -> Vec<Vec3> {
    let divisions = spec.divisions;
    let step = spec.size / divisions as f32;
    let half = spec.size / 2.0;

    let mut plane = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        plane.push(Vec3::new(-half, 0.0, offset));
        plane.push(Vec3::new(half, 0.0, offset));
        plane.push(Vec3::new(offset, 0.0, -half));
        plane.push(Vec3::new(offset, 0.0, half));
    }

    let layers = spec.layers as i32;
    let mut vertices = Vec::with_capacity(plane.len() * (2 * layers as usize + 1));
    for layer in -layers..=layers {
        let y = layer as f32 * spec.layer_spacing;
        vertices.extend(plane.iter().map(|v| Vec3::new(v.x, v.y + y, v.z)));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lattice_vertex_count() {
        let grid = LatticeGrid::new(GridSpec::default());
        // 161 lines each way, two endpoints, eleven planes
        assert_eq!(grid.vertices().len(), 161 * 4 * 11);
    }

    #[test]
    fn planes_are_symmetric_about_origin() {
        let spec = GridSpec {
            size: 100.0,
            divisions: 4,
            layers: 2,
            layer_spacing: 10.0,
            ..GridSpec::default()
        };
        let grid = LatticeGrid::new(spec);
        let mut heights: Vec<i32> = grid.vertices().iter().map(|v| v.y as i32).collect();
        heights.sort_unstable();
        heights.dedup();
        assert_eq!(heights, vec![-20, -10, 0, 10, 20]);
    }

    #[test]
    fn plane_spans_full_size() {
        let spec = GridSpec {
            size: 100.0,
            divisions: 4,
            layers: 0,
            ..GridSpec::default()
        };
        let grid = LatticeGrid::new(spec);
        let max_x = grid.vertices().iter().map(|v| v.x).fold(f32::MIN, f32::max);
        let min_z = grid.vertices().iter().map(|v| v.z).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 50.0);
        assert_eq!(min_z, -50.0);
    }

    #[test]
    fn update_copies_frame_values() {
        let mut grid = LatticeGrid::new(GridSpec {
            divisions: 2,
            layers: 0,
            ..GridSpec::default()
        });
        let signals = FrameSignals::compute(12.0, 3.5);
        grid.update(&signals);
        let p = grid.params();
        assert_eq!(p.day, 12.0);
        assert_eq!(p.time, 3.5);
        assert_eq!(p.resonance_intensity, signals.resonance_intensity);
    }

    #[test]
    fn oversized_spec_is_clamped() {
        let spec = GridSpec {
            divisions: 0,
            layers: u32::MAX,
            ..GridSpec::default()
        };
        let grid = LatticeGrid::new(spec);
        assert_eq!(grid.spec().layers, MAX_LAYERS);
        assert_eq!(grid.spec().divisions, 1);
        // Two lines each way, two endpoints, one plane per layer
        assert_eq!(grid.vertices().len(), 2 * 4 * (2 * MAX_LAYERS as usize + 1));
    }
}
