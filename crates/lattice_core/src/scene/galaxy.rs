//! Instanced galaxy field

use crate::driver::FrameSignals;
use crate::math::{Mat4, Vec3};

/// Rotation of the whole field about Y, radians per second.
pub const FIELD_SPIN_Y: f32 = 0.005;
/// Rotation of the whole field about Z, radians per second.
pub const FIELD_SPIN_Z: f32 = 0.002;

/// One catalogued galaxy. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyPoint {
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
    pub size: f32,
}

/// Per-instance data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyInstance {
    /// xyz position, w uniform scale.
    pub position_size: [f32; 4],
    pub color: [f32; 3],
}

impl From<&GalaxyPoint> for GalaxyInstance {
    fn from(point: &GalaxyPoint) -> Self {
        Self {
            position_size: [point.position.x, point.position.y, point.position.z, point.size],
            color: point.color,
        }
    }
}

/// Galaxies are absent until the dataset resolves, then fixed.
#[derive(Default)]
pub struct GalaxyField {
    instances: Vec<GalaxyInstance>,
    ready: bool,
    rotation: Mat4,
}

impl GalaxyField {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            ready: false,
            rotation: Mat4::IDENTITY,
        }
    }

    /// One-time geometry construction from the loaded dataset.
    pub fn populate(&mut self, points: &[GalaxyPoint]) {
        self.instances = points.iter().map(GalaxyInstance::from).collect();
        self.ready = true;
        tracing::info!(count = self.instances.len(), "Galaxy field populated");
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn instances(&self) -> &[GalaxyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Nothing to draw before load or for an empty dataset.
    pub fn is_visible(&self) -> bool {
        self.ready && !self.instances.is_empty()
    }

    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }

    /// Slow constant spin driven by wall time only.
    pub fn update(&mut self, signals: &FrameSignals) {
        self.rotation = field_rotation(signals.elapsed);
    }
}

pub fn field_rotation(elapsed: f32) -> Mat4 {
    Mat4::from_rotation_y(elapsed * FIELD_SPIN_Y) * Mat4::from_rotation_z(elapsed * FIELD_SPIN_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, size: f32) -> GalaxyPoint {
        GalaxyPoint {
            position: Vec3::new(x, 1.0, -2.0),
            color: [1.0, 0.5, 0.0],
            size,
        }
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let mut field = GalaxyField::new();
        field.populate(&[]);
        assert!(field.is_ready());
        assert_eq!(field.instance_count(), 0);
        assert!(!field.is_visible());
    }

    #[test]
    fn not_visible_before_load() {
        let field = GalaxyField::new();
        assert!(!field.is_ready());
        assert!(!field.is_visible());
    }

    #[test]
    fn one_instance_per_point() {
        let mut field = GalaxyField::new();
        field.populate(&[point(1.0, 0.5), point(3.0, 2.0)]);
        assert_eq!(field.instance_count(), 2);
        assert_eq!(field.instances()[1].position_size, [3.0, 1.0, -2.0, 2.0]);
        assert!(field.is_visible());
    }

    #[test]
    fn rotation_ignores_day() {
        let mut a = GalaxyField::new();
        let mut b = GalaxyField::new();
        a.update(&FrameSignals::compute(1.0, 10.0));
        b.update(&FrameSignals::compute(20.0, 10.0));
        assert_eq!(a.rotation(), b.rotation());
        assert_eq!(field_rotation(0.0), Mat4::IDENTITY);
    }
}
