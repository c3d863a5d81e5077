//! Orbit camera
//!
//! Spherical coordinates around a target with damped rotate and pan and an
//! immediate, clamped dolly.

use glam::{Mat4, Vec3};
use lattice_services::settings::CameraSettings;
use std::f32::consts::{PI, TAU};

const POLE_EPSILON: f32 = 1e-4;
/// Dolly factor per wheel line.
const ZOOM_STEP: f32 = 0.95;

pub struct OrbitCamera {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,

    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_scale: f32,

    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    min_distance: f32,
    max_distance: f32,
    damping: f32,
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let eye = Vec3::from_array(settings.position);
        let radius = eye.length().max(f32::EPSILON);
        let mut camera = Self {
            target: Vec3::ZERO,
            radius,
            theta: eye.x.atan2(eye.z),
            phi: (eye.y / radius).clamp(-1.0, 1.0).acos(),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            fov_y: settings.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: settings.near,
            far: settings.far,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            damping: settings.damping.clamp(0.0, 1.0),
        };
        camera.radius = camera.radius.clamp(camera.min_distance, camera.max_distance);
        camera
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Drag rotation in pixels; a drag across the full viewport height is a
    /// full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * dx / h;
        self.pending_phi -= TAU * dy / h;
    }

    /// Screen-space pan in pixels, scaled so the target tracks the pointer.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let target_distance = self.radius * (self.fov_y / 2.0).tan();
        let view = self.view();
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        self.pending_pan += right * (-2.0 * dx * target_distance / h);
        self.pending_pan += up * (2.0 * dy * target_distance / h);
    }

    /// Positive `lines` dolly in, negative dolly out.
    pub fn zoom(&mut self, lines: f32) {
        self.pending_scale *= ZOOM_STEP.powf(lines);
    }

    /// Apply pending input. Call once per frame.
    pub fn update(&mut self) {
        let k = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.theta = (self.theta + self.pending_theta * k).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_phi * k).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.target += self.pending_pan * k;
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.pending_theta *= 1.0 - k;
        self.pending_phi *= 1.0 - k;
        self.pending_pan *= 1.0 - k;
        self.pending_scale = 1.0;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_settings(&CameraSettings::default())
    }

    #[test]
    fn starts_at_configured_eye() {
        let cam = camera();
        assert!((cam.eye() - Vec3::new(0.0, 80.0, 200.0)).length() < 1e-3);
        assert_eq!(cam.target(), Vec3::ZERO);
    }

    #[test]
    fn zoom_clamps_to_min_distance() {
        let mut cam = camera();
        cam.zoom(500.0);
        cam.update();
        assert_eq!(cam.distance(), 20.0);
    }

    #[test]
    fn zoom_clamps_to_max_distance() {
        let mut cam = camera();
        for _ in 0..20 {
            cam.zoom(-100.0);
            cam.update();
        }
        assert_eq!(cam.distance(), 4500.0);
    }

    #[test]
    fn rotation_is_damped_but_converges() {
        let mut cam = camera();
        let start = cam.eye();
        cam.rotate(100.0, 0.0, 720.0);
        cam.update();
        let first = cam.eye();
        assert!((first - start).length() > 0.0);
        for _ in 0..500 {
            cam.update();
        }
        // Distance is preserved by rotation
        assert!((cam.eye().length() - start.length()).abs() < 1e-2);
        let settled = cam.eye();
        cam.update();
        assert!((cam.eye() - settled).length() < 1e-3);
    }

    #[test]
    fn polar_angle_never_flips() {
        let mut cam = camera();
        cam.rotate(0.0, 100_000.0, 720.0);
        for _ in 0..200 {
            cam.update();
        }
        assert!(cam.eye().y.abs() <= cam.distance());
        assert!(cam.view().is_finite());
    }

    #[test]
    fn pan_moves_target() {
        let mut cam = camera();
        cam.pan(50.0, 0.0, 720.0);
        for _ in 0..500 {
            cam.update();
        }
        assert!(cam.target().x < 0.0);
        assert!(cam.target().y.abs() < 1e-3);
    }

    #[test]
    fn projection_uses_viewport_aspect() {
        let mut cam = camera();
        cam.set_viewport(1000, 500);
        let p = cam.projection();
        assert!((p.y_axis.y / p.x_axis.x - 2.0).abs() < 1e-4);
    }
}
