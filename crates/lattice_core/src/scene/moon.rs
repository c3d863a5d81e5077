//! Moon, tether and the bodies at the origin

use super::mesh::{open_cylinder, uv_sphere, Mesh};
use crate::driver::FrameSignals;
use crate::math::{hex_to_linear, Mat4, Quat, Vec3};
use crate::resonance::{halo_opacity, MOON_ORBIT_RADIUS};

pub const CORE_RADIUS: f32 = 10.0;
pub const HALO_RADIUS: f32 = 12.0;
pub const MOON_RADIUS: f32 = 2.0;

/// Radius of the tether where it meets the moon.
pub const TETHER_RADIUS_MOON: f32 = 2.0;
/// Radius of the tether at its far end.
pub const TETHER_RADIUS_FAR: f32 = 0.2;
pub const TETHER_LENGTH: f32 = MOON_ORBIT_RADIUS;

/// Moon self-rotation per rendered frame, radians.
pub const MOON_SPIN_PER_FRAME: f32 = 0.01;

pub const CORE_COLOR: u32 = 0x113355;
pub const CORE_EMISSIVE: u32 = 0x002244;
pub const CORE_EMISSIVE_INTENSITY: f32 = 0.2;
pub const MOON_COLOR: u32 = 0xdddddd;

/// Flat material description for lit bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
}

impl SurfaceMaterial {
    fn new(color: u32, emissive: u32, intensity: f32) -> Self {
        let e = hex_to_linear(emissive);
        Self {
            color: hex_to_linear(color),
            emissive: [e[0] * intensity, e[1] * intensity, e[2] * intensity],
        }
    }
}

/// Per-frame state of the moon system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    pub position: Vec3,
    /// Accumulated self-rotation about Y.
    pub spin: f32,
    /// Flash pulse shared by the tether and the halo.
    pub resonance: f32,
    pub elapsed: f32,
    pub halo_opacity: f32,
}

impl Default for MoonState {
    fn default() -> Self {
        Self {
            position: Vec3::new(MOON_ORBIT_RADIUS, 0.0, 0.0),
            spin: 0.0,
            resonance: 0.0,
            elapsed: 0.0,
            halo_opacity: 0.0,
        }
    }
}

pub struct MoonSystem {
    core: Mesh,
    halo: Mesh,
    moon: Mesh,
    tether: Mesh,
    state: MoonState,
}

impl MoonSystem {
    pub fn new() -> Self {
        Self {
            core: uv_sphere(CORE_RADIUS, 32, 32),
            halo: uv_sphere(HALO_RADIUS, 32, 32),
            moon: uv_sphere(MOON_RADIUS, 16, 16),
            tether: open_cylinder(TETHER_RADIUS_FAR, TETHER_RADIUS_MOON, TETHER_LENGTH, 16),
            state: MoonState::default(),
        }
    }

    pub fn core_mesh(&self) -> &Mesh {
        &self.core
    }

    pub fn halo_mesh(&self) -> &Mesh {
        &self.halo
    }

    pub fn moon_mesh(&self) -> &Mesh {
        &self.moon
    }

    pub fn tether_mesh(&self) -> &Mesh {
        &self.tether
    }

    pub fn core_material(&self) -> SurfaceMaterial {
        SurfaceMaterial::new(CORE_COLOR, CORE_EMISSIVE, CORE_EMISSIVE_INTENSITY)
    }

    pub fn moon_material(&self) -> SurfaceMaterial {
        SurfaceMaterial::new(MOON_COLOR, 0x000000, 0.0)
    }

    pub fn state(&self) -> MoonState {
        self.state
    }

    pub fn update(&mut self, signals: &FrameSignals) {
        self.state = MoonState {
            position: signals.moon_position,
            spin: self.state.spin + MOON_SPIN_PER_FRAME,
            resonance: signals.resonance,
            elapsed: signals.elapsed,
            halo_opacity: halo_opacity(signals.resonance),
        };
    }

    pub fn moon_transform(&self) -> Mat4 {
        Mat4::from_translation(self.state.position) * Mat4::from_rotation_y(self.state.spin)
    }

    /// Places the tether with its wide end on the moon and its narrow end at
    /// the origin.
    pub fn tether_transform(&self) -> Mat4 {
        let position = self.state.position;
        let inward = (-position).try_normalize().unwrap_or(Vec3::NEG_X);
        let rotation = Quat::from_rotation_arc(Vec3::Y, inward);
        let center = position + inward * (TETHER_LENGTH / 2.0);
        Mat4::from_rotation_translation(rotation, center)
    }
}

impl Default for MoonSystem {
    fn default() -> Self {
        Self::new()
    }
}
