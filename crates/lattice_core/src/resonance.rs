//! Resonance model
//!
//! Closed-form functions of the simulated day. The renderer evaluates the
//! same formulas in WGSL; the CPU versions here are what the rest of the
//! crate (and the tests) rely on.

use crate::math::{mix, Vec3};
use crate::time::{LATTICE_PERIOD_DAYS, LUNAR_PERIOD_DAYS};
use std::f32::consts::TAU;

/// Radius of the moon orbit, in world units.
pub const MOON_ORBIT_RADIUS: f32 = 40.0;

/// Scales the beat envelope so a handful of pulses fit inside one month.
pub const BEAT_SCALE: f32 = 100.0;

/// Grid alpha reaches zero at this distance from the origin.
pub const GRID_FADE_DISTANCE: f32 = 4500.0;

/// Inside this radius the grid fades toward the origin.
pub const GRID_CORE_RADIUS: f32 = 50.0;

pub const FOG_NEAR: f32 = 100.0;
pub const FOG_FAR: f32 = 4000.0;

const TETHER_COLD: Vec3 = Vec3::new(0.2, 0.5, 1.0);
const TETHER_HOT: Vec3 = Vec3::new(1.0, 1.0, 0.5);

/// `|1/29.33 - 1/29.53|`, cycles per day.
pub fn beat_frequency() -> f32 {
    let lattice = 1.0 / LATTICE_PERIOD_DAYS;
    let moon = 1.0 / LUNAR_PERIOD_DAYS;
    (lattice - moon).abs()
}

/// Beat envelope in `[-1, 1]`.
pub fn beat_phase(day: f32) -> f32 {
    (day * beat_frequency() * TAU * BEAT_SCALE).sin()
}

/// Sharp pulse driving the moon tether and the origin halo.
///
/// The tenth power is even, so the pulse fires near both extremes of the
/// envelope.
pub fn flash_resonance(day: f32) -> f32 {
    flash_from_phase(beat_phase(day))
}

/// Half-wave rectified envelope driving the grid highlight.
pub fn grid_resonance(day: f32) -> f32 {
    grid_from_phase(beat_phase(day))
}

fn flash_from_phase(phase: f32) -> f32 {
    phase.powi(10).max(0.0)
}

fn grid_from_phase(phase: f32) -> f32 {
    phase.max(0.0)
}

/// Moon position on its orbit. Exactly one revolution per lunar period.
pub fn moon_position(day: f32) -> Vec3 {
    let angle = (day / LUNAR_PERIOD_DAYS) * TAU;
    Vec3::new(
        MOON_ORBIT_RADIUS * angle.cos(),
        0.0,
        MOON_ORBIT_RADIUS * angle.sin(),
    )
}

/// Travelling-wave phase of the lattice at world `(x, z)`.
pub fn lattice_phase(day: f32, x: f32, z: f32) -> f32 {
    day / LATTICE_PERIOD_DAYS * BEAT_SCALE + 0.01 * (x + z)
}

/// Vertical displacement applied to a lattice vertex at world `(x, z)`.
pub fn lattice_displacement(day: f32, x: f32, z: f32) -> f32 {
    let phase = lattice_phase(day, x, z);
    45.0 * phase.sin() + 15.0 * (phase * 0.5).cos()
}

/// Shaded grid sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFragment {
    pub color: Vec3,
    pub alpha: f32,
}

/// Colour of the grid at undisplaced position `position`.
pub fn grid_fragment(position: Vec3, base: Vec3, intensity: f32, elapsed: f32) -> GridFragment {
    let distance = position.length();
    let mut alpha = (1.0 - distance / GRID_FADE_DISTANCE).clamp(0.0, 1.0);
    let pulse = (elapsed * 2.0).sin() * 0.5 + 0.5;
    let color = mix(base, Vec3::ONE, intensity * pulse);
    if distance < GRID_CORE_RADIUS {
        alpha *= distance / GRID_CORE_RADIUS;
    }
    GridFragment {
        color,
        alpha: alpha * 0.4,
    }
}

/// Shaded tether sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetherFragment {
    pub color: Vec3,
    pub alpha: f32,
}

/// Tether colour at conduit coordinate `v` (0 at the moon, 1 at the far end).
pub fn tether_fragment(v: f32, resonance: f32, elapsed: f32) -> TetherFragment {
    let falloff = 1.0 - v;
    let glow = (elapsed * 10.0 - v * 20.0).sin() * 0.5 + 0.5;
    TetherFragment {
        color: mix(TETHER_COLD, TETHER_HOT, resonance),
        alpha: falloff * glow * resonance * 0.8,
    }
}

/// Opacity of the flash halo around the origin.
pub fn halo_opacity(resonance: f32) -> f32 {
    resonance * 0.4
}

/// Linear fog blend factor at view distance `distance` (0 = no fog).
pub fn fog_factor(distance: f32) -> f32 {
    ((distance - FOG_NEAR) / (FOG_FAR - FOG_NEAR)).clamp(0.0, 1.0)
}
