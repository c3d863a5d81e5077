//! Scene components
//!
//! Each component builds its geometry once and refreshes its per-frame
//! parameters from [`FrameSignals`]. Components never write shared state.

pub mod constellations;
pub mod galaxy;
pub mod grid;
pub mod mesh;
pub mod moon;
pub mod starfield;

pub use constellations::{Constellation, Constellations};
pub use galaxy::{GalaxyField, GalaxyInstance, GalaxyPoint};
pub use grid::{GridParams, GridSpec, LatticeGrid};
pub use mesh::Mesh;
pub use moon::{MoonState, MoonSystem, SurfaceMaterial};
pub use starfield::{Star, Starfield, StarfieldSpec};

use crate::driver::FrameSignals;
use crate::math::{hex_to_linear, Vec3};
use rand::Rng;

pub const BACKGROUND_COLOR: u32 = 0x02040a;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Fixed lighting and atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub background: [f32; 3],
    pub ambient_intensity: f32,
    pub key_light: PointLight,
    pub fill_light: PointLight,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: hex_to_linear(BACKGROUND_COLOR),
            ambient_intensity: 0.5,
            key_light: PointLight {
                position: Vec3::splat(100.0),
                color: hex_to_linear(0xffeedd),
                intensity: 2.0,
            },
            fill_light: PointLight {
                position: Vec3::splat(-100.0),
                color: hex_to_linear(0x44aaff),
                intensity: 0.5,
            },
        }
    }
}

/// Construction parameters for the whole scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSpec {
    pub grid: GridSpec,
    pub starfield: StarfieldSpec,
    pub constellation_count: usize,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            starfield: StarfieldSpec::default(),
            constellation_count: constellations::DEFAULT_CONSTELLATION_COUNT,
        }
    }
}

pub struct Scene {
    pub environment: Environment,
    pub grid: LatticeGrid,
    pub moon: MoonSystem,
    pub galaxies: GalaxyField,
    pub constellations: Constellations,
    pub starfield: Starfield,
}

impl Scene {
    pub fn new<R: Rng>(spec: &SceneSpec, rng: &mut R) -> Self {
        Self {
            environment: Environment::default(),
            grid: LatticeGrid::new(spec.grid),
            moon: MoonSystem::new(),
            galaxies: GalaxyField::new(),
            constellations: Constellations::generate(spec.constellation_count, rng),
            starfield: Starfield::generate(&spec.starfield, rng),
        }
    }

    /// Refresh every time-driven component for this frame.
    pub fn update(&mut self, signals: &FrameSignals) {
        self.grid.update(signals);
        self.moon.update(signals);
        self.galaxies.update(signals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_spec() -> SceneSpec {
        SceneSpec {
            grid: GridSpec {
                divisions: 4,
                layers: 1,
                ..GridSpec::default()
            },
            starfield: StarfieldSpec {
                count: 100,
                ..StarfieldSpec::default()
            },
            constellation_count: 3,
        }
    }

    #[test]
    fn scene_builds_all_components() {
        let scene = Scene::new(&small_spec(), &mut StdRng::seed_from_u64(1));
        assert_eq!(scene.constellations.len(), 3);
        assert_eq!(scene.starfield.len(), 100);
        assert!(!scene.galaxies.is_ready());
        assert_eq!(scene.grid.vertices().len(), 5 * 4 * 3);
    }

    #[test]
    fn update_reaches_time_driven_components() {
        let mut scene = Scene::new(&small_spec(), &mut StdRng::seed_from_u64(1));
        let before = scene.constellations.line_vertices();
        let signals = FrameSignals::compute(9.0, 4.0);
        scene.update(&signals);
        assert_eq!(scene.grid.params().day, 9.0);
        assert_eq!(scene.moon.state().position, signals.moon_position);
        assert_eq!(scene.galaxies.rotation(), galaxy::field_rotation(4.0));
        assert_eq!(scene.constellations.line_vertices(), before);
    }
}
