//! WGSL sources
//!
//! Scene shaders share `common.wgsl` and a prelude of constants taken from
//! the resonance model, so the GPU and CPU formulas cannot drift apart.

use lattice_core::resonance::{BEAT_SCALE, GRID_CORE_RADIUS, GRID_FADE_DISTANCE};
use lattice_core::time::LATTICE_PERIOD_DAYS;
use std::borrow::Cow;

const COMMON: &str = include_str!("common.wgsl");
const GRID: &str = include_str!("grid.wgsl");
const MESH: &str = include_str!("mesh.wgsl");
const GALAXY: &str = include_str!("galaxy.wgsl");
const STARS: &str = include_str!("stars.wgsl");
const LINES: &str = include_str!("lines.wgsl");
const HUD: &str = include_str!("hud.wgsl");

/// Smallest on-screen star, in pixels.
pub const MIN_STAR_PIXELS: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Grid,
    Mesh,
    Galaxy,
    Stars,
    Lines,
    Hud,
}

impl ShaderKind {
    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Grid => "grid shader",
            ShaderKind::Mesh => "mesh shader",
            ShaderKind::Galaxy => "galaxy shader",
            ShaderKind::Stars => "star shader",
            ShaderKind::Lines => "line shader",
            ShaderKind::Hud => "hud shader",
        }
    }
}

fn prelude() -> String {
    // Debug formatting keeps the decimal point, which WGSL f32 literals need.
    format!(
        "const LATTICE_PERIOD_DAYS: f32 = {LATTICE_PERIOD_DAYS:?};\n\
         const BEAT_SCALE: f32 = {BEAT_SCALE:?};\n\
         const GRID_FADE_DISTANCE: f32 = {GRID_FADE_DISTANCE:?};\n\
         const GRID_CORE_RADIUS: f32 = {GRID_CORE_RADIUS:?};\n\
         const MIN_STAR_PIXELS: f32 = {MIN_STAR_PIXELS:?};\n"
    )
}

pub fn source(kind: ShaderKind) -> String {
    let body = match kind {
        ShaderKind::Hud => return HUD.to_string(),
        ShaderKind::Grid => GRID,
        ShaderKind::Mesh => MESH,
        ShaderKind::Galaxy => GALAXY,
        ShaderKind::Stars => STARS,
        ShaderKind::Lines => LINES,
    };
    format!("{}\n{COMMON}\n{body}", prelude())
}

pub fn module(device: &wgpu::Device, kind: ShaderKind) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(kind.label()),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(source(kind))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_literals_are_floats() {
        let p = prelude();
        assert!(p.contains("const BEAT_SCALE: f32 = 100.0;"));
        assert!(p.contains("const LATTICE_PERIOD_DAYS: f32 = 29.33;"));
    }

    #[test]
    fn scene_shaders_share_common() {
        for kind in [
            ShaderKind::Grid,
            ShaderKind::Mesh,
            ShaderKind::Galaxy,
            ShaderKind::Stars,
            ShaderKind::Lines,
        ] {
            let src = source(kind);
            assert!(src.contains("struct Frame"), "{kind:?}");
            assert!(src.contains("fn vs_main"), "{kind:?}");
        }
        assert!(!source(ShaderKind::Hud).contains("struct Frame"));
    }

    #[test]
    fn halo_fragment_is_fogged() {
        let src = source(ShaderKind::Mesh);
        let start = src.find("fn fs_basic").unwrap();
        let end = start + src[start..].find("\n}").unwrap();
        assert!(src[start..end].contains("apply_fog("));
    }
}
