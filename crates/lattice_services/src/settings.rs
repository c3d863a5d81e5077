//! Settings management
//!
//! Optional `lattice.json` next to the binary's working directory. Every
//! section has defaults, so a file only needs the values it changes.

use lattice_asset::color::parse_css_color;
use lattice_core::math::hex_to_linear;
use lattice_core::scene::{GridSpec, SceneSpec, StarfieldSpec};
use lattice_core::time::DEFAULT_DAYS_PER_SECOND;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "lattice.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub playback: PlaybackSettings,
    pub lattice: LatticeSettings,
    pub dataset: DatasetSettings,
    pub constellations: ConstellationSettings,
    pub starfield: StarfieldSettings,
    /// Seed for decorative generation; random when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view, degrees.
    pub fov_degrees: f32,
    pub position: [f32; 3],
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub days_per_second: f32,
    pub start_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    pub size: f32,
    pub divisions: u32,
    pub layers: u32,
    pub layer_spacing: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationSettings {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            playback: PlaybackSettings::default(),
            lattice: LatticeSettings::default(),
            dataset: DatasetSettings::default(),
            constellations: ConstellationSettings::default(),
            starfield: StarfieldSettings::default(),
            seed: None,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "3D Temporal Lattice".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            position: [0.0, 80.0, 200.0],
            near: 0.1,
            far: 10_000.0,
            min_distance: 20.0,
            max_distance: 4500.0,
            damping: 0.05,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            days_per_second: DEFAULT_DAYS_PER_SECOND,
            start_playing: true,
        }
    }
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            size: 1200.0,
            divisions: 160,
            layers: 5,
            layer_spacing: 50.0,
            color: "#3366ff".to_string(),
        }
    }
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/galaxies.json"),
        }
    }
}

impl Default for ConstellationSettings {
    fn default() -> Self {
        Self { count: 12 }
    }
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            radius: 2500.0,
            depth: 500.0,
            count: 12_000,
            factor: 8.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Defaults when the file is absent; defaults plus a warning when it is
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No {} found, using default settings", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Construction parameters for the scene components.
    pub fn scene_spec(&self) -> SceneSpec {
        let color = parse_css_color(&self.lattice.color).unwrap_or_else(|| {
            tracing::warn!(color = %self.lattice.color, "Unreadable lattice colour, using #3366ff");
            hex_to_linear(0x3366ff)
        });
        let requested = GridSpec {
            size: self.lattice.size,
            divisions: self.lattice.divisions,
            layers: self.lattice.layers,
            layer_spacing: self.lattice.layer_spacing,
            color,
        };
        let grid = requested.clamped();
        if grid != requested {
            tracing::warn!(
                layers = self.lattice.layers,
                divisions = self.lattice.divisions,
                "Lattice too large, using {} layers and {} divisions",
                grid.layers,
                grid.divisions
            );
        }
        SceneSpec {
            grid,
            starfield: StarfieldSpec {
                radius: self.starfield.radius,
                depth: self.starfield.depth,
                count: self.starfield.count,
                factor: self.starfield.factor,
                saturation: 0.0,
            },
            constellation_count: self.constellations.count,
        }
    }
}
