//! Galaxy dataset
//!
//! A JSON array of `{x, y, z, color, size}` records, read once at startup.

use crate::color::{parse_css_color, FALLBACK_COLOR};
use crate::AssetError;
use lattice_core::math::Vec3;
use lattice_core::scene::GalaxyPoint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// One record as stored in the dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: String,
    pub size: f32,
}

impl GalaxyRecord {
    pub fn to_point(&self) -> GalaxyPoint {
        let color = parse_css_color(&self.color).unwrap_or_else(|| {
            tracing::warn!(color = %self.color, "Unreadable galaxy colour, using white");
            FALLBACK_COLOR
        });
        GalaxyPoint {
            position: Vec3::new(self.x, self.y, self.z),
            color,
            size: self.size,
        }
    }
}

pub fn parse_galaxies(json: &str) -> Result<Vec<GalaxyPoint>, AssetError> {
    let records: Vec<GalaxyRecord> = serde_json::from_str(json)?;
    Ok(records.iter().map(GalaxyRecord::to_point).collect())
}

pub fn load_galaxies(path: &Path) -> Result<Vec<GalaxyPoint>, AssetError> {
    let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_galaxies(&json)
}

/// Loads the dataset on a background thread.
///
/// Resolves exactly once. A failed load is logged and resolves to an empty
/// dataset; there is no retry.
pub struct GalaxyLoader {
    receiver: Option<Receiver<Vec<GalaxyPoint>>>,
}

impl GalaxyLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let points = match load_galaxies(&path) {
                Ok(points) => points,
                Err(err) => {
                    tracing::error!("Error loading galaxies: {err}");
                    Vec::new()
                }
            };
            // The viewer may already be gone.
            let _ = sender.send(points);
        });
        Self {
            receiver: Some(receiver),
        }
    }

    /// A loader that has already resolved, for tests and offline use.
    pub fn ready(points: Vec<GalaxyPoint>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(points);
        Self {
            receiver: Some(receiver),
        }
    }

    /// Non-blocking. Returns the dataset on the first call after it resolves,
    /// `None` before and after.
    pub fn poll(&mut self) -> Option<Vec<GalaxyPoint>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(points) => {
                self.receiver = None;
                Some(points)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Galaxy loader exited without a result");
                self.receiver = None;
                Some(Vec::new())
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(loader: &mut GalaxyLoader) -> Vec<GalaxyPoint> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(points) = loader.poll() {
                return points;
            }
            assert!(Instant::now() < deadline, "loader never resolved");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn parses_records() {
        let json = r##"[
            {"x": 1.0, "y": 2.0, "z": 3.0, "color": "#88ccff", "size": 1.2},
            {"x": -4.5, "y": 0.0, "z": 10.0, "color": "#ff4444", "size": 3.0}
        ]"##;
        let points = parse_galaxies(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(points[1].size, 3.0);
        assert_eq!(points[1].color, parse_css_color("#ff4444").unwrap());
    }

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(parse_galaxies("[]").unwrap().is_empty());
    }

    #[test]
    fn bad_colour_keeps_record() {
        let json = r#"[{"x": 0, "y": 0, "z": 0, "color": "sparkly", "size": 1}]"#;
        let points = parse_galaxies(json).unwrap();
        assert_eq!(points[0].color, FALLBACK_COLOR);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_galaxies("{not json"), Err(AssetError::Json(_))));
        assert!(parse_galaxies(r#"[{"x": 1}]"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_galaxies(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.json"));
    }

    #[test]
    fn failed_load_resolves_once_to_empty() {
        let mut loader = GalaxyLoader::spawn("definitely/not/here.json");
        assert!(wait_for(&mut loader).is_empty());
        assert!(!loader.is_pending());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("lattice-galaxies-{}.json", std::process::id()));
        std::fs::write(&path, r##"[{"x": 5, "y": 6, "z": 7, "color": "#ffcc00", "size": 2}]"##).unwrap();
        let mut loader = GalaxyLoader::spawn(&path);
        let points = wait_for(&mut loader);
        std::fs::remove_file(&path).ok();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].position, Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn ready_loader_resolves_immediately() {
        let mut loader = GalaxyLoader::ready(Vec::new());
        assert_eq!(loader.poll(), Some(Vec::new()));
        assert_eq!(loader.poll(), None);
    }
}
