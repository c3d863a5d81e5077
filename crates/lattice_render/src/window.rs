//! Window management
//!
//! Window attributes for the viewer. In winit 0.30 windows are created
//! inside `ApplicationHandler::resumed`, so this only describes them.

use lattice_services::settings::WindowSettings;
use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

const MIN_SIZE: LogicalSize<u32> = LogicalSize::new(320, 240);

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::from(&WindowSettings::default())
    }
}

impl From<&WindowSettings> for WindowConfig {
    fn from(settings: &WindowSettings) -> Self {
        Self {
            title: settings.title.clone(),
            width: settings.width.max(MIN_SIZE.width),
            height: settings.height.max(MIN_SIZE.height),
        }
    }
}

/// Create window attributes from config
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_min_inner_size(MIN_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_follows_settings() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "3D Temporal Lattice");
        assert_eq!((config.width, config.height), (1280, 720));
    }

    #[test]
    fn tiny_windows_are_enlarged() {
        let settings = WindowSettings {
            title: "t".into(),
            width: 10,
            height: 10,
        };
        let config = WindowConfig::from(&settings);
        assert_eq!((config.width, config.height), (320, 240));
    }
}
