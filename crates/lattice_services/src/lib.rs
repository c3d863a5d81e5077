//! Temporal Lattice Services
//!
//! Settings, user controls and HUD layout. Nothing here touches the window
//! system; the runtime translates platform events into [`ControlAction`]s.

pub mod controls;
pub mod hud;
pub mod settings;

pub use controls::{ControlAction, Scrubber};
pub use hud::{HudLayout, HudShape, HudTarget};
pub use settings::{Settings, SettingsError, SETTINGS_FILE};
