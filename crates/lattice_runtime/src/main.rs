//! Temporal Lattice Runtime
//!
//! Binary that loads settings, builds the scene and runs the viewer

mod app;
mod input;

use anyhow::{Context, Result};
use lattice_core::resonance::beat_frequency;
use lattice_core::time::{LATTICE_PERIOD_DAYS, LUNAR_PERIOD_DAYS};
use lattice_services::{Settings, SETTINGS_FILE};
use std::path::Path;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Temporal Lattice v{}", lattice_core::VERSION);
    tracing::info!(
        lattice_days = LATTICE_PERIOD_DAYS,
        lunar_days = LUNAR_PERIOD_DAYS,
        beat_cycles_per_day = beat_frequency(),
        "Resonance model"
    );

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));
    let mut app = app::App::new(settings);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    app.finish()
}
