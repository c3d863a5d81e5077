//! Temporal Lattice Core
//!
//! Contains everything that does not touch the GPU:
//! - Lunar-cycle time store and frame clock
//! - Resonance model (beat envelope, orbit, lattice wave)
//! - Scene components and their procedural geometry

pub mod driver;
pub mod math;
pub mod resonance;
pub mod scene;
pub mod time;

pub use glam;

/// Viewer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
