//! Temporal Lattice Assets
//!
//! Static data loading: the galaxy catalogue and its colour legend

pub mod color;
pub mod galaxies;
pub mod survey;

pub use galaxies::{load_galaxies, parse_galaxies, GalaxyLoader, GalaxyRecord};
pub use survey::{survey_counts, Survey, SurveyCounts};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading static data.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
}
