//! JSON-based parameter loader
//!
//! Scenario files hold one serialized `ProjectParameters` record, e.g.
//! `data/scenarios/base.json`.

use super::ProjectParameters;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default directory for scenario files
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenarios";

/// Errors raised while reading a parameter file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a parameter set from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<ProjectParameters, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let params = parameters_from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded parameters from {}", path.display());
    Ok(params)
}

/// Parse a parameter set from a JSON string
pub fn parameters_from_str(text: &str) -> Result<ProjectParameters, serde_json::Error> {
    serde_json::from_str(text)
}

/// Load a named scenario (`<name>.json`) from the default scenario directory
pub fn load_named_scenario(name: &str) -> Result<ProjectParameters, ConfigError> {
    load_parameters(Path::new(DEFAULT_SCENARIO_PATH).join(format!("{}.json", name)))
}
