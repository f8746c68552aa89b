//! Locating and loading `winstage.yaml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Config;
use crate::error::{self, Result};

/// Config filename
pub const CONFIG_FILE: &str = "winstage.yaml";

/// Load configuration
///
/// An explicit path (from `--config` or `WINSTAGE_CONFIG`) must exist. Otherwise
/// `./winstage.yaml` and then the per-user config directory are tried, and a
/// missing file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    for candidate in default_locations() {
        if candidate.is_file() {
            return read_config(&candidate);
        }
    }

    debug!("No {} found, using defaults", CONFIG_FILE);
    Ok(Config::default())
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("winstage").join(CONFIG_FILE));
    }
    locations
}

fn read_config(path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path)
        .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;

    Config::from_yaml(&content).map_err(|e| match e {
        crate::error::WinstageError::ConfigParseFailed { reason, .. } => {
            error::config::parse_failed(path.display().to_string(), reason)
        }
        other => other,
    })
}
