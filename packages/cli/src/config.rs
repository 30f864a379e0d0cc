//! Optional JSON config file

use crate::error::{CliError, CliResult};
use devkit_jwt::SUPPORTED_ALGORITHMS;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output and default-algorithm preferences
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DevkitConfig {
    /// Algorithm used by `encode` and `verify` when `--alg` is omitted
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,
    /// Annotate time claims on every `decode`
    #[serde(default)]
    pub annotate_timestamps: bool,
    /// Pretty-print JSON output unless `--compact` is given
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for DevkitConfig {
    fn default() -> Self {
        Self {
            default_algorithm: default_algorithm(),
            annotate_timestamps: false,
            pretty: default_pretty(),
        }
    }
}

/// `$XDG_CONFIG_HOME/devkit/config.json` or the platform equivalent
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("devkit").join("config.json"))
}

impl DevkitConfig {
    /// Load from `explicit`, else from the default location if a file exists
    /// there, else defaults
    ///
    /// # Errors
    /// Returns `CliError::Config` when the selected file cannot be read or
    /// parsed. A missing explicit file is an error; a missing default file is
    /// not.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine OS config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file
    ///
    /// # Errors
    /// Returns `CliError::Config` on I/O, JSON or validation failure.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let config_error = |reason: String| CliError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;

        if !SUPPORTED_ALGORITHMS.contains(&config.default_algorithm.as_str()) {
            return Err(config_error(format!(
                "default_algorithm '{}' is not supported",
                config.default_algorithm
            )));
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
