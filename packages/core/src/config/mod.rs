//! Configuration management for vhostgen
//!
//! The config file is optional: a missing file means built-in defaults, which
//! reproduce the stock templates exactly. vhostgen never writes this file.

pub mod paths;
pub mod schema;
pub mod validation;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use thiserror::Error;
use tracing::debug;

pub use schema::Config;
pub use validation::{
    ValidationError, ValidationWarning, display_validation_error, display_validation_warning,
    validate_config,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the config file location")]
    NoConfigPath,

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid JSON in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration in {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the config at `path`, or defaults when the file does not exist
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_config(&contents, path)
}

/// Load the config from the default location, or defaults if absent
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    let path = paths::get_config_path().ok_or(ConfigError::NoConfigPath)?;
    load_config_from(&path)
}

/// Parse JSONC text into a Config
///
/// Comments and trailing commas are accepted. An empty document yields
/// defaults.
pub fn parse_config(contents: &str, path: &Path) -> Result<Config, ConfigError> {
    let parsed: Option<serde_json::Value> =
        jsonc_parser::parse_to_serde_value(contents, &ParseOptions::default()).map_err(|e| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

    let Some(value) = parsed else {
        return Ok(Config::default());
    };

    let config = serde_json::from_value(value).map_err(|source| ConfigError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}
