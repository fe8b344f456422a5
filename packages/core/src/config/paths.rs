//! Config file location
//!
//! Resolution order: explicit path, `VHOSTGEN_CONFIG`, then the platform
//! config directory (`~/.config/vhostgen/config.json` on Linux).

use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "VHOSTGEN_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// Platform config directory for vhostgen
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vhostgen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default config file path, honoring `VHOSTGEN_CONFIG`
pub fn get_config_path() -> Option<PathBuf> {
    let from_env = env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty());
    resolve_config_path(None, from_env.as_deref().map(Path::new))
}

/// Resolve the config path from an explicit flag and an env override
pub fn resolve_config_path(explicit: Option<&Path>, from_env: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit.or(from_env) {
        return Some(path.to_path_buf());
    }
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
