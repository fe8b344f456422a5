//! Configuration schema for vhostgen
//!
//! Defines the structure and defaults for the config.json file.

use serde::{Deserialize, Serialize};

use crate::vhost::{DEFAULT_CACHE_MAX_AGE, DEFAULT_CERT_DIR, DEFAULT_PHP_FPM_SOCKET, RenderSettings};
use crate::writer::DEFAULT_OUTPUT_DIR;

/// Main configuration structure for vhostgen
///
/// Read from `~/.config/vhostgen/config.json` (comments allowed)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory server blocks are written to (default: "/etc/nginx/conf.d")
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding `<domain>/fullchain.pem` and `<domain>/privkey.pem`
    /// (default: "/etc/certbot/live")
    #[serde(default = "default_cert_dir")]
    pub cert_dir: String,

    /// fastcgi_pass target for the PHP template
    /// (default: "unix:/var/run/php/php7.2-fpm.sock")
    #[serde(default = "default_php_fpm_socket")]
    pub php_fpm_socket: String,

    /// Static asset max-age used by `--cache` without a value (default: "6h")
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: String,
}

fn default_version() -> u32 {
    1
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_cert_dir() -> String {
    DEFAULT_CERT_DIR.to_string()
}

fn default_php_fpm_socket() -> String {
    DEFAULT_PHP_FPM_SOCKET.to_string()
}

fn default_cache_max_age() -> String {
    DEFAULT_CACHE_MAX_AGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_dir: default_output_dir(),
            cert_dir: default_cert_dir(),
            php_fpm_socket: default_php_fpm_socket(),
            cache_max_age: default_cache_max_age(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Template settings derived from this config
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            cert_dir: self.cert_dir.clone(),
            php_fpm_socket: self.php_fpm_socket.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.output_dir, "/etc/nginx/conf.d");
        assert_eq!(config.cert_dir, "/etc/certbot/live");
        assert_eq!(config.php_fpm_socket, "unix:/var/run/php/php7.2-fpm.sock");
        assert_eq!(config.cache_max_age, "6h");
    }

    #[test]
    fn test_default_render_settings_match_builtin_defaults() {
        assert_eq!(Config::default().render_settings(), RenderSettings::default());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"version": 1}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_overrides() {
        let json = r#"{
            "version": 1,
            "output_dir": "/usr/local/etc/nginx/servers",
            "php_fpm_socket": "unix:/run/php/php8.2-fpm.sock"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.output_dir, "/usr/local/etc/nginx/servers");
        assert_eq!(config.php_fpm_socket, "unix:/run/php/php8.2-fpm.sock");
        assert_eq!(config.cert_dir, "/etc/certbot/live");
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"version": 1, "unknown_field": "value"}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
