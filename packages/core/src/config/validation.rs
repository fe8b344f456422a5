//! Configuration validation with actionable error messages
//!
//! Validates the configuration and tells the operator exactly what to change.

use std::path::Path;

use super::schema::Config;
use crate::vhost::validate_time_value;
use console::style;

/// A configuration validation error with an actionable fix
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The config field that has an error
    pub field: String,
    /// Description of what's wrong
    pub message: String,
    /// What to put in the config file instead
    pub fix: String,
}

/// A configuration validation warning (non-fatal)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The config field with a potential issue
    pub field: String,
    /// Description of the warning
    pub message: String,
    /// Suggested change
    pub fix: String,
}

/// Validate configuration and return warnings or first error
///
/// Returns Ok(warnings) if validation passes (possibly with non-fatal warnings).
/// Returns Err(error) on the first fatal validation error encountered.
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>, ValidationError> {
    let mut warnings = Vec::new();

    if !Path::new(&config.output_dir).is_absolute() {
        return Err(ValidationError {
            field: "output_dir".to_string(),
            message: "output_dir must be an absolute path".to_string(),
            fix: "\"output_dir\": \"/etc/nginx/conf.d\"".to_string(),
        });
    }

    if !Path::new(&config.cert_dir).is_absolute() {
        return Err(ValidationError {
            field: "cert_dir".to_string(),
            message: "cert_dir must be an absolute path".to_string(),
            fix: "\"cert_dir\": \"/etc/certbot/live\"".to_string(),
        });
    }

    if !is_fastcgi_address(&config.php_fpm_socket) {
        return Err(ValidationError {
            field: "php_fpm_socket".to_string(),
            message: "php_fpm_socket must be 'unix:<path>' or '<host>:<port>'".to_string(),
            fix: "\"php_fpm_socket\": \"unix:/var/run/php/php7.2-fpm.sock\"".to_string(),
        });
    }

    if validate_time_value(&config.cache_max_age).is_err() {
        return Err(ValidationError {
            field: "cache_max_age".to_string(),
            message: format!(
                "'{}' is not an nginx time value (e.g. 30m, 6h, 1d)",
                config.cache_max_age
            ),
            fix: "\"cache_max_age\": \"6h\"".to_string(),
        });
    }

    // Warnings (non-fatal)

    if !Path::new(&config.cert_dir).is_dir() {
        warnings.push(ValidationWarning {
            field: "cert_dir".to_string(),
            message: format!(
                "{} does not exist on this host; nginx will fail to load the certificates",
                config.cert_dir
            ),
            fix: "issue certificates with certbot, or point cert_dir at the right directory"
                .to_string(),
        });
    }

    Ok(warnings)
}

fn is_fastcgi_address(value: &str) -> bool {
    if let Some(socket) = value.strip_prefix("unix:") {
        return socket.starts_with('/');
    }
    match value.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

/// Display a validation error with styled formatting
pub fn display_validation_error(error: &ValidationError) {
    eprintln!();
    eprintln!("{}", style("Error: Configuration error").red().bold());
    eprintln!();
    eprintln!("  {}  {}", style("Field:").dim(), error.field);
    eprintln!("  {}  {}", style("Problem:").dim(), error.message);
    eprintln!();
    eprintln!("{}:", style("To fix, set").dim());
    eprintln!("  {}", style(&error.fix).cyan());
    eprintln!();
}

/// Display a validation warning with styled formatting
pub fn display_validation_warning(warning: &ValidationWarning) {
    eprintln!();
    eprintln!(
        "{}",
        style("Warning: Configuration warning").yellow().bold()
    );
    eprintln!();
    eprintln!("  {}  {}", style("Field:").dim(), warning.field);
    eprintln!("  {}  {}", style("Issue:").dim(), warning.message);
    eprintln!();
    eprintln!("{}:", style("To address").dim());
    eprintln!("  {}", style(&warning.fix).cyan());
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_relative_output_dir() {
        let config = Config {
            output_dir: "conf.d".to_string(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field, "output_dir");
        assert!(err.message.contains("absolute"));
    }

    #[test]
    fn test_relative_cert_dir() {
        let config = Config {
            cert_dir: "live".to_string(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field, "cert_dir");
    }

    #[test]
    fn test_fastcgi_addresses() {
        assert!(is_fastcgi_address("unix:/run/php/php8.2-fpm.sock"));
        assert!(is_fastcgi_address("127.0.0.1:9000"));
        assert!(is_fastcgi_address("php:9000"));
        assert!(!is_fastcgi_address("unix:relative.sock"));
        assert!(!is_fastcgi_address("/run/php.sock"));
        assert!(!is_fastcgi_address(":9000"));
        assert!(!is_fastcgi_address("php:ninety"));
    }

    #[test]
    fn test_invalid_php_socket() {
        let config = Config {
            php_fpm_socket: "/var/run/php.sock".to_string(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field, "php_fpm_socket");
    }

    #[test]
    fn test_invalid_cache_age() {
        let config = Config {
            cache_max_age: "forever".to_string(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field, "cache_max_age");
        assert!(err.message.contains("forever"));
    }

    #[test]
    fn test_missing_cert_dir_warns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config {
            cert_dir: tmp.path().join("missing").to_string_lossy().into_owned(),
            ..Config::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.field == "cert_dir"));
    }

    #[test]
    fn test_existing_cert_dir_has_no_warning() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config {
            cert_dir: tmp.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.is_empty());
    }
}
