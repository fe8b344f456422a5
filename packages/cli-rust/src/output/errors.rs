//! Centralized filesystem error formatting
//!
//! Turns write failures into styled, actionable messages.

use anyhow::anyhow;
use console::style;
use vhostgen_core::WriteError;

/// Format write errors with guidance on how to get past them
pub fn format_write_error(e: &WriteError) -> String {
    if e.is_permission_denied() {
        let dir = match e {
            WriteError::CreateDir { path, .. } => path.as_path(),
            WriteError::WriteFile { path, .. } => path.parent().unwrap_or(path.as_path()),
        };
        return format!(
            "{}\n\n  {}\n\n  {}\n  {}\n  {}",
            style("Permission denied").red().bold(),
            e,
            "Writing to the nginx config directory usually needs root:",
            style("  sudo vhostgen").cyan(),
            style(format!(
                "  or pick a writable directory: vhostgen --output-dir <dir> (was {})",
                dir.display()
            ))
            .cyan(),
        );
    }

    match e {
        WriteError::CreateDir { path, .. } => format!(
            "{}\n\n  {}\n\n  {} {}",
            style("Cannot create output directory").red().bold(),
            e,
            style("Tip:").cyan(),
            format!("check that no file is in the way at {}", path.display()),
        ),
        WriteError::WriteFile { .. } => format!(
            "{}\n\n  {}",
            style("Cannot write config file").red().bold(),
            e
        ),
    }
}

/// Format write errors as anyhow::Error
pub fn format_write_error_anyhow(e: &WriteError) -> anyhow::Error {
    anyhow!("{}", format_write_error(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn permission_denied_suggests_sudo_and_output_dir() {
        let error = WriteError::WriteFile {
            path: PathBuf::from("/etc/nginx/conf.d/a.com.conf"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let msg = format_write_error(&error);
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("sudo vhostgen"));
        assert!(msg.contains("--output-dir"));
        assert!(msg.contains("/etc/nginx/conf.d"));
    }

    #[test]
    fn blocked_directory_mentions_path() {
        let error = WriteError::CreateDir {
            path: PathBuf::from("/tmp/conf.d"),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        };
        let msg = format_write_error(&error);
        assert!(msg.contains("Cannot create output directory"));
        assert!(msg.contains("/tmp/conf.d"));
    }

    #[test]
    fn anyhow_wrapper_keeps_message() {
        let error = WriteError::WriteFile {
            path: PathBuf::from("/x/y.conf"),
            source: io::Error::other("disk full"),
        };
        let err = format_write_error_anyhow(&error);
        assert!(err.to_string().contains("Cannot write config file"));
        assert!(err.to_string().contains("disk full"));
    }
}
