//! Persisting rendered server blocks
//!
//! The output directory is created on demand, then the target file is
//! created or truncated and written in a single call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Conventional nginx include directory
pub const DEFAULT_OUTPUT_DIR: &str = "/etc/nginx/conf.d";

/// Permissions for a freshly created output directory
#[cfg(unix)]
const OUTPUT_DIR_MODE: u32 = 0o755;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    WriteFile { path: PathBuf, source: io::Error },
}

impl WriteError {
    pub fn path(&self) -> &Path {
        match self {
            WriteError::CreateDir { path, .. } | WriteError::WriteFile { path, .. } => path,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        let source = match self {
            WriteError::CreateDir { source, .. } | WriteError::WriteFile { source, .. } => source,
        };
        source.kind() == io::ErrorKind::PermissionDenied
    }
}

/// Write `contents` to `dir/file_name`, replacing any previous file
///
/// Returns the full path of the written file.
pub fn write_vhost(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, WriteError> {
    ensure_dir(dir)?;

    let path = dir.join(file_name);
    debug!(path = %path.display(), bytes = contents.len(), "writing server block");
    fs::write(&path, contents).map_err(|source| WriteError::WriteFile {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "server block written");

    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    if dir.is_dir() {
        return Ok(());
    }

    debug!(dir = %dir.display(), "creating output directory");
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(OUTPUT_DIR_MODE);
    }
    builder.create(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nginx").join("conf.d");

        let path = write_vhost(&dir, "example.com.conf", "server {\n}\n").unwrap();

        assert_eq!(path, dir.join("example.com.conf"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "server {\n}\n");
    }

    #[test]
    fn rewriting_replaces_previous_content() {
        let tmp = TempDir::new().unwrap();
        let long = "server {\n    # a much longer body than the second write\n}\n";
        let short = "server {\n}\n";

        write_vhost(tmp.path(), "site.conf", long).unwrap();
        let path = write_vhost(tmp.path(), "site.conf", short).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), short);
    }

    #[test]
    fn same_input_twice_is_identical() {
        let tmp = TempDir::new().unwrap();
        let first = write_vhost(tmp.path(), "site.conf", "same\n").unwrap();
        let second = write_vhost(tmp.path(), "site.conf", "same\n").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(second).unwrap(), "same\n");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn directory_blocked_by_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("conf.d");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_vhost(&blocker, "a.conf", "x").unwrap_err();
        assert!(matches!(err, WriteError::CreateDir { .. }));
        assert_eq!(err.path(), blocker.as_path());
        assert!(!err.is_permission_denied());
    }
}
