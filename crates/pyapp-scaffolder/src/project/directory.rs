//! Project directory guard

use crate::error::ScaffoldError;
use std::io;
use std::path::Path;

/// Fail if anything (file, directory or symlink) already sits at `path`
pub fn ensure_vacant(path: &Path) -> Result<(), ScaffoldError> {
    // symlink_metadata so that a dangling symlink still counts as taken
    match std::fs::symlink_metadata(path) {
        Ok(_) => Err(ScaffoldError::DirectoryExists {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ScaffoldError::Io {
            action: "inspect",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Create the project directory. The parent must already exist.
pub async fn create_project_dir(path: &Path) -> Result<(), ScaffoldError> {
    match tokio::fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(ScaffoldError::DirectoryExists {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ScaffoldError::Io {
            action: "create directory",
            path: path.to_path_buf(),
            source,
        }),
    }
}
