//! FileSystem port - abstraction over storage-tree I/O
//!
//! The writer and remover mutate the tree through this trait; the router
//! only probes it. Keeping it a port lets tests inject failure at a chosen
//! copy and keeps the domain layer free of `std::fs`.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an io::Error, keeping the path it happened at.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                FsError::PermissionDenied(path.to_path_buf())
            }
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard disk I/O
/// - test doubles that fail on demand
pub trait FileSystem: Send + Sync {
    /// Check if a path exists (file or directory)
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Copy a file, creating the target's parent directories
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Rename a file within the same directory tree, replacing the target
    /// if it exists
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory subtree recursively
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;
}
