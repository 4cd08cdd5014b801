//! Staged upload file - transient input to the deploy use case
//!
//! The upload transport materializes each uploaded file to a temporary
//! location and hands the engine this tuple. The engine only reads
//! `staged_path` and deletes it after a successful copy; it never touches
//! the transport's bookkeeping.

use std::path::PathBuf;

/// One uploaded file, staged on local disk by the upload transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Name the client gave the file. May encode a relative path
    /// (`assets/app.js`) when the transport preserves directory structure;
    /// otherwise a base name.
    pub original_name: String,
    /// Temporary on-disk location, consumed by the deploy.
    pub staged_path: PathBuf,
    /// Size in bytes, as reported by the transport.
    pub size: u64,
    /// MIME type, as reported by the transport.
    pub content_type: String,
}

impl StagedFile {
    pub fn new(
        original_name: impl Into<String>,
        staged_path: impl Into<PathBuf>,
        size: u64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            staged_path: staged_path.into(),
            size,
            content_type: content_type.into(),
        }
    }
}
