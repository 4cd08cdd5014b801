//! Error types for Sitedock
//!
//! Uses `thiserror` for library errors. Validation errors carry the rejected
//! input verbatim so callers can render a user-correctable message.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::StoreError;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Site name is empty or contains unsafe path characters
    #[error("invalid site name '{name}': {reason}")]
    InvalidSiteName { name: String, reason: String },

    /// Subdomain label fails the pattern check or is reserved
    #[error("invalid subdomain '{label}': {reason}")]
    InvalidSubdomain { label: String, reason: String },

    /// Domain suffix is not on the platform allow-list
    #[error("unsupported domain '{domain}': allowed suffixes are {allowed}")]
    UnsupportedDomain { domain: String, allowed: String },

    /// Deploy was called with an empty file set
    #[error("no files provided for deployment")]
    NoFilesProvided,

    /// Disk or permission failure during the copy phase (partial writes rolled back)
    #[error("storage write failed at {path}: {message}")]
    StorageWriteFailed { path: PathBuf, message: String },

    /// Path escapes the storage root (security issue)
    #[error("path '{path}' escapes storage root")]
    PathEscape { path: PathBuf },

    /// Deployment record not found
    #[error("deployment not found")]
    NotFound,

    /// Deployment is owned by a different tenant
    #[error("deployment belongs to another tenant")]
    Forbidden,

    /// Deployment store failure outside the deploy warning path
    #[error("deployment store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration is invalid or unreadable
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl EngineError {
    /// True for user-correctable validation failures (bad site name,
    /// subdomain, or domain). These are terminal per-request and reported
    /// verbatim.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidSiteName { .. }
                | EngineError::InvalidSubdomain { .. }
                | EngineError::UnsupportedDomain { .. }
                | EngineError::PathEscape { .. }
                | EngineError::NoFilesProvided
        )
    }
}
