//! Site name value object
//!
//! A tenant-chosen label. It becomes a directory name under
//! `<root>/tenants/<tenant>/`, so the validation here is stricter than the
//! upload form: path separators and traversal sequences are rejected rather
//! than sanitized away, keeping the name the tenant sees identical to the
//! name on disk.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::safe_path::SafePath;

/// A validated site name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteName(String);

impl SiteName {
    /// Validate a raw site name.
    pub fn new(raw: &str) -> EngineResult<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(EngineError::InvalidSiteName {
                name: raw.to_string(),
                reason: "site name is required".to_string(),
            });
        }

        if name.contains('/') || name.contains('\\') {
            return Err(EngineError::InvalidSiteName {
                name: raw.to_string(),
                reason: "path separators are not allowed".to_string(),
            });
        }

        if name.contains("..") {
            return Err(EngineError::InvalidSiteName {
                name: raw.to_string(),
                reason: "'..' is not allowed".to_string(),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(EngineError::InvalidSiteName {
                name: raw.to_string(),
                reason: "only letters, digits, '-', '_' and '.' are allowed".to_string(),
            });
        }

        // The remaining checks (leading dot, single-segment) ride on SafePath.
        SafePath::segment(name).map_err(|e| EngineError::InvalidSiteName {
            name: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
