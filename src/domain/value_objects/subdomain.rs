//! Subdomain label value object
//!
//! One DNS label claimed by a tenant under a platform-owned suffix. The
//! pattern is `[a-zA-Z0-9-]+`; reserved labels (`www`, the platform root)
//! can never be claimed. The label doubles as the storage directory name
//! under `<root>/subdomains/`, so the charset also guarantees path safety.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated subdomain label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubdomainLabel(String);

impl SubdomainLabel {
    /// Validate a raw label against the pattern and a reserved list.
    pub fn new(raw: &str, reserved: &[String]) -> EngineResult<Self> {
        let label = raw.trim();

        if label.is_empty() {
            return Err(EngineError::InvalidSubdomain {
                label: raw.to_string(),
                reason: "subdomain is required".to_string(),
            });
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(EngineError::InvalidSubdomain {
                label: raw.to_string(),
                reason: "only letters, digits and hyphens are allowed".to_string(),
            });
        }

        if reserved.iter().any(|r| r.eq_ignore_ascii_case(label)) {
            return Err(EngineError::InvalidSubdomain {
                label: raw.to_string(),
                reason: "this label is reserved".to_string(),
            });
        }

        Ok(Self(label.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubdomainLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
