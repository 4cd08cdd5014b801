//! Engine configuration
//!
//! Everything the resolver and router need to make addressing decisions:
//! the storage root, the public origin used for simulation URLs, the
//! platform-owned suffix allow-list, and the reserved subdomain labels.
//!
//! Loadable from a TOML file; every field has a default so a partial file
//! (or none at all) still yields a working engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root directory for deployed sites. The two externally observable
    /// subtrees live under it: `tenants/<tenant>/<site>` and
    /// `subdomains/<label>`.
    pub storage_root: PathBuf,

    /// Public origin used to build simulation URLs (scheme + host + port).
    pub origin: String,

    /// Platform-owned domain suffixes a subdomain may be created under.
    pub allowed_suffixes: Vec<String>,

    /// Suffix applied when a subdomain is requested without a domain.
    pub default_suffix: String,

    /// Labels that can never be claimed as subdomains.
    pub reserved_labels: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let storage_root = dirs::data_dir()
            .map(|d| d.join("sitedock").join("deployed"))
            .unwrap_or_else(|| PathBuf::from("deployed"));

        Self {
            storage_root,
            origin: "http://localhost:3000".to_string(),
            allowed_suffixes: vec!["ntando.store".to_string(), "ntando.cloud".to_string()],
            default_suffix: "ntando.store".to_string(),
            reserved_labels: vec!["www".to_string(), "ntando".to_string()],
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, then validate it.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| EngineError::Config {
            message: format!("invalid config {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> EngineResult<()> {
        if self.allowed_suffixes.is_empty() {
            return Err(EngineError::Config {
                message: "allowed_suffixes must not be empty".to_string(),
            });
        }
        if !self.allowed_suffixes.contains(&self.default_suffix) {
            return Err(EngineError::Config {
                message: format!(
                    "default_suffix '{}' is not in allowed_suffixes",
                    self.default_suffix
                ),
            });
        }
        if self.origin.is_empty() {
            return Err(EngineError::Config {
                message: "origin must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// True if `label` is reserved (compared case-insensitively, as DNS
    /// labels are).
    pub fn is_reserved_label(&self, label: &str) -> bool {
        self.reserved_labels
            .iter()
            .any(|r| r.eq_ignore_ascii_case(label))
    }

    /// Default location of the deployment record file.
    pub fn store_path(&self) -> PathBuf {
        self.storage_root.join("deployments.json")
    }
}
