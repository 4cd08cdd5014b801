//! Deployment entity - one deployed static site instance
//!
//! The record is pure data; persistence is handled by a `DeploymentStore`
//! implementation. `storage_path` is always derived by the resolver, never
//! chosen freely, so request-time re-resolution is reproducible without
//! consulting the store.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owning tenant, opaque and already authenticated by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Store-assigned deployment identifier, immutable after creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeploymentId(u64);

impl DeploymentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deployment status. Deleted deployments are removed from the store
/// outright, so `Active` is the only persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Active,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStatus::Active => write!(f, "active"),
        }
    }
}

/// One deployed static site instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub tenant_id: TenantId,
    pub site_name: String,
    /// Full `<label>.<suffix>` for platform subdomains, an external custom
    /// domain, or `None` in default path mode.
    pub domain: Option<String>,
    /// Canonical absolute storage directory; redeploys reuse it.
    pub storage_path: PathBuf,
    pub status: DeploymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The tuple identifying a deployment: who owns it, what it is called, and
/// how it wants to be addressed. This is the input to both the resolver and
/// the deploy use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub tenant_id: TenantId,
    pub site_name: String,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
}

impl Descriptor {
    pub fn new(tenant_id: impl Into<TenantId>, site_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            site_name: site_name.into(),
            domain: None,
            subdomain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
