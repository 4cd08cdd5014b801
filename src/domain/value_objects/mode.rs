//! Addressing mode value object
//!
//! Exactly one mode is active per deployment. The mode is inferred from
//! which optional descriptor fields are present, never stored separately.

use serde::{Deserialize, Serialize};

/// How a deployment is addressed externally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressingMode {
    /// `<origin>/subdomain/<label>` simulation URL; the DNS name is
    /// recorded but not provisioned.
    SubdomainSim,
    /// A full `<label>.<suffix>` on a platform-owned suffix; storage is
    /// shared with the equivalent subdomain deployment.
    PlatformDomain,
    /// Tenant-provided external domain; storage stays under the tenant path.
    CustomDomain,
    /// Default `<origin>/tenants/<tenant>/<site>` addressing.
    TenantPath,
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressingMode::SubdomainSim => write!(f, "subdomain-sim"),
            AddressingMode::PlatformDomain => write!(f, "platform-domain"),
            AddressingMode::CustomDomain => write!(f, "custom-domain"),
            AddressingMode::TenantPath => write!(f, "tenant-path"),
        }
    }
}
