//! Path resolver - descriptor to canonical storage path and external URL
//!
//! Pure function over the engine configuration; no I/O. The same resolution
//! runs at deploy time (to pick the target directory) and is mirrored by the
//! router at request time, so a deployment stays reachable without
//! consulting the store.
//!
//! Rules, evaluated in order:
//! 1. `subdomain` present: storage under `subdomains/<label>`, simulation
//!    URL `<origin>/subdomain/<label>`, DNS name recorded informationally.
//! 2. `domain` on a platform-owned suffix: first label is an implicit
//!    subdomain, same storage, real `https://<domain>` URL.
//! 3. external `domain`: storage under `tenants/<tenant>/<site>`,
//!    `https://<domain>` URL.
//! 4. neither: storage under `tenants/<tenant>/<site>`, addressed by
//!    `<origin>/tenants/<tenant>/<site>`.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::entities::{Descriptor, TenantId};
use crate::domain::value_objects::{
    is_plausible_domain, AddressingMode, PlatformHost, SafePath, SiteName, SubdomainLabel,
};
use crate::error::{EngineError, EngineResult};

/// Subtree for subdomain-addressed sites, relative to the storage root.
pub const SUBDOMAINS_DIR: &str = "subdomains";
/// Subtree for tenant-path-addressed sites, relative to the storage root.
pub const TENANTS_DIR: &str = "tenants";

/// Outcome of resolving a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Canonical absolute directory for the site's files
    pub storage_path: PathBuf,
    /// URL the deployment is reachable under from now on
    pub external_url: String,
    /// Inferred addressing mode
    pub mode: AddressingMode,
    /// Domain recorded on the deployment record, if any
    pub domain: Option<String>,
}

/// Maps a deployment descriptor to where its files live and how they are
/// addressed.
#[derive(Debug, Clone)]
pub struct PathResolver {
    config: EngineConfig,
}

impl PathResolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a descriptor. Validation failures are terminal and
    /// user-correctable; nothing is written anywhere.
    pub fn resolve(&self, descriptor: &Descriptor) -> EngineResult<Resolution> {
        // The site name is required in every mode, even when it does not
        // end up in the storage path.
        let site = SiteName::new(&descriptor.site_name)?;

        let resolution = if let Some(subdomain) = &descriptor.subdomain {
            self.resolve_subdomain(subdomain, descriptor.domain.as_deref())?
        } else if let Some(domain) = &descriptor.domain {
            match PlatformHost::parse(domain, &self.config.allowed_suffixes) {
                Some(host) => self.resolve_platform_domain(domain, &host)?,
                None => self.resolve_custom_domain(&descriptor.tenant_id, &site, domain)?,
            }
        } else {
            self.resolve_tenant_path(&descriptor.tenant_id, &site)?
        };

        // Last line of defense: the derived directory must sit under the
        // storage root regardless of which rule produced it.
        if !SafePath::is_within(&resolution.storage_path, &self.config.storage_root) {
            return Err(EngineError::PathEscape {
                path: resolution.storage_path,
            });
        }

        Ok(resolution)
    }

    /// Rule 1: explicit subdomain, optionally naming which platform suffix
    /// to hang it under.
    fn resolve_subdomain(
        &self,
        subdomain: &str,
        suffix: Option<&str>,
    ) -> EngineResult<Resolution> {
        let label = SubdomainLabel::new(subdomain, &self.config.reserved_labels)?;

        let suffix = match suffix {
            None => self.config.default_suffix.clone(),
            Some(requested) => self
                .config
                .allowed_suffixes
                .iter()
                .find(|s| s.eq_ignore_ascii_case(requested))
                .cloned()
                .ok_or_else(|| self.unsupported(requested))?,
        };

        Ok(Resolution {
            storage_path: self.subdomain_dir(&label),
            external_url: format!("{}/subdomain/{}", self.config.origin, label),
            mode: AddressingMode::SubdomainSim,
            domain: Some(format!("{}.{}", label, suffix)),
        })
    }

    /// Rule 2: a full domain on a platform suffix. The first label is
    /// treated as an implicit subdomain and must pass the same checks.
    fn resolve_platform_domain(
        &self,
        domain: &str,
        host: &PlatformHost,
    ) -> EngineResult<Resolution> {
        if !host.has_label() {
            // The bare platform domain belongs to the platform itself.
            return Err(self.unsupported(domain));
        }
        let label = SubdomainLabel::new(&host.label, &self.config.reserved_labels)?;

        Ok(Resolution {
            storage_path: self.subdomain_dir(&label),
            external_url: format!("https://{}", domain),
            mode: AddressingMode::PlatformDomain,
            domain: Some(domain.to_string()),
        })
    }

    /// Rule 3: external custom domain; storage stays under the tenant path
    /// so site-name collisions across tenants cannot share a directory.
    fn resolve_custom_domain(
        &self,
        tenant: &TenantId,
        site: &SiteName,
        domain: &str,
    ) -> EngineResult<Resolution> {
        if !is_plausible_domain(domain) {
            return Err(self.unsupported(domain));
        }

        Ok(Resolution {
            storage_path: self.tenant_dir(tenant, site)?,
            external_url: format!("https://{}", domain.trim()),
            mode: AddressingMode::CustomDomain,
            domain: Some(domain.trim().to_string()),
        })
    }

    /// Rule 4: no domain at all.
    fn resolve_tenant_path(&self, tenant: &TenantId, site: &SiteName) -> EngineResult<Resolution> {
        Ok(Resolution {
            storage_path: self.tenant_dir(tenant, site)?,
            external_url: format!(
                "{}/tenants/{}/{}",
                self.config.origin, tenant, site
            ),
            mode: AddressingMode::TenantPath,
            domain: None,
        })
    }

    fn subdomain_dir(&self, label: &SubdomainLabel) -> PathBuf {
        self.config
            .storage_root
            .join(SUBDOMAINS_DIR)
            .join(label.as_str())
    }

    fn tenant_dir(&self, tenant: &TenantId, site: &SiteName) -> EngineResult<PathBuf> {
        // The tenant id comes from the auth layer pre-validated as an
        // identity, but it still becomes a directory name.
        let tenant_segment =
            SafePath::segment(tenant.as_str()).map_err(|_| EngineError::PathEscape {
                path: PathBuf::from(tenant.as_str()),
            })?;

        Ok(self
            .config
            .storage_root
            .join(TENANTS_DIR)
            .join(tenant_segment)
            .join(site.as_str()))
    }

    fn unsupported(&self, domain: &str) -> EngineError {
        EngineError::UnsupportedDomain {
            domain: domain.to_string(),
            allowed: self.config.allowed_suffixes.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn resolver() -> PathResolver {
        PathResolver::new(EngineConfig {
            storage_root: PathBuf::from("/srv/deployed"),
            origin: "http://localhost:3000".to_string(),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn subdomain_without_domain_uses_default_suffix() {
        let descriptor = Descriptor::new("1", "blog").with_subdomain("myblog");
        let resolution = resolver().resolve(&descriptor).unwrap();

        assert_eq!(
            resolution.storage_path,
            Path::new("/srv/deployed/subdomains/myblog")
        );
        assert_eq!(
            resolution.external_url,
            "http://localhost:3000/subdomain/myblog"
        );
        assert_eq!(resolution.mode, AddressingMode::SubdomainSim);
        assert_eq!(resolution.domain.as_deref(), Some("myblog.ntando.store"));
    }

    #[test]
    fn subdomain_with_allowed_suffix() {
        let descriptor = Descriptor::new("1", "blog")
            .with_subdomain("myblog")
            .with_domain("ntando.cloud");
        let resolution = resolver().resolve(&descriptor).unwrap();
        assert_eq!(resolution.domain.as_deref(), Some("myblog.ntando.cloud"));
    }

    #[test]
    fn subdomain_with_foreign_suffix_is_unsupported() {
        let descriptor = Descriptor::new("1", "blog")
            .with_subdomain("myblog")
            .with_domain("example.com");
        assert!(matches!(
            resolver().resolve(&descriptor),
            Err(EngineError::UnsupportedDomain { .. })
        ));
    }

    #[test]
    fn platform_domain_reuses_subdomain_storage() {
        let descriptor = Descriptor::new("1", "blog").with_domain("myblog.ntando.store");
        let resolution = resolver().resolve(&descriptor).unwrap();

        assert_eq!(
            resolution.storage_path,
            Path::new("/srv/deployed/subdomains/myblog")
        );
        assert_eq!(resolution.external_url, "https://myblog.ntando.store");
        assert_eq!(resolution.mode, AddressingMode::PlatformDomain);
    }

    #[test]
    fn bare_platform_domain_is_rejected() {
        let descriptor = Descriptor::new("1", "blog").with_domain("ntando.store");
        assert!(resolver().resolve(&descriptor).is_err());
    }

    #[test]
    fn reserved_label_in_platform_domain_is_rejected() {
        let descriptor = Descriptor::new("1", "blog").with_domain("www.ntando.store");
        assert!(matches!(
            resolver().resolve(&descriptor),
            Err(EngineError::InvalidSubdomain { .. })
        ));
    }

    #[test]
    fn custom_domain_scopes_storage_by_tenant() {
        let descriptor = Descriptor::new("1", "portfolio").with_domain("example.com");
        let resolution = resolver().resolve(&descriptor).unwrap();

        assert_eq!(
            resolution.storage_path,
            Path::new("/srv/deployed/tenants/1/portfolio")
        );
        assert_eq!(resolution.external_url, "https://example.com");
        assert_eq!(resolution.mode, AddressingMode::CustomDomain);
    }

    #[test]
    fn default_mode_builds_tenant_url() {
        let descriptor = Descriptor::new("42", "shop");
        let resolution = resolver().resolve(&descriptor).unwrap();

        assert_eq!(
            resolution.storage_path,
            Path::new("/srv/deployed/tenants/42/shop")
        );
        assert_eq!(
            resolution.external_url,
            "http://localhost:3000/tenants/42/shop"
        );
        assert_eq!(resolution.mode, AddressingMode::TenantPath);
        assert!(resolution.domain.is_none());
    }

    #[test]
    fn same_descriptor_resolves_identically() {
        let descriptor = Descriptor::new("1", "blog").with_subdomain("myblog");
        let first = resolver().resolve(&descriptor).unwrap();
        let second = resolver().resolve(&descriptor).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn traversal_in_site_name_is_rejected() {
        for bad in ["../escape", "a/b", "..", ""] {
            let descriptor = Descriptor::new("1", bad);
            assert!(
                resolver().resolve(&descriptor).is_err(),
                "{:?} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn traversal_in_subdomain_is_rejected() {
        let descriptor = Descriptor::new("1", "blog").with_subdomain("../../etc");
        assert!(resolver().resolve(&descriptor).is_err());
    }

    #[test]
    fn unsafe_tenant_id_is_rejected() {
        let descriptor = Descriptor::new("../root", "blog");
        assert!(matches!(
            resolver().resolve(&descriptor),
            Err(EngineError::PathEscape { .. })
        ));
    }

    #[test]
    fn invalid_subdomain_with_valid_domain_still_fails() {
        let descriptor = Descriptor::new("1", "blog")
            .with_subdomain("bad_label")
            .with_domain("ntando.store");
        assert!(matches!(
            resolver().resolve(&descriptor),
            Err(EngineError::InvalidSubdomain { .. })
        ));
    }
}
