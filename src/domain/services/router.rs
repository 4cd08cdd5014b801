//! Request router - host and path to a candidate storage directory
//!
//! An ordered list of explicit matchers, evaluated in priority order, each
//! returning a typed outcome:
//!
//! 1. `TenantPath`   - `/tenants/<tenant>/<site>/<rest>`
//! 2. `SubdomainSim` - `/subdomain/<label>/<rest>`
//! 3. `RealHost`     - host on a platform-owned suffix, first label not
//!    reserved
//!
//! A request no matcher owns is handed back to the surrounding HTTP layer
//! (`NotOwned`), so the engine never shadows the platform's own UI routes.
//!
//! The router is pure: it computes candidate paths and never touches the
//! filesystem or the store. `requestPath` is untrusted input; every segment
//! goes through `SafePath` before a candidate is produced.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::services::resolver::{SUBDOMAINS_DIR, TENANTS_DIR};
use crate::domain::value_objects::{PlatformHost, SafePath, SubdomainLabel};
use crate::error::{EngineError, EngineResult};

/// Which site a request was aimed at, kept for "not deployed yet"
/// messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteRef {
    TenantSite { tenant: String, site: String },
    Subdomain { label: String },
}

impl fmt::Display for SiteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteRef::TenantSite { tenant, site } => write!(f, "{}/{}", tenant, site),
            SiteRef::Subdomain { label } => write!(f, "{}", label),
        }
    }
}

/// A matched route: the directory to look in, and what remains of the
/// request path (None means "serve the site root").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub dir: PathBuf,
    pub rest: Option<SafePath>,
    pub site: SiteRef,
}

/// Outcome of routing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The engine owns this request
    Matched(RouteMatch),
    /// Not a deployment request; the caller continues normal routing
    NotOwned,
}

/// One addressing scheme the engine serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    TenantPath,
    SubdomainSim,
    RealHost,
}

/// Maps an inbound (host, path) pair to a candidate storage directory.
#[derive(Debug, Clone)]
pub struct RequestRouter {
    config: EngineConfig,
    matchers: Vec<Matcher>,
}

impl RequestRouter {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            matchers: vec![Matcher::TenantPath, Matcher::SubdomainSim, Matcher::RealHost],
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Route a request. `Err` means a matcher recognized the request shape
    /// but the input is invalid (traversal, bad label) - the request must
    /// not fall through to other handlers.
    pub fn route(&self, host: &str, path: &str) -> EngineResult<RouteOutcome> {
        for matcher in &self.matchers {
            if let Some(matched) = self.apply(*matcher, host, path)? {
                return Ok(RouteOutcome::Matched(matched));
            }
        }
        Ok(RouteOutcome::NotOwned)
    }

    fn apply(&self, matcher: Matcher, host: &str, path: &str) -> EngineResult<Option<RouteMatch>> {
        match matcher {
            Matcher::TenantPath => self.match_tenant_path(path),
            Matcher::SubdomainSim => self.match_subdomain_sim(path),
            Matcher::RealHost => self.match_real_host(host, path),
        }
    }

    /// `/tenants/<tenant>/<site>/<rest>`
    fn match_tenant_path(&self, path: &str) -> EngineResult<Option<RouteMatch>> {
        let Some(trimmed) = path.strip_prefix('/') else {
            return Ok(None);
        };
        let mut parts = trimmed.splitn(4, '/');
        if parts.next() != Some(TENANTS_DIR) {
            return Ok(None);
        }
        let (Some(tenant), Some(site)) = (parts.next(), parts.next()) else {
            return Ok(None);
        };
        if tenant.is_empty() || site.is_empty() {
            return Ok(None);
        }

        let tenant_seg = Self::segment(tenant)?;
        let site_seg = Self::segment(site)?;

        Ok(Some(RouteMatch {
            dir: self
                .config
                .storage_root
                .join(TENANTS_DIR)
                .join(tenant_seg)
                .join(site_seg),
            rest: Self::rest(parts.next())?,
            site: SiteRef::TenantSite {
                tenant: tenant.to_string(),
                site: site.to_string(),
            },
        }))
    }

    /// `/subdomain/<label>/<rest>`
    fn match_subdomain_sim(&self, path: &str) -> EngineResult<Option<RouteMatch>> {
        let Some(trimmed) = path.strip_prefix('/') else {
            return Ok(None);
        };
        let mut parts = trimmed.splitn(3, '/');
        if parts.next() != Some("subdomain") {
            return Ok(None);
        }
        let Some(label) = parts.next() else {
            return Ok(None);
        };
        if label.is_empty() {
            return Ok(None);
        }

        // Reserved labels are not checked when serving; they simply never
        // have a deployed directory. The charset check still applies.
        let label = SubdomainLabel::new(label, &[])?;

        Ok(Some(RouteMatch {
            dir: self
                .config
                .storage_root
                .join(SUBDOMAINS_DIR)
                .join(label.as_str()),
            rest: Self::rest(parts.next())?,
            site: SiteRef::Subdomain {
                label: label.as_str().to_string(),
            },
        }))
    }

    /// Host on a platform-owned suffix; the first label selects the site.
    fn match_real_host(&self, host: &str, path: &str) -> EngineResult<Option<RouteMatch>> {
        let Some(platform) = PlatformHost::parse(host, &self.config.allowed_suffixes) else {
            return Ok(None);
        };
        if !platform.has_label() || self.config.is_reserved_label(&platform.label) {
            // The bare domain and reserved hosts are the platform's own UI.
            return Ok(None);
        }

        let label = SubdomainLabel::new(&platform.label, &[])?;
        let rest = Self::rest(Some(path.trim_start_matches('/')))?;

        Ok(Some(RouteMatch {
            dir: self
                .config
                .storage_root
                .join(SUBDOMAINS_DIR)
                .join(label.as_str()),
            rest,
            site: SiteRef::Subdomain {
                label: label.as_str().to_string(),
            },
        }))
    }

    fn segment(raw: &str) -> EngineResult<SafePath> {
        SafePath::segment(raw).map_err(|_| EngineError::PathEscape {
            path: PathBuf::from(raw),
        })
    }

    /// Validate the trailing request path. Empty or `/` means "site root".
    fn rest(raw: Option<&str>) -> EngineResult<Option<SafePath>> {
        match raw {
            None => Ok(None),
            Some(rest) => {
                let rest = rest.trim_matches('/');
                if rest.is_empty() {
                    return Ok(None);
                }
                SafePath::new(rest)
                    .map(Some)
                    .map_err(|_| EngineError::PathEscape {
                        path: PathBuf::from(rest),
                    })
            }
        }
    }
}
