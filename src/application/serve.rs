//! Serve use case
//!
//! Resolves an inbound request to a concrete file. The routing decision is
//! pure (see `domain::services::router`); this use case adds the filesystem
//! probes and the fallback-to-index rule:
//!
//! - empty rest -> `index.html`
//! - exact file if present
//! - else `index.html` in the same directory (single-page-app fallback)
//! - else `NotFound` carrying the attempted site, so the caller can render
//!   "not deployed yet" instead of a generic 404
//!
//! No lock is taken; a file appearing or disappearing mid-request simply
//! changes what the probe finds.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::ports::FileSystem;
use crate::domain::services::{RequestRouter, RouteOutcome, SiteRef};
use crate::domain::value_objects::SafePath;
use crate::error::{EngineError, EngineResult};

/// File served when the request names a directory or a missing file.
pub const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ServeOutcome {
    /// Stream this file back
    File { path: PathBuf, site: SiteRef },
    /// The engine owns the request but the site (or file) is not deployed
    NotFound { site: SiteRef },
    /// Not a deployment request; the caller continues normal routing
    NotOwned,
}

/// Serve use case - read-only resolution of host + path to a file
pub struct ServeUseCase<F>
where
    F: FileSystem,
{
    router: RequestRouter,
    fs: F,
}

impl<F> ServeUseCase<F>
where
    F: FileSystem,
{
    pub fn new(router: RequestRouter, fs: F) -> Self {
        Self { router, fs }
    }

    pub fn resolve(&self, host: &str, path: &str) -> EngineResult<ServeOutcome> {
        let matched = match self.router.route(host, path)? {
            RouteOutcome::NotOwned => return Ok(ServeOutcome::NotOwned),
            RouteOutcome::Matched(m) => m,
        };

        let candidate = match &matched.rest {
            Some(rest) => matched.dir.join(rest),
            None => matched.dir.join(INDEX_FILE),
        };

        // The router already validated every segment; re-check the final
        // path anyway before the first filesystem access.
        let root = &self.router.config().storage_root;
        if !SafePath::is_within(&candidate, root) {
            return Err(EngineError::PathEscape { path: candidate });
        }

        if self.fs.is_file(&candidate) {
            return Ok(ServeOutcome::File {
                path: candidate,
                site: matched.site,
            });
        }

        let fallback = matched.dir.join(INDEX_FILE);
        if self.fs.is_file(&fallback) {
            return Ok(ServeOutcome::File {
                path: fallback,
                site: matched.site,
            });
        }

        Ok(ServeOutcome::NotFound { site: matched.site })
    }
}
