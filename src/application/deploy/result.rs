//! Deploy result types

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::Deployment;
use crate::domain::value_objects::AddressingMode;

/// Outcome of a deploy
///
/// `deployment` is `None` in exactly one case: the files landed on disk but
/// the record write failed. That state is reachable via routing re-resolution
/// only after a redeploy, and the warning list tells the operator to
/// reconcile.
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub deployment: Option<Deployment>,
    /// URL the site is reachable under from now on
    pub external_url: String,
    /// Canonical storage directory the files were written to
    pub storage_path: PathBuf,
    pub mode: AddressingMode,
    /// Non-fatal problems: staged-file cleanup failures, store write failure
    pub warnings: Vec<String>,
}

impl DeployOutcome {
    /// True when the store record failed after the files were written.
    pub fn needs_reconciliation(&self) -> bool {
        self.deployment.is_none()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
