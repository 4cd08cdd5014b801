//! Deploy use case
//!
//! Orchestrates one deployment:
//! 1. Resolve the descriptor (fail fast on validation errors)
//! 2. Take the per-storage-path lock
//! 3. Create or reuse the target directory (redeploy merges into it)
//! 4. Copy each staged file, consuming the staged temp on success
//! 5. Upsert the deployment record
//!
//! A copy failure rolls back every file this call already copied, leaving
//! the directory in its prior state - a half-written site is never
//! servable. A record failure after the files landed is a warning, not a
//! rollback: the files are good, only the metadata needs reconciliation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};

use crate::domain::entities::{Descriptor, StagedFile};
use crate::domain::ports::{
    DeploymentStore, EngineEvent, EventSink, FileSystem, NewDeployment, NoopEventSink,
};
use crate::domain::services::{PathResolver, Resolution};
use crate::domain::value_objects::{SafePath, SiteName};
use crate::error::{EngineError, EngineResult};
use crate::infrastructure::locks::PathLocks;

use super::result::DeployOutcome;

/// Deploy use case - parameterized by its ports for testability
pub struct DeployUseCase<S, F>
where
    S: DeploymentStore,
    F: FileSystem,
{
    resolver: PathResolver,
    store: S,
    fs: F,
    locks: Arc<PathLocks>,
    events: Arc<dyn EventSink>,
}

impl<S, F> DeployUseCase<S, F>
where
    S: DeploymentStore,
    F: FileSystem,
{
    pub fn new(resolver: PathResolver, store: S, fs: F, locks: Arc<PathLocks>) -> Self {
        Self {
            resolver,
            store,
            fs,
            locks,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Attach an event sink for progress reporting.
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Execute the deploy. The staged files are consumed: their temp copies
    /// are deleted as soon as each one is safely inside the storage
    /// directory.
    pub fn execute(
        &self,
        descriptor: &Descriptor,
        files: &[StagedFile],
    ) -> EngineResult<DeployOutcome> {
        if files.is_empty() {
            return Err(EngineError::NoFilesProvided);
        }

        let resolution = self.resolver.resolve(descriptor)?;
        let site = SiteName::new(&descriptor.site_name)?;

        // Validate every target name before the first copy, so a bad name
        // cannot force a mid-deploy rollback.
        let targets = self.plan_targets(&resolution, files)?;

        self.events.on_event(EngineEvent::DeployStarted {
            tenant: descriptor.tenant_id.to_string(),
            site: site.as_str().to_string(),
            file_count: files.len(),
        });

        let entry = self.locks.entry(&resolution.storage_path);
        let _guard = entry.lock().unwrap_or_else(PoisonError::into_inner);

        self.fs
            .create_dir_all(&resolution.storage_path)
            .map_err(|e| EngineError::StorageWriteFailed {
                path: resolution.storage_path.clone(),
                message: e.to_string(),
            })?;

        let mut warnings = Vec::new();
        self.copy_files(files, &targets, &mut warnings)?;

        let record = NewDeployment {
            tenant_id: descriptor.tenant_id.clone(),
            site_name: site.as_str().to_string(),
            domain: resolution.domain.clone(),
            storage_path: resolution.storage_path.clone(),
        };

        let deployment = match self.store.upsert(record) {
            Ok(deployment) => {
                self.events.on_event(EngineEvent::DeployCompleted {
                    url: resolution.external_url.clone(),
                    path: resolution.storage_path.clone(),
                });
                Some(deployment)
            }
            Err(e) => {
                // Files are on disk; surface the failure for reconciliation
                // instead of pretending the deploy failed.
                let message = format!("files deployed but record write failed: {}", e);
                self.events.on_event(EngineEvent::StoreWarning {
                    message: message.clone(),
                });
                warnings.push(message);
                None
            }
        };

        Ok(DeployOutcome {
            deployment,
            external_url: resolution.external_url,
            storage_path: resolution.storage_path,
            mode: resolution.mode,
            warnings,
        })
    }

    /// Compute and validate the target path for every staged file.
    fn plan_targets(
        &self,
        resolution: &Resolution,
        files: &[StagedFile],
    ) -> EngineResult<Vec<PathBuf>> {
        let root = &self.resolver.config().storage_root;
        let mut targets = Vec::with_capacity(files.len());

        for file in files {
            let relative =
                SafePath::new(&file.original_name).map_err(|_| EngineError::PathEscape {
                    path: PathBuf::from(&file.original_name),
                })?;
            let target = resolution.storage_path.join(relative);
            if !SafePath::is_within(&target, root) {
                return Err(EngineError::PathEscape { path: target });
            }
            targets.push(target);
        }

        Ok(targets)
    }

    /// Copy phase. Targets that already exist are moved aside before being
    /// overwritten. On failure, this call's new copies are removed and the
    /// moved-aside files are renamed back, leaving the directory in its
    /// prior state; a failed redeploy never un-serves the previous version.
    fn copy_files(
        &self,
        files: &[StagedFile],
        targets: &[PathBuf],
        warnings: &mut Vec<String>,
    ) -> EngineResult<()> {
        // New files written by this call, and (target, backup) pairs for
        // files this call replaced.
        let mut created: Vec<PathBuf> = Vec::new();
        let mut replaced: Vec<(PathBuf, PathBuf)> = Vec::new();

        for (file, target) in files.iter().zip(targets) {
            let result = self
                .stash_previous(target, &created, &mut replaced)
                .and_then(|()| {
                    self.fs.copy(&file.staged_path, target).map_err(|e| {
                        EngineError::StorageWriteFailed {
                            path: target.clone(),
                            message: e.to_string(),
                        }
                    })
                });

            if let Err(e) = result {
                let undone = created.len() + replaced.len();
                self.undo(&created, &replaced);
                self.events.on_event(EngineEvent::DeployRolledBack {
                    path: target.clone(),
                    undone,
                });
                return Err(e);
            }

            if !replaced.iter().any(|(t, _)| t == target) {
                created.push(target.clone());
            }
            self.events.on_event(EngineEvent::FileDeployed {
                path: target.clone(),
            });

            // The staged temp is consumed even if a later file fails;
            // leaving it would orphan transport data.
            if let Err(e) = self.fs.remove_file(&file.staged_path) {
                warnings.push(format!(
                    "staged file {} was copied but not cleaned up: {}",
                    file.staged_path.display(),
                    e
                ));
            }
        }

        // All copies landed; the stashed previous versions can go.
        for (target, backup) in &replaced {
            if let Err(e) = self.fs.remove_file(backup) {
                warnings.push(format!(
                    "previous version of {} was not cleaned up: {}",
                    target.display(),
                    e
                ));
            }
        }

        Ok(())
    }

    /// Move an existing target out of the way so a failed copy later in the
    /// call can restore it. Targets this call already wrote are not stashed;
    /// a duplicate name in one upload simply overwrites its own copy.
    fn stash_previous(
        &self,
        target: &PathBuf,
        created: &[PathBuf],
        replaced: &mut Vec<(PathBuf, PathBuf)>,
    ) -> EngineResult<()> {
        if !self.fs.is_file(target)
            || created.contains(target)
            || replaced.iter().any(|(t, _)| t == target)
        {
            return Ok(());
        }
        let backup = Self::backup_path(target);
        self.fs
            .rename(target, &backup)
            .map_err(|e| EngineError::StorageWriteFailed {
                path: target.clone(),
                message: e.to_string(),
            })?;
        replaced.push((target.clone(), backup));
        Ok(())
    }

    /// Best effort; the deploy already failed.
    fn undo(&self, created: &[PathBuf], replaced: &[(PathBuf, PathBuf)]) {
        for path in created {
            let _ = self.fs.remove_file(path);
        }
        for (target, backup) in replaced {
            let _ = self.fs.rename(backup, target);
        }
    }

    fn backup_path(target: &Path) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.prev", name))
    }
}
