//! Remove use case
//!
//! Deletes a deployment's storage subtree and its store record. The
//! ownership check is mandatory - a delete must never cross tenants. A
//! missing subtree is already-clean state, not an error; a subtree that
//! fails to delete is reported as a warning while the record is removed
//! anyway, so a ghost deployment never lingers in the store.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError};

use serde::Serialize;

use crate::domain::entities::{DeploymentId, TenantId};
use crate::domain::ports::{
    DeploymentStore, EngineEvent, EventSink, FileSystem, NoopEventSink, StoreError,
};
use crate::domain::value_objects::SafePath;
use crate::error::{EngineError, EngineResult};
use crate::infrastructure::locks::PathLocks;

/// Outcome of a remove
#[derive(Debug, Clone, Serialize)]
pub struct RemoveOutcome {
    pub id: DeploymentId,
    pub storage_path: PathBuf,
    /// Non-fatal problems, e.g. a directory that could not be deleted
    pub warnings: Vec<String>,
}

/// Remove use case - parameterized by its ports for testability
pub struct RemoveUseCase<S, F>
where
    S: DeploymentStore,
    F: FileSystem,
{
    storage_root: PathBuf,
    store: S,
    fs: F,
    locks: Arc<PathLocks>,
    events: Arc<dyn EventSink>,
}

impl<S, F> RemoveUseCase<S, F>
where
    S: DeploymentStore,
    F: FileSystem,
{
    pub fn new(storage_root: PathBuf, store: S, fs: F, locks: Arc<PathLocks>) -> Self {
        Self {
            storage_root,
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

    pub fn execute(&self, id: DeploymentId, tenant: &TenantId) -> EngineResult<RemoveOutcome> {
        let record = self.store.get(id)?.ok_or(EngineError::NotFound)?;
        if &record.tenant_id != tenant {
            return Err(EngineError::Forbidden);
        }

        // A record pointing outside the root can only come from a tampered
        // store file; refuse to follow it.
        if !SafePath::is_within(&record.storage_path, &self.storage_root) {
            return Err(EngineError::PathEscape {
                path: record.storage_path,
            });
        }

        self.events
            .on_event(EngineEvent::RemoveStarted { id: id.value() });

        let entry = self.locks.entry(&record.storage_path);
        let _guard = entry.lock().unwrap_or_else(PoisonError::into_inner);

        let mut warnings = Vec::new();
        if self.fs.exists(&record.storage_path) {
            if let Err(e) = self.fs.remove_dir_all(&record.storage_path) {
                let message = format!(
                    "directory {} could not be removed: {}",
                    record.storage_path.display(),
                    e
                );
                self.events.on_event(EngineEvent::RemoveWarning {
                    message: message.clone(),
                });
                warnings.push(message);
            }
        }

        self.store.delete(id).map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::NotFound,
            other => other.into(),
        })?;

        self.events.on_event(EngineEvent::RemoveCompleted {
            id: id.value(),
            path: record.storage_path.clone(),
        });

        Ok(RemoveOutcome {
            id,
            storage_path: record.storage_path,
            warnings,
        })
    }
}
