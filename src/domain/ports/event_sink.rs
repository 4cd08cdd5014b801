//! Engine event port
//!
//! Observable interface for deploy and remove operations. Enables progress
//! reporting, NDJSON event streams, and operator-facing reconciliation
//! warnings (a store write that failed after files already landed must be
//! visible somewhere).

use std::path::PathBuf;

use serde::Serialize;

/// Event emitted during engine operations
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Deploy started
    DeployStarted {
        tenant: String,
        site: String,
        file_count: usize,
    },

    /// One staged file was copied into the storage directory
    FileDeployed { path: PathBuf },

    /// A copy failed; this call's files were removed again
    DeployRolledBack { path: PathBuf, undone: usize },

    /// Files are on disk but the record write failed - needs reconciliation
    StoreWarning { message: String },

    /// Deploy completed
    DeployCompleted { url: String, path: PathBuf },

    /// Remove started
    RemoveStarted { id: u64 },

    /// Directory removal failed; the record was still deleted
    RemoveWarning { message: String },

    /// Remove completed
    RemoveCompleted { id: u64, path: PathBuf },
}

/// Trait for receiving engine events
///
/// Implementations:
/// - `NoopEventSink`: discard everything (library default)
/// - `JsonEventSink`: NDJSON stream for CI / log shipping
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: EngineEvent);
}

/// Sink that discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn on_event(&self, _event: EngineEvent) {}
}
