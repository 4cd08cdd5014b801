//! Domain ports (interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides the concrete implementations.

pub mod deployment_store;
pub mod event_sink;
pub mod file_system;

pub use deployment_store::{DeploymentStore, NewDeployment, StoreError, StoreResult};
pub use event_sink::{EngineEvent, EventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
