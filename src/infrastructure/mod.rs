//! Infrastructure layer
//!
//! Concrete implementations of the domain ports, plus the per-path lock
//! registry shared by the write-side use cases.

pub mod events;
pub mod fs;
pub mod locks;
pub mod repositories;

pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use locks::PathLocks;
pub use repositories::{JsonDeploymentStore, MemoryDeploymentStore};
