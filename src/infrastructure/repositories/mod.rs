//! Deployment store implementations

mod json_store;
mod memory;

pub use json_store::JsonDeploymentStore;
pub use memory::MemoryDeploymentStore;
