//! Domain entities

mod deployment;
mod staged_file;

pub use deployment::{
    Deployment, DeploymentId, DeploymentStatus, Descriptor, TenantId,
};
pub use staged_file::StagedFile;
