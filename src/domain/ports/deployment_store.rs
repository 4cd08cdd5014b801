//! DeploymentStore port - thin record API over the metadata layer
//!
//! The engine needs only insert/query/delete of deployment records; any
//! durable relational or key-value store can back this trait.

use std::path::PathBuf;

use crate::domain::entities::{Deployment, DeploymentId, TenantId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Strict `create` found an existing record for the same descriptor
    #[error("a deployment for tenant '{tenant}' site '{site}' already exists")]
    DuplicateDescriptor { tenant: String, site: String },

    /// No record with the given id
    #[error("no deployment record with id {0}")]
    NotFound(DeploymentId),

    /// Underlying storage could not be reached or written
    #[error("failed to access deployment store: {message}")]
    AccessError { message: String },

    /// Record file exists but cannot be parsed
    #[error("deployment store corrupted: {path}: {message}")]
    Corrupted { path: PathBuf, message: String },

    /// Serialization failure while saving
    #[error("failed to serialize deployment store: {message}")]
    SerializationError { message: String },
}

/// Fields of a record before the store assigns an id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeployment {
    pub tenant_id: TenantId,
    pub site_name: String,
    pub domain: Option<String>,
    pub storage_path: PathBuf,
}

/// Abstract repository for deployment records
///
/// Descriptor identity is `(tenant_id, site_name, domain)`; the storage path
/// is derived from those and never part of the key.
pub trait DeploymentStore: Send + Sync {
    /// Strict insert. Fails with `DuplicateDescriptor` when a record with
    /// the same descriptor already exists. The normal deploy flow uses
    /// `upsert` instead.
    fn create(&self, record: NewDeployment) -> StoreResult<Deployment>;

    /// Insert, or refresh `updated_at` on the existing record for the same
    /// descriptor. This is the redeploy path.
    fn upsert(&self, record: NewDeployment) -> StoreResult<Deployment>;

    /// All records owned by a tenant, newest first.
    fn list_by_tenant(&self, tenant: &TenantId) -> StoreResult<Vec<Deployment>>;

    /// Look up a record by id.
    fn get(&self, id: DeploymentId) -> StoreResult<Option<Deployment>>;

    /// Delete a record by id. Fails with `NotFound` when absent.
    fn delete(&self, id: DeploymentId) -> StoreResult<()>;
}
