//! In-memory deployment store
//!
//! Backs tests and ephemeral runs. Id assignment and descriptor matching
//! behave exactly like the JSON store so the two are interchangeable in the
//! use cases.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::domain::entities::{Deployment, DeploymentId, DeploymentStatus, TenantId};
use crate::domain::ports::deployment_store::{
    DeploymentStore, NewDeployment, StoreError, StoreResult,
};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    deployments: Vec<Deployment>,
}

/// Deployment store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryDeploymentStore {
    state: Mutex<MemoryState>,
}

impl MemoryDeploymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_descriptor(existing: &Deployment, record: &NewDeployment) -> bool {
    existing.tenant_id == record.tenant_id
        && existing.site_name == record.site_name
        && existing.domain == record.domain
}

fn to_deployment(id: u64, record: NewDeployment) -> Deployment {
    let now = Utc::now();
    Deployment {
        id: DeploymentId::new(id),
        tenant_id: record.tenant_id,
        site_name: record.site_name,
        domain: record.domain,
        storage_path: record.storage_path,
        status: DeploymentStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

impl DeploymentStore for MemoryDeploymentStore {
    fn create(&self, record: NewDeployment) -> StoreResult<Deployment> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.deployments.iter().any(|d| same_descriptor(d, &record)) {
            return Err(StoreError::DuplicateDescriptor {
                tenant: record.tenant_id.to_string(),
                site: record.site_name,
            });
        }

        state.next_id += 1;
        let deployment = to_deployment(state.next_id, record);
        state.deployments.push(deployment.clone());
        Ok(deployment)
    }

    fn upsert(&self, record: NewDeployment) -> StoreResult<Deployment> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = state
            .deployments
            .iter_mut()
            .find(|d| same_descriptor(d, &record))
        {
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        state.next_id += 1;
        let deployment = to_deployment(state.next_id, record);
        state.deployments.push(deployment.clone());
        Ok(deployment)
    }

    fn list_by_tenant(&self, tenant: &TenantId) -> StoreResult<Vec<Deployment>> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records: Vec<Deployment> = state
            .deployments
            .iter()
            .filter(|d| &d.tenant_id == tenant)
            .cloned()
            .collect();
        // Newest first.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn get(&self, id: DeploymentId) -> StoreResult<Option<Deployment>> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state.deployments.iter().find(|d| d.id == id).cloned())
    }

    fn delete(&self, id: DeploymentId) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let before = state.deployments.len();
        state.deployments.retain(|d| d.id != id);
        if state.deployments.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
