//! JSON deployment store
//!
//! Persists deployment records in a single JSON file next to the storage
//! root. Saves go through a tempfile-then-rename so a crash mid-save never
//! leaves a torn file, and a sibling `.lock` file (fs2 advisory lock)
//! serializes writers across processes. An in-process mutex serializes
//! read-modify-write cycles within one process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Deployment, DeploymentId, DeploymentStatus, TenantId};
use crate::domain::ports::deployment_store::{
    DeploymentStore, NewDeployment, StoreError, StoreResult,
};

const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    next_id: u64,
    #[serde(default)]
    deployments: Vec<Deployment>,
}

impl StoreFile {
    fn empty() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: 0,
            deployments: Vec::new(),
        }
    }
}

/// File-backed deployment store
#[derive(Debug)]
pub struct JsonDeploymentStore {
    path: PathBuf,
    // Serializes load-modify-save within this process.
    write_lock: Mutex<()>,
}

impl JsonDeploymentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load(&self) -> StoreResult<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::empty());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        let file: StoreFile =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        if file.version != STORE_VERSION {
            return Err(StoreError::Corrupted {
                path: self.path.clone(),
                message: format!("unsupported store version {}", file.version),
            });
        }

        Ok(file)
    }

    fn save(&self, file: &StoreFile) -> StoreResult<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", parent.display(), e),
        })?;

        let content =
            serde_json::to_string_pretty(file).map_err(|e| StoreError::SerializationError {
                message: e.to_string(),
            })?;

        let tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
            StoreError::AccessError {
                message: format!("{}: {}", parent.display(), e),
            }
        })?;
        fs::write(tmp.path(), content).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", tmp.path().display(), e),
        })?;
        tmp.persist(&self.path).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        Ok(())
    }

    /// Run `mutate` under both the in-process mutex and the cross-process
    /// advisory lock, persisting the result.
    fn with_file<T>(
        &self,
        mutate: impl FnOnce(&mut StoreFile) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::AccessError {
                message: format!("{}: {}", parent.display(), e),
            })?;
        }
        let lock_file = fs::File::create(&lock_path).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", lock_path.display(), e),
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StoreError::AccessError {
                message: format!("{}: {}", lock_path.display(), e),
            })?;

        let result = (|| {
            let mut file = self.load()?;
            let value = mutate(&mut file)?;
            self.save(&file)?;
            Ok(value)
        })();

        let _ = fs2::FileExt::unlock(&lock_file);
        result
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

impl DeploymentStore for JsonDeploymentStore {
    fn create(&self, record: NewDeployment) -> StoreResult<Deployment> {
        self.with_file(|file| {
            if file.deployments.iter().any(|d| same_descriptor(d, &record)) {
                return Err(StoreError::DuplicateDescriptor {
                    tenant: record.tenant_id.to_string(),
                    site: record.site_name.clone(),
                });
            }
            file.next_id += 1;
            let deployment = to_deployment(file.next_id, record);
            file.deployments.push(deployment.clone());
            Ok(deployment)
        })
    }

    fn upsert(&self, record: NewDeployment) -> StoreResult<Deployment> {
        self.with_file(|file| {
            if let Some(existing) = file
                .deployments
                .iter_mut()
                .find(|d| same_descriptor(d, &record))
            {
                existing.updated_at = Utc::now();
                return Ok(existing.clone());
            }
            file.next_id += 1;
            let deployment = to_deployment(file.next_id, record);
            file.deployments.push(deployment.clone());
            Ok(deployment)
        })
    }

    fn list_by_tenant(&self, tenant: &TenantId) -> StoreResult<Vec<Deployment>> {
        let file = self.load()?;
        let mut records: Vec<Deployment> = file
            .deployments
            .into_iter()
            .filter(|d| &d.tenant_id == tenant)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn get(&self, id: DeploymentId) -> StoreResult<Option<Deployment>> {
        let file = self.load()?;
        Ok(file.deployments.into_iter().find(|d| d.id == id))
    }

    fn delete(&self, id: DeploymentId) -> StoreResult<()> {
        self.with_file(|file| {
            let before = file.deployments.len();
            file.deployments.retain(|d| d.id != id);
            if file.deployments.len() == before {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }
}
