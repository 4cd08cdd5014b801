//! Test doubles - ports that fail on demand.

use std::path::Path;

use sitedock::domain::entities::{Deployment, DeploymentId, TenantId};
use sitedock::domain::ports::{
    DeploymentStore, FileSystem, FsError, FsResult, NewDeployment, StoreError, StoreResult,
};
use sitedock::infrastructure::LocalFs;

fn io_denied(path: &Path) -> FsError {
    FsError::from_io(
        path,
        std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
    )
}

/// Filesystem that behaves like `LocalFs` except copies to a target whose
/// file name matches `fail_on` fail.
pub struct FlakyCopyFs {
    inner: LocalFs,
    fail_on: String,
}

impl FlakyCopyFs {
    pub fn failing_on(file_name: &str) -> Self {
        Self {
            inner: LocalFs::new(),
            fail_on: file_name.to_string(),
        }
    }
}

impl FileSystem for FlakyCopyFs {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        if to.file_name().and_then(|n| n.to_str()) == Some(self.fail_on.as_str()) {
            return Err(io_denied(to));
        }
        self.inner.copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.inner.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_dir_all(path)
    }
}

/// Filesystem that refuses to delete directory subtrees.
pub struct StickyDirFs {
    inner: LocalFs,
}

impl StickyDirFs {
    pub fn new() -> Self {
        Self {
            inner: LocalFs::new(),
        }
    }
}

impl Default for StickyDirFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for StickyDirFs {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.inner.copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.inner.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        Err(io_denied(path))
    }
}

/// Store whose writes always fail, for exercising the reconciliation path.
pub struct ReadOnlyStore;

impl ReadOnlyStore {
    fn refused() -> StoreError {
        StoreError::AccessError {
            message: "store is read-only".to_string(),
        }
    }
}

impl DeploymentStore for ReadOnlyStore {
    fn create(&self, _record: NewDeployment) -> StoreResult<Deployment> {
        Err(Self::refused())
    }

    fn upsert(&self, _record: NewDeployment) -> StoreResult<Deployment> {
        Err(Self::refused())
    }

    fn list_by_tenant(&self, _tenant: &TenantId) -> StoreResult<Vec<Deployment>> {
        Ok(Vec::new())
    }

    fn get(&self, _id: DeploymentId) -> StoreResult<Option<Deployment>> {
        Ok(None)
    }

    fn delete(&self, _id: DeploymentId) -> StoreResult<()> {
        Err(Self::refused())
    }
}
