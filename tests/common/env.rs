//! Isolated test environment for engine-level tests.
//!
//! Each `TestEnv` owns a temp directory holding the storage root, the
//! staging area, and the record file, so tests never touch real state and
//! can run in parallel.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use sitedock::domain::entities::StagedFile;
use sitedock::domain::services::{PathResolver, RequestRouter};
use sitedock::infrastructure::{JsonDeploymentStore, LocalFs, PathLocks};
use sitedock::{DeployUseCase, EngineConfig, RemoveUseCase, ServeUseCase};

/// Isolated engine environment backed by a temp directory.
pub struct TestEnv {
    tmp: TempDir,
    locks: Arc<PathLocks>,
    staged_count: std::cell::Cell<usize>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("temp dir"),
            locks: Arc::new(PathLocks::new()),
            staged_count: std::cell::Cell::new(0),
        }
    }

    /// Engine configuration rooted in this environment's temp directory.
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            storage_root: self.storage_root(),
            origin: "http://localhost:3000".to_string(),
            ..EngineConfig::default()
        }
    }

    pub fn storage_root(&self) -> PathBuf {
        self.tmp.path().join("deployed")
    }

    /// Path under the storage root.
    pub fn deployed_path(&self, relative: &str) -> PathBuf {
        self.storage_root().join(relative)
    }

    /// A store instance over this environment's record file. Separate
    /// instances over the same file see each other's writes, like separate
    /// connections to one database.
    pub fn store(&self) -> JsonDeploymentStore {
        JsonDeploymentStore::new(self.storage_root().join("deployments.json"))
    }

    pub fn deploy_engine(&self) -> DeployUseCase<JsonDeploymentStore, LocalFs> {
        DeployUseCase::new(
            PathResolver::new(self.config()),
            self.store(),
            LocalFs::new(),
            self.locks.clone(),
        )
    }

    pub fn remove_engine(&self) -> RemoveUseCase<JsonDeploymentStore, LocalFs> {
        RemoveUseCase::new(
            self.storage_root(),
            self.store(),
            LocalFs::new(),
            self.locks.clone(),
        )
    }

    pub fn serve_engine(&self) -> ServeUseCase<LocalFs> {
        ServeUseCase::new(RequestRouter::new(self.config()), LocalFs::new())
    }

    /// Materialize one staged upload with the given client-side name.
    pub fn stage(&self, original_name: &str, content: &str) -> StagedFile {
        let n = self.staged_count.get();
        self.staged_count.set(n + 1);

        let staging = self.tmp.path().join("staging");
        std::fs::create_dir_all(&staging).expect("staging dir");
        let staged_path = staging.join(format!("upload-{}", n));
        std::fs::write(&staged_path, content).expect("stage file");

        StagedFile::new(
            original_name,
            staged_path,
            content.len() as u64,
            "text/html",
        )
    }

    /// Read a deployed file back as a string.
    pub fn read_deployed(&self, relative: &str) -> String {
        std::fs::read_to_string(self.deployed_path(relative)).expect("deployed file")
    }

    pub fn locks(&self) -> Arc<PathLocks> {
        self.locks.clone()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
