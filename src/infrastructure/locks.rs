//! Per-path mutual exclusion
//!
//! Deploy and remove on the same canonical storage path must be serialized;
//! a delete racing a redeploy would otherwise corrupt the directory or leave
//! an inconsistent store record. Reads never take a lock.
//!
//! Locks are keyed by the canonical storage path and live for the lifetime
//! of the registry; the set of distinct paths a process touches is small
//! enough that entries are not reclaimed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of per-storage-path locks.
#[derive(Debug, Default)]
pub struct PathLocks {
    inner: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock entry for a path. Callers hold the guard
    /// for the duration of their write phase:
    ///
    /// ```ignore
    /// let entry = locks.entry(&storage_path);
    /// let _guard = entry.lock().unwrap_or_else(PoisonError::into_inner);
    /// ```
    pub fn entry(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
