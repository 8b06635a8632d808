//! Snapshot acquisition seam
//!
//! The diff engine never fetches snapshots itself; a [`SnapshotProvider`]
//! supplies them. This module provides the trait abstraction plus a
//! filesystem-backed implementation, enabling dependency injection of the
//! acquisition layer (in-memory providers for testing, remote fetchers,
//! sharded reassembly, etc.).

use crate::error::DiffError;
use crate::snapshot::model::BuildSnapshot;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for abstracting snapshot acquisition.
///
/// Implementations resolve an opaque snapshot id to a fully materialized
/// [`BuildSnapshot`]. The engine is only ever invoked with complete
/// snapshots; partial loads must fail here, not inside the diff.
pub trait SnapshotProvider {
    /// Load the snapshot identified by `id`.
    fn load(&self, id: &str) -> Result<BuildSnapshot, DiffError>;
}

/// Provider reading snapshot JSON files from a directory.
///
/// Ids that already end in `.json` are treated as file paths relative to the
/// provider root; bare ids are resolved to `<root>/<id>.json`.
pub struct FileSnapshotProvider {
    root: PathBuf,
}

impl FileSnapshotProvider {
    /// Create a provider rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn snapshot_path(&self, id: &str) -> PathBuf {
        if Path::new(id).extension().is_some_and(|ext| ext == "json") {
            self.root.join(id)
        } else {
            self.root.join(format!("{}.json", id))
        }
    }
}

impl SnapshotProvider for FileSnapshotProvider {
    fn load(&self, id: &str) -> Result<BuildSnapshot, DiffError> {
        let path = self.snapshot_path(id);
        let contents =
            std::fs::read_to_string(&path).map_err(|source| DiffError::SnapshotNotFound {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&contents).map_err(|source| DiffError::SnapshotParse { path, source })
    }
}

/// Deduplicating snapshot cache.
///
/// Wraps a [`SnapshotProvider`] and memoizes loads by id, so repeated
/// requests for the same snapshot (e.g. several diff views over one
/// baseline) hit the provider once. Entries are dropped explicitly via
/// [`SnapshotCache::invalidate`] when the underlying build is superseded.
pub struct SnapshotCache<P: SnapshotProvider> {
    provider: P,
    // Lock held across the load so concurrent requests for one id do a single read.
    entries: Mutex<HashMap<String, Arc<BuildSnapshot>>>,
}

impl<P: SnapshotProvider> SnapshotCache<P> {
    /// Create a cache over `provider`
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load the snapshot identified by `id`, reusing a cached copy if present
    pub fn load(&self, id: &str) -> Result<Arc<BuildSnapshot>, DiffError> {
        let mut entries = self.entries.lock();
        if let Some(snapshot) = entries.get(id) {
            log::debug!("snapshot cache hit: {}", id);
            return Ok(Arc::clone(snapshot));
        }

        log::debug!("snapshot cache miss: {}", id);
        let snapshot = Arc::new(self.provider.load(id)?);
        entries.insert(id.to_string(), Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop every cached snapshot whose content hash equals `hash`
    pub fn invalidate(&self, hash: &str) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, snapshot| snapshot.hash != hash);
        let dropped = before - entries.len();
        if dropped > 0 {
            log::info!("invalidated {} cached snapshot(s) for hash {}", dropped, hash);
        }
    }

    /// Number of snapshots currently cached
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
