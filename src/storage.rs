//! Snapshot persistence for the room directory.
//!
//! DESIGN
//! ======
//! The directory persists as one JSON blob under a fixed key, loaded
//! wholesale on startup and overwritten wholesale on every mutation. The
//! store is not a transaction log: there is no partial write, no merge,
//! and concurrent writers are last-writer-wins at whole-snapshot
//! granularity.

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Room;

/// Fixed key the directory snapshot is stored under.
pub const STORAGE_KEY: &str = "scrumplan-rooms";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The whole-directory blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_room_id: Option<Uuid>,
}

/// Trait for snapshot backends.
pub trait SnapshotStore {
    /// Load the last persisted snapshot. `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<DirectorySnapshot>, StorageError>;

    /// Replace the persisted snapshot.
    fn save(&self, snapshot: &DirectorySnapshot) -> Result<(), StorageError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<DirectorySnapshot>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &DirectorySnapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Flat-file implementation: one JSON file under `root`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the root directory cannot be created.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { path: root.join(format!("{STORAGE_KEY}.json")) })
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<DirectorySnapshot>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &DirectorySnapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store: keeps a directory non-durable. Used by tests and by
/// callers that want a throwaway session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<DirectorySnapshot>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<DirectorySnapshot>, StorageError> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &DirectorySnapshot) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(snapshot.clone());
        Ok(())
    }
}
