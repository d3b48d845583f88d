//! In-memory store for tests and ephemeral sessions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::snapshot::Snapshot;
use crate::errors::StaffingError;

use super::{Result, SnapshotStore};

/// Keeps the snapshot in process memory, never touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Snapshot>,
    revision: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            revision: AtomicU64::new(0),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Snapshot> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| StaffingError::Storage("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| StaffingError::Storage("snapshot lock poisoned".to_string()))?;
        *guard = snapshot.clone();
        self.revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}
