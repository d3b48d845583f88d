//! JSON file store with atomic replace-on-save.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::domain::snapshot::Snapshot;
use crate::utils::{app_data_dir, ensure_dir};

use super::{Result, SnapshotStore};

const SNAPSHOT_FILE: &str = "snapshot.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the snapshot as pretty-printed JSON on disk.
///
/// Saves go through a sibling temp file and a rename, so a crash mid-write
/// leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    revision: AtomicU64,
}

impl JsonStore {
    /// Creates a store rooted at the application data directory.
    pub fn new_default() -> Self {
        Self::at_path(app_data_dir().join(SNAPSHOT_FILE))
    }

    /// Creates a store backed by an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            revision: AtomicU64::new(0),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonStore {
    fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            info!("no snapshot at {}, starting empty", self.path.display());
            return Ok(Snapshot::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&raw)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let payload = serde_json::to_string_pretty(snapshot)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &payload)?;
        fs::rename(&tmp, &self.path)?;
        self.revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
