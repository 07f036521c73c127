//! Fingerprint-keyed result cache collaborators.
//!
//! Re-running a reconciliation against an unmodified input table is pure
//! waste, so results are cached behind a get/put interface keyed by a
//! fingerprint of the table file. Persistence policy beyond that is the
//! caller's concern.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::models::ReconRow;

/// Identity of one input-table snapshot: path, size, and mtime. Any change
/// to the file produces a different fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableFingerprint(String);

impl TableFingerprint {
    pub fn for_file(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let mtime = meta
            .modified()?
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let sig = format!("{}|{}|{}", path.display(), meta.len(), mtime);
        let digest = Sha256::digest(sig.as_bytes());
        Ok(Self(format!("{digest:x}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Store of reconciliation results keyed by table fingerprint.
pub trait ResultStore {
    fn get(&self, key: &TableFingerprint) -> Option<Vec<ReconRow>>;
    fn put(&mut self, key: &TableFingerprint, rows: &[ReconRow]);
}

/// In-process session cache.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<ReconRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn get(&self, key: &TableFingerprint) -> Option<Vec<ReconRow>> {
        self.entries.get(key.as_str()).cloned()
    }

    fn put(&mut self, key: &TableFingerprint, rows: &[ReconRow]) {
        self.entries.insert(key.as_str().to_owned(), rows.to_vec());
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    ts: DateTime<Utc>,
    rows: Vec<ReconRow>,
}

/// One timestamped JSON file per fingerprint under a cache directory.
/// Writes are best-effort: a failed put is logged, never fatal.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &TableFingerprint) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    /// Remove every cached entry.
    pub fn clear(&self) -> std::io::Result<()> {
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl ResultStore for JsonFileStore {
    fn get(&self, key: &TableFingerprint) -> Option<Vec<ReconRow>> {
        let content = std::fs::read_to_string(self.entry_path(key)).ok()?;
        serde_json::from_str::<CacheEntry>(&content)
            .ok()
            .map(|entry| entry.rows)
    }

    fn put(&mut self, key: &TableFingerprint, rows: &[ReconRow]) {
        let entry = CacheEntry {
            ts: Utc::now(),
            rows: rows.to_vec(),
        };
        let path = self.entry_path(key);
        match serde_json::to_string_pretty(&entry) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(path = %path.display(), error = %e, "failed to write cache entry");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cache entry"),
        }
    }
}
