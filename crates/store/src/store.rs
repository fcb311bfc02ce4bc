//! On-disk snapshot store
//!
//! The store root holds one directory per snapshot id. Each snapshot
//! directory mirrors the project's relative file tree and carries a
//! single `metadata.json` record as its only non-file-tree artifact:
//!
//! ```text
//! .snapshots/
//!   01HXKJ7NVQW3Y2YMZK5VFZX3G8/
//!     metadata.json
//!     src/main.rs
//!     README.md
//! ```

use crate::error::StoreError;
use crate::snapshot::{Snapshot, SnapshotSummary};
use chrono::{DateTime, Utc};
use shutter_core::{normalize_rel_path, Digest};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the metadata record inside each snapshot directory
pub const METADATA_FILE: &str = "metadata.json";

/// A file staged for inclusion in a snapshot
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Content digest of `bytes`
    pub digest: Digest,
    /// Full file content
    pub bytes: Vec<u8>,
}

/// Snapshot store rooted at a single directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a handle for the store at `root`
    ///
    /// The directory is created lazily on the first `create`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a new snapshot
    ///
    /// Writes every staged file under a fresh directory named by `id`,
    /// creating intermediate directories as needed, then writes the
    /// metadata record. A failure partway may leave a partially
    /// populated directory behind.
    pub fn create(
        &self,
        id: &str,
        timestamp: DateTime<Utc>,
        message: &str,
        staged: &BTreeMap<String, StagedFile>,
    ) -> Result<Snapshot, StoreError> {
        if !valid_id(id) {
            return Err(StoreError::InvalidPath(id.to_string()));
        }

        fs::create_dir_all(&self.root)?;

        let dir = self.root.join(id);
        if dir.exists() {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        fs::create_dir(&dir)?;

        let mut files = BTreeMap::new();
        for (rel, file) in staged {
            let rel = normalize_rel_path(Path::new(rel))
                .map_err(|e| StoreError::InvalidPath(e.to_string()))?;
            let target = dir.join(&rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.bytes)?;
            files.insert(rel, file.digest);
        }

        let snapshot = Snapshot {
            id: id.to_string(),
            timestamp,
            message: message.to_string(),
            files,
        };
        let record = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        fs::write(dir.join(METADATA_FILE), record)?;

        debug!(id, files = snapshot.file_count(), "snapshot stored");
        Ok(snapshot)
    }

    /// List every snapshot with a parsable metadata record, newest first
    ///
    /// Ties on timestamp break by id, descending, so the order is
    /// deterministic. Directories without a valid record are skipped.
    pub fn list(&self) -> Result<Vec<SnapshotSummary>, StoreError> {
        let mut summaries = Vec::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(summaries),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match read_metadata(&entry.path()) {
                Ok(snapshot) => summaries.push(snapshot.summary()),
                Err(e) => {
                    debug!(dir = %entry.path().display(), error = %e, "skipping invalid store entry");
                }
            }
        }

        summaries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }

    /// Read the full metadata record for `id`
    ///
    /// An absent or unparsable record is `NotFound`; other I/O
    /// failures propagate as-is.
    pub fn read(&self, id: &str) -> Result<Snapshot, StoreError> {
        let dir = self.snapshot_dir(id)?;
        match read_metadata(&dir) {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::NotFound(_)) => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(e),
        }
    }

    /// Read the bytes of `rel_path` inside snapshot `id`
    pub fn file_content(&self, id: &str, rel_path: &str) -> Result<Vec<u8>, StoreError> {
        let dir = self.snapshot_dir(id)?;
        if !dir.is_dir() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let rel = normalize_rel_path(Path::new(rel_path))
            .map_err(|e| StoreError::InvalidPath(e.to_string()))?;
        match fs::read(dir.join(rel)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(format!("{id}:{rel_path}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the directory for `id`, rejecting ids that could never
    /// name a store entry (path separators, `..`, empty)
    fn snapshot_dir(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !valid_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.root.join(id))
    }
}

/// Ids are single path components of alphanumerics and dashes
fn valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn read_metadata(dir: &Path) -> Result<Snapshot, StoreError> {
    let raw = match fs::read(dir.join(METADATA_FILE)) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StoreError::NotFound(dir.display().to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&raw)
        .map_err(|_| StoreError::NotFound(dir.display().to_string()))
}
