//! Snapshot operations: create, list, compare, restore
//!
//! A [`Workspace`] binds a project root, its configuration, the
//! snapshot store, and an id source. Operations return structured
//! reports; rendering is left to the caller.

use crate::error::StoreError;
use crate::snapshot::{IdSource, SnapshotSummary, SystemIds};
use crate::store::{SnapshotStore, StagedFile};
use anyhow::{Context, Result};
use shutter_core::{hash_bytes, normalize_rel_path, walk_files, Config};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Message used for the automatic snapshot taken before a restore
pub const BACKUP_MESSAGE: &str = "Automatic backup before restore";

/// Result of a `create` operation
#[derive(Debug)]
pub struct CreateReport {
    pub id: String,
    pub message: String,
    pub file_count: usize,
}

/// Result of a `compare` operation
///
/// Every path in the union of both snapshots' path sets lands in
/// exactly one bucket. Unchanged paths are summarized by count only.
#[derive(Debug)]
pub struct DiffReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    pub unchanged: usize,
}

impl DiffReport {
    /// True when both snapshots describe the same tree
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Result of a `restore` operation
#[derive(Debug)]
pub struct RestoreReport {
    pub restored_id: String,
    pub backup_id: String,
    pub restored_files: usize,
    /// Paths listed in the snapshot record but missing from its store
    /// directory; warned about and skipped
    pub missing: Vec<String>,
}

/// A project root with snapshot operations
pub struct Workspace {
    root: PathBuf,
    config: Config,
    store: SnapshotStore,
    ids: Box<dyn IdSource>,
}

impl Workspace {
    /// Open a workspace at `root` with the given configuration
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self::with_ids(root, config, Box::new(SystemIds))
    }

    /// Open a workspace with an explicit id source (used by tests)
    pub fn with_ids(root: impl Into<PathBuf>, config: Config, ids: Box<dyn IdSource>) -> Self {
        let root = root.into();
        let store = SnapshotStore::new(root.join(&config.store_dir));
        Self {
            root,
            config,
            store,
            ids,
        }
    }

    /// The project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The underlying snapshot store
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Snapshot the current project state
    ///
    /// Walks the project (the store directory is always excluded),
    /// digests every file, and writes a new store entry. The message
    /// defaults to `Snapshot <id>`.
    pub fn create(&self, message: Option<&str>) -> Result<CreateReport> {
        let rules = self.config.exclude_rules();
        let paths = walk_files(&self.root, &rules)
            .with_context(|| format!("Failed to walk {}", self.root.display()))?;

        let mut staged = BTreeMap::new();
        for rel in paths {
            let absolute = self.root.join(&rel);
            let bytes = fs::read(&absolute)
                .with_context(|| format!("Failed to read {}", absolute.display()))?;
            let digest = hash_bytes(&bytes);
            staged.insert(rel, StagedFile { digest, bytes });
        }

        let id = self.ids.next_id();
        let timestamp = self.ids.now();
        let message = match message {
            Some(message) => message.to_string(),
            None => format!("Snapshot {id}"),
        };

        let snapshot = self.store.create(&id, timestamp, &message, &staged)?;
        debug!(id, files = snapshot.file_count(), "created snapshot");

        Ok(CreateReport {
            id,
            message,
            file_count: snapshot.file_count(),
        })
    }

    /// List stored snapshots, newest first
    pub fn list(&self) -> Result<Vec<SnapshotSummary>> {
        Ok(self.store.list()?)
    }

    /// Classify every path in the union of two snapshots
    ///
    /// Fails with a not-found error if either id is absent; both
    /// records are read before any classification happens.
    pub fn compare(&self, id_a: &str, id_b: &str) -> Result<DiffReport> {
        let a = self.store.read(id_a)?;
        let b = self.store.read(id_b)?;

        let union: BTreeSet<&String> = a.files.keys().chain(b.files.keys()).collect();

        let mut report = DiffReport {
            added: Vec::new(),
            removed: Vec::new(),
            modified: Vec::new(),
            unchanged: 0,
        };

        for path in union {
            match (a.files.get(path), b.files.get(path)) {
                (None, Some(_)) => report.added.push(path.clone()),
                (Some(_), None) => report.removed.push(path.clone()),
                (Some(digest_a), Some(digest_b)) if digest_a != digest_b => {
                    report.modified.push(path.clone())
                }
                (Some(_), Some(_)) => report.unchanged += 1,
                (None, None) => unreachable!("path came from the union of both sets"),
            }
        }

        Ok(report)
    }

    /// Restore the project to a stored snapshot
    ///
    /// The target snapshot is validated first; only then is the
    /// automatic backup of the current state taken. Files listed in
    /// the record but missing from the store directory are warned
    /// about and skipped. Live files absent from the snapshot are
    /// left untouched; restore never deletes.
    pub fn restore(&self, id: &str) -> Result<RestoreReport> {
        let target = self.store.read(id)?;

        let backup = self
            .create(Some(BACKUP_MESSAGE))
            .context("Failed to back up current state before restore")?;

        let mut restored_files = 0;
        let mut missing = Vec::new();

        for rel in target.files.keys() {
            let bytes = match self.store.file_content(&target.id, rel) {
                Ok(bytes) => bytes,
                Err(StoreError::NotFound(_)) => {
                    warn!(path = %rel, snapshot = %target.id, "file missing from snapshot store, skipping");
                    missing.push(rel.clone());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let rel = normalize_rel_path(Path::new(rel))?;
            let live = self.root.join(&rel);
            if let Some(parent) = live.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&live, bytes)
                .with_context(|| format!("Failed to write {}", live.display()))?;
            restored_files += 1;
        }

        debug!(id, backup = %backup.id, restored_files, "restore complete");

        Ok(RestoreReport {
            restored_id: target.id,
            backup_id: backup.id,
            restored_files,
            missing,
        })
    }
}
