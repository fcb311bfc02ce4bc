//! Snapshot metadata model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shutter_core::Digest;
use std::collections::BTreeMap;
use ulid::Ulid;

/// A snapshot is a named, timestamped, immutable point-in-time copy of
/// a file tree plus this metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique id (ULID: millisecond timestamp prefix + random suffix)
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Free-text message
    pub message: String,
    /// Relative path (`/` separators) to content digest
    pub files: BTreeMap<String, Digest>,
}

impl Snapshot {
    /// Number of files captured by this snapshot
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// One-line summary of this snapshot
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            id: self.id.clone(),
            timestamp: self.timestamp,
            message: self.message.clone(),
            file_count: self.files.len(),
        }
    }
}

/// Listing entry for a stored snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub file_count: usize,
}

/// Source of snapshot ids and timestamps
///
/// Injected into [`crate::Workspace`] so tests can substitute
/// deterministic values.
pub trait IdSource {
    /// A fresh, never-reused snapshot id
    fn next_id(&self) -> String;
    /// The current time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock and ULID generator
pub struct SystemIds;

impl IdSource for SystemIds {
    fn next_id(&self) -> String {
        Ulid::new().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
