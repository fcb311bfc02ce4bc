//! Snapshot store and operations
//!
//! This crate provides:
//! - Snapshot metadata model (ULID-based ids + timestamps)
//! - The on-disk snapshot store (one directory per snapshot)
//! - The user-facing operations: create, list, compare, restore

pub mod error;
pub mod ops;
pub mod snapshot;
pub mod store;

// Re-exports
pub use error::StoreError;
pub use ops::{CreateReport, DiffReport, RestoreReport, Workspace, BACKUP_MESSAGE};
pub use snapshot::{IdSource, Snapshot, SnapshotSummary, SystemIds};
pub use store::{SnapshotStore, StagedFile, METADATA_FILE};
