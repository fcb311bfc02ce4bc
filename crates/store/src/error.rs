//! Typed errors for snapshot store operations

use thiserror::Error;

/// Errors raised by the snapshot store and the operations on top of it
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot id does not name a readable store entry, or a file
    /// requested from a snapshot is absent
    #[error("Snapshot {0} does not exist")]
    NotFound(String),

    /// A snapshot directory with this id already exists
    #[error("Snapshot {0} already exists")]
    AlreadyExists(String),

    /// A relative path in a snapshot record is malformed or escapes
    /// the snapshot directory
    #[error("Invalid path in snapshot record: {0}")]
    InvalidPath(String),

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
