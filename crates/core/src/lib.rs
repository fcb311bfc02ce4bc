//! Core primitives for the shutter snapshot tool
//!
//! This crate provides:
//! - BLAKE3 content digests (change detection)
//! - Filesystem walking with substring exclusion rules
//! - Relative path normalization
//! - Workspace configuration

pub mod config;
pub mod hash;
pub mod paths;
pub mod walk;

// Re-exports
pub use config::{Config, CONFIG_FILE};
pub use hash::{hash_bytes, hash_file, Digest};
pub use paths::normalize_rel_path;
pub use walk::{walk_files, ExcludeRules};
