//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use shutter_core::{Config, CONFIG_FILE};
use shutter_store::Workspace;
use std::path::PathBuf;
use tracing::debug;

/// Find the project root by walking up from cwd
///
/// The nearest ancestor carrying a `shutter.toml` or an existing store
/// directory wins; with neither in sight the current directory is the
/// root, so a first `create` bootstraps the store where it is run.
pub fn find_project_root() -> Result<PathBuf> {
    let start = std::env::current_dir().context("Failed to get current directory")?;
    let default_store = Config::default().store_dir;

    let mut current = start.as_path();
    loop {
        if current.join(CONFIG_FILE).is_file() || current.join(&default_store).is_dir() {
            return Ok(current.to_path_buf());
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Ok(start),
        }
    }
}

/// Open the workspace at the nearest project root
pub fn open_workspace() -> Result<Workspace> {
    let root = find_project_root()?;
    let config = Config::load(&root)
        .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
    debug!(root = %root.display(), store = %config.store_dir, "opened workspace");
    Ok(Workspace::new(root, config))
}

/// Format a timestamp as human-readable local time
pub fn format_local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
