//! Create a new snapshot

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn run(message: Option<&str>) -> Result<()> {
    // 1. Open the workspace at the nearest project root
    let workspace = util::open_workspace()?;

    // 2. Walk, digest, and store the current project state
    let report = workspace
        .create(message)
        .context("Failed to create snapshot")?;

    // 3. Report what was captured
    println!("Created snapshot: {}", report.id.yellow());
    println!("Message: {}", report.message);
    println!("Files: {}", report.file_count);

    Ok(())
}
