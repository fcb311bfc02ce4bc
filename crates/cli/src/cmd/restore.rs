//! Restore the project to a snapshot

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn run(id: &str) -> Result<()> {
    // 1. Open the workspace at the nearest project root
    let workspace = util::open_workspace()?;

    // 2. Validate the target, back up the current state, copy files back
    let report = workspace
        .restore(id)
        .with_context(|| format!("Failed to restore snapshot {id}"))?;

    // 3. Surface skipped files, then the outcome
    for path in &report.missing {
        eprintln!(
            "{} File {} not found in snapshot.",
            "Warning:".yellow().bold(),
            path
        );
    }

    println!(
        "Restored snapshot: {} ({} files)",
        report.restored_id.yellow(),
        report.restored_files
    );
    println!("Created backup: {}", report.backup_id.yellow());

    Ok(())
}
