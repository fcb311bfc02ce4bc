//! List all snapshots, newest first

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    // 1. Open the workspace at the nearest project root
    let workspace = util::open_workspace()?;

    // 2. Read the store listing
    let snapshots = workspace.list().context("Failed to list snapshots")?;

    if snapshots.is_empty() {
        println!("{}", "No snapshots found.".dimmed());
        return Ok(());
    }

    // 3. One line per snapshot: index, id, local time, message, file count
    println!("{}", "Snapshots:".bold());
    for (index, snapshot) in snapshots.iter().enumerate() {
        let date = util::format_local_time(&snapshot.timestamp);
        println!(
            "{}. [{}] {} - {} ({} files)",
            index + 1,
            snapshot.id.yellow(),
            date.dimmed(),
            snapshot.message,
            snapshot.file_count
        );
    }

    Ok(())
}
