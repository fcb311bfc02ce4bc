//! Compare two snapshots

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn run(id_a: &str, id_b: &str) -> Result<()> {
    // 1. Open the workspace at the nearest project root
    let workspace = util::open_workspace()?;

    // 2. Classify every path in the union of both snapshots
    let diff = workspace
        .compare(id_a, id_b)
        .context("Failed to compare snapshots")?;

    // 3. Render per-category counts and paths
    println!("Comparing snapshots: {} and {}", id_a.yellow(), id_b.yellow());
    println!();

    println!("{} ({} files)", "Added".green().bold(), diff.added.len());
    for path in &diff.added {
        println!("  {} {}", "+".green(), path);
    }

    println!("{} ({} files)", "Removed".red().bold(), diff.removed.len());
    for path in &diff.removed {
        println!("  {} {}", "-".red(), path);
    }

    println!("{} ({} files)", "Modified".yellow().bold(), diff.modified.len());
    for path in &diff.modified {
        println!("  {} {}", "~".yellow(), path);
    }

    println!("{} ({} files)", "Unchanged".bold(), diff.unchanged);

    if diff.is_clean() {
        println!();
        println!("{}", "No changes between snapshots".dimmed());
    }

    Ok(())
}
