//! End-to-end tests driving the shutter binary
//!
//! Each test gets its own temporary project directory and spawns the
//! real binary in it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command builder for the shutter binary
struct ShutterCommand {
    working_dir: PathBuf,
    args: Vec<String>,
}

impl ShutterCommand {
    fn new(working_dir: impl AsRef<Path>, args: &[&str]) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn execute(&self) -> Result<CommandResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_shutter"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .output()
            .context("Failed to execute shutter")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }
        Ok(result)
    }

    fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }
        Ok(result)
    }
}

struct CommandResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl CommandResult {
    fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Parse the first snapshot id from output (ULID: 26 chars starting 01)
    fn parse_snapshot_id(&self) -> Option<String> {
        for line in self.stdout.lines() {
            if let Some(id) = extract_ulid(line) {
                return Some(id);
            }
        }
        None
    }
}

/// Extract a ULID from a line of text, ignoring any ANSI styling around it
fn extract_ulid(line: &str) -> Option<String> {
    for (i, window) in line.as_bytes().windows(26).enumerate() {
        if window[0] == b'0' && window[1] == b'1' {
            let candidate = &line[i..i + 26];
            if candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Some(candidate.to_string());
            }
        }
    }
    None
}

fn shutter(dir: impl AsRef<Path>, args: &[&str]) -> ShutterCommand {
    ShutterCommand::new(dir, args)
}

#[test]
fn create_then_list() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;
    fs::create_dir(temp.path().join("src"))?;
    fs::write(temp.path().join("src/main.rs"), "fn main() {}")?;

    let created = shutter(temp.path(), &["create", "first snapshot"]).assert_success()?;
    assert!(created.stdout.contains("Created snapshot:"));
    assert!(created.stdout.contains("Message: first snapshot"));
    assert!(created.stdout.contains("Files: 2"));

    let id = created.parse_snapshot_id().context("no id in output")?;

    let listed = shutter(temp.path(), &["list"]).assert_success()?;
    assert!(listed.stdout.contains("Snapshots:"));
    assert!(listed.stdout.contains(&id));
    assert!(listed.stdout.contains("first snapshot"));
    assert!(listed.stdout.contains("(2 files)"));
    Ok(())
}

#[test]
fn list_with_empty_store() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let listed = shutter(temp.path(), &["list"]).assert_success()?;
    assert!(listed.stdout.contains("No snapshots found."));
    Ok(())
}

#[test]
fn generated_message_embeds_id() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;

    let created = shutter(temp.path(), &["create"]).assert_success()?;
    let id = created.parse_snapshot_id().context("no id in output")?;
    assert!(created.stdout.contains(&format!("Message: Snapshot {id}")));
    Ok(())
}

#[test]
fn compare_detects_changes() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;

    let first = shutter(temp.path(), &["create", "before"]).assert_success()?;
    let id_a = first.parse_snapshot_id().context("no id in output")?;

    fs::write(temp.path().join("a.txt"), "world")?;
    fs::write(temp.path().join("b.txt"), "new")?;

    let second = shutter(temp.path(), &["create", "after"]).assert_success()?;
    let id_b = second.parse_snapshot_id().context("no id in output")?;

    let diff = shutter(temp.path(), &["compare", &id_a, &id_b]).assert_success()?;
    assert!(diff.stdout.contains("Comparing snapshots:"));
    assert!(diff.stdout.contains("b.txt"));
    assert!(diff.stdout.contains("a.txt"));

    // One added, one modified, nothing removed or unchanged
    assert!(diff.stdout.contains("(1 files)"));
    assert!(diff.stdout.contains("(0 files)"));
    Ok(())
}

#[test]
fn compare_missing_id_fails() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;
    let created = shutter(temp.path(), &["create"]).assert_success()?;
    let id = created.parse_snapshot_id().context("no id in output")?;

    let result = shutter(temp.path(), &["compare", &id, "01BOGUSBOGUSBOGUSBOGUSBOGU"]).assert_failure()?;
    assert!(result.stderr.contains("does not exist"));
    Ok(())
}

#[test]
fn compare_with_one_argument_is_a_usage_error() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;

    let result = shutter(temp.path(), &["compare", "only-one-id"]).assert_failure()?;
    assert!(result.stderr.contains("Usage"));

    // The argument check happens before any store access
    assert!(!temp.path().join(".snapshots").exists());
    Ok(())
}

#[test]
fn unknown_subcommand_prints_usage() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let result = shutter(temp.path(), &["frobnicate"]).assert_failure()?;
    assert!(result.stderr.contains("Usage"));
    Ok(())
}

#[test]
fn restore_roundtrip() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;

    let created = shutter(temp.path(), &["create", "good state"]).assert_success()?;
    let id = created.parse_snapshot_id().context("no id in output")?;

    fs::write(temp.path().join("a.txt"), "broken")?;

    let restored = shutter(temp.path(), &["restore", &id]).assert_success()?;
    assert!(restored.stdout.contains("Restored snapshot:"));
    assert!(restored.stdout.contains("Created backup:"));

    assert_eq!(fs::read_to_string(temp.path().join("a.txt"))?, "hello");

    // Target snapshot plus the automatic backup
    let listed = shutter(temp.path(), &["list"]).assert_success()?;
    assert!(listed.stdout.contains("good state"));
    assert!(listed.stdout.contains("Automatic backup before restore"));
    Ok(())
}

#[test]
fn restore_unknown_id_fails_without_backup() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;
    shutter(temp.path(), &["create", "only"]).assert_success()?;

    let result = shutter(temp.path(), &["restore", "bogus-123"]).assert_failure()?;
    assert!(result.stderr.contains("does not exist"));

    // No spurious backup snapshot appeared
    let listed = shutter(temp.path(), &["list"]).assert_success()?;
    assert!(!listed.stdout.contains("Automatic backup before restore"));
    Ok(())
}

#[test]
fn store_directory_is_never_snapshotted() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("a.txt"), "hello")?;

    shutter(temp.path(), &["create", "first"]).assert_success()?;
    let second = shutter(temp.path(), &["create", "second"]).assert_success()?;

    // Still one file: the store from the first create was excluded
    assert!(second.stdout.contains("Files: 1"));
    Ok(())
}

#[test]
fn config_file_controls_exclusions() -> Result<()> {
    let temp = tempfile::tempdir()?;
    fs::write(temp.path().join("shutter.toml"), "exclude = [\".log\"]\n")?;
    fs::write(temp.path().join("keep.txt"), "keep")?;
    fs::write(temp.path().join("debug.log"), "drop")?;

    let created = shutter(temp.path(), &["create", "configured"]).assert_success()?;
    assert!(created.stdout.contains("Files: 2")); // keep.txt + shutter.toml
    Ok(())
}
