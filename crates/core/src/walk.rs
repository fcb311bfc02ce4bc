//! Project file enumeration with exclusion rules

use crate::paths::normalize_rel_path;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Ordered set of substring exclusion patterns
///
/// An entry matches if any pattern is a substring of either its
/// absolute or its relative path. Matching directories are pruned
/// whole, so nothing beneath them is visited.
#[derive(Debug, Clone, Default)]
pub struct ExcludeRules {
    patterns: Vec<String>,
}

impl ExcludeRules {
    /// Build a rule set from substring patterns
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Add one more pattern, keeping insertion order
    pub fn push(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into());
    }

    /// Check whether a path matches any pattern
    pub fn matches(&self, absolute: &Path, relative: &Path) -> bool {
        let abs = absolute.to_string_lossy();
        let rel = relative.to_string_lossy();
        self.patterns
            .iter()
            .any(|pattern| abs.contains(pattern.as_str()) || rel.contains(pattern.as_str()))
    }

    /// The configured patterns, in order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Walk all files under `root`, skipping entries matched by `rules`
///
/// Traversal is depth-first with entries sorted by file name, so the
/// output order is deterministic for a fixed tree. Returned paths are
/// relative to `root` with `/` separators. Any unreadable entry aborts
/// the whole walk.
pub fn walk_files(root: &Path, rules: &ExcludeRules) -> Result<Vec<String>> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // Never prune the root itself
            if entry.depth() == 0 {
                return true;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path());
            let keep = !rules.matches(entry.path(), relative);
            if !keep {
                debug!(path = %relative.display(), "excluded from walk");
            }
            keep
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_dir() {
            let relative = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("Walked outside root: {}", entry.path().display()))?;
            files.push(normalize_rel_path(relative)?);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel.as_bytes()).unwrap();
    }

    #[test]
    fn test_walks_every_file_exactly_once() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.txt");
        touch(temp.path(), "src/main.rs");
        touch(temp.path(), "src/nested/mod.rs");

        let files = walk_files(temp.path(), &ExcludeRules::default()).unwrap();
        assert_eq!(files, vec!["a.txt", "src/main.rs", "src/nested/mod.rs"]);
    }

    #[test]
    fn test_excluded_file_omitted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "keep.txt");
        touch(temp.path(), "drop.log");

        let rules = ExcludeRules::new(vec![".log".to_string()]);
        let files = walk_files(temp.path(), &rules).unwrap();
        assert_eq!(files, vec!["keep.txt"]);
    }

    #[test]
    fn test_excluded_directory_pruned_whole() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/lib.rs");
        touch(temp.path(), "target/debug/out.bin");
        touch(temp.path(), "target/release/out.bin");

        let rules = ExcludeRules::new(vec!["target".to_string()]);
        let files = walk_files(temp.path(), &rules).unwrap();
        assert_eq!(files, vec!["src/lib.rs"]);
    }

    #[test]
    fn test_substring_matches_relative_path() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "docs/notes.md");
        touch(temp.path(), "code/notes.md");

        let rules = ExcludeRules::new(vec!["docs/".to_string()]);
        let files = walk_files(temp.path(), &rules).unwrap();
        assert_eq!(files, vec!["code/notes.md"]);
    }

    #[test]
    fn test_deterministic_order_run_to_run() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid/beta.txt", "mid/gamma.txt"] {
            touch(temp.path(), name);
        }

        let rules = ExcludeRules::default();
        let first = walk_files(temp.path(), &rules).unwrap();
        let second = walk_files(temp.path(), &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        assert!(walk_files(&missing, &ExcludeRules::default()).is_err());
    }

    #[test]
    fn test_empty_tree_yields_no_files() {
        let temp = TempDir::new().unwrap();
        let files = walk_files(temp.path(), &ExcludeRules::default()).unwrap();
        assert!(files.is_empty());
    }
}
