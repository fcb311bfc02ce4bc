//! Relative path normalization for snapshot records

use anyhow::Result;
use std::path::{Component, Path};

/// Normalize a path for storage inside a snapshot record
///
/// - Converts to a relative path with `/` separators
/// - Rejects absolute paths and `..` components
/// - Removes `./` prefixes
///
/// Every path written to or served from a snapshot directory goes
/// through this, so a hostile record cannot escape its directory.
pub fn normalize_rel_path(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Empty path");
    }

    let mut parts: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("Non-UTF-8 path: {}", path.display()))?;
                parts.push(part);
            }
            Component::CurDir => continue,
            Component::ParentDir => {
                anyhow::bail!("Path escapes project root: {}", path.display())
            }
            Component::RootDir | Component::Prefix(_) => {
                anyhow::bail!("Absolute path not allowed: {}", path.display())
            }
        }
    }

    if parts.is_empty() {
        anyhow::bail!("Empty path");
    }

    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_relative_path() {
        assert_eq!(normalize_rel_path(Path::new("src/main.rs")).unwrap(), "src/main.rs");
    }

    #[test]
    fn test_curdir_prefix_stripped() {
        assert_eq!(normalize_rel_path(Path::new("./a/b.txt")).unwrap(), "a/b.txt");
    }

    #[test]
    fn test_parent_component_rejected() {
        assert!(normalize_rel_path(Path::new("../etc/passwd")).is_err());
        assert!(normalize_rel_path(Path::new("a/../../b")).is_err());
    }

    #[test]
    fn test_absolute_path_rejected() {
        assert!(normalize_rel_path(Path::new("/etc/passwd")).is_err());
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(normalize_rel_path(Path::new("")).is_err());
        assert!(normalize_rel_path(Path::new(".")).is_err());
    }

    #[test]
    fn test_separators_normalized() {
        let joined: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(normalize_rel_path(&joined).unwrap(), "a/b/c.txt");
    }
}
