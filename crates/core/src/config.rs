//! Workspace configuration
//!
//! Configuration is an explicit value handed to each component at
//! construction. It can be loaded from an optional `shutter.toml` at
//! the project root; defaults apply when the file is absent.

use crate::walk::ExcludeRules;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional configuration file at the project root
pub const CONFIG_FILE: &str = "shutter.toml";

/// Snapshot tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory name of the snapshot store, relative to the project root
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Substring exclusion patterns applied while walking the project
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Load configuration from `shutter.toml` under `project_root`,
    /// falling back to defaults when the file does not exist
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Exclusion rules for walking the project
    ///
    /// The store directory is always excluded, regardless of what the
    /// configuration says, so a snapshot can never include the store.
    pub fn exclude_rules(&self) -> ExcludeRules {
        let mut rules = ExcludeRules::new(self.exclude.clone());
        rules.push(self.store_dir.clone());
        rules
    }
}

fn default_store_dir() -> String {
    ".snapshots".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![".git".to_string(), "target".to_string()]
}
