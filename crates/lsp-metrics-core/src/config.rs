//! Configuration for lsp-metrics
//!
//! Optional JSON file under the config directory. Every field has a default,
//! so a missing file or a partial one both work.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::Paths;

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace analyzed when none is passed on the command line
    #[serde(default)]
    pub default_workspace: Option<PathBuf>,

    /// Where run history is kept
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Number of runs kept in the history log
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// File extensions to scan, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_history_limit() -> usize {
    30
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_workspace: None,
            log_file: None,
            history_limit: default_history_limit(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from the standard location
    pub fn load(paths: &Paths) -> Result<Self> {
        Self::load_from(&paths.config_file())
    }

    /// Load configuration from a specific file, falling back to defaults if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        // At least the run just recorded must survive
        config.history_limit = config.history_limit.max(1);
        Ok(config)
    }

    /// Resolved default workspace
    pub fn workspace(&self, paths: &Paths) -> PathBuf {
        self.default_workspace
            .clone()
            .unwrap_or_else(|| paths.default_workspace())
    }

    /// Resolved history log location
    pub fn log_file(&self, paths: &Paths) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| paths.log_file())
    }
}
