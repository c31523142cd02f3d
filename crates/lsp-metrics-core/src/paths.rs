//! Standard paths used by lsp-metrics

use std::path::PathBuf;

/// Name of the history log kept in the home directory
pub const LOG_FILE_NAME: &str = ".claude-lsp-metrics.log";

/// Standard lsp-metrics paths
pub struct Paths {
    /// Home directory (~)
    pub home: PathBuf,
    /// Config directory (~/.config/lsp-metrics)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

        let config = dirs::config_dir()
            .unwrap_or_else(|| home.join(".config"))
            .join("lsp-metrics");

        Self { home, config }
    }

    /// Paths rooted at an arbitrary home directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let config = home.join(".config").join("lsp-metrics");
        Self { home, config }
    }

    /// History log (~/.claude-lsp-metrics.log)
    pub fn log_file(&self) -> PathBuf {
        self.home.join(LOG_FILE_NAME)
    }

    /// Workspace analyzed when none is given
    pub fn default_workspace(&self) -> PathBuf {
        self.home.join("workspace").join("brevard-bidder-scraper")
    }

    /// Config file (~/.config/lsp-metrics/config.json)
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_relative_paths() {
        let paths = Paths::with_home("/home/dev");
        assert_eq!(
            paths.log_file(),
            PathBuf::from("/home/dev/.claude-lsp-metrics.log")
        );
        assert_eq!(
            paths.default_workspace(),
            PathBuf::from("/home/dev/workspace/brevard-bidder-scraper")
        );
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/home/dev/.config/lsp-metrics/config.json")
        );
    }
}
