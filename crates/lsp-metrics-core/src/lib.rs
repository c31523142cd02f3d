//! lsp-metrics core - shared paths and configuration
//!
//! Everything the analysis engine needs to know about where things live on
//! disk: the default workspace, the history log and the config file.

pub mod config;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
