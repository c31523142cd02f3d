//! Errors raised by the analysis pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors specific to a metrics run
///
/// Only `WorkspaceNotFound` and `Interrupted` abort a run. The rest are
/// recovered where they happen and surface as warnings.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Workspace not found: {}", .0.display())]
    WorkspaceNotFound(PathBuf),

    #[error("Error analyzing {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History log {} is unreadable: {reason}", .path.display())]
    HistoryCorrupt { path: PathBuf, reason: String },

    #[error("Error saving metrics to {}: {source}", .path.display())]
    HistoryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis interrupted by user")]
    Interrupted,
}

impl MetricsError {
    /// Whether this error ends the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WorkspaceNotFound(_) | Self::Interrupted)
    }
}
