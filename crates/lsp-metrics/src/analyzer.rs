//! Analysis run: scan, extract, aggregate

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike};

use crate::aggregate::Totals;
use crate::error::MetricsError;
use crate::extract::{extract, read_file};
use crate::record::MetricsRecord;
use crate::scanner::scan;

/// Set when the user asks the run to stop
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route Ctrl-C to this flag instead of killing the process
    pub fn install_ctrlc(&self) -> Result<(), ctrlc::Error> {
        let flag = self.0.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Fail with `Interrupted` if the flag is set
    pub fn check(&self) -> Result<(), MetricsError> {
        if self.is_set() {
            Err(MetricsError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Current local time at microsecond precision, matching the log's
/// `YYYY-MM-DDTHH:MM:SS.ffffff` timestamps
pub fn now_timestamp() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Analyzer for one workspace
pub struct Analyzer {
    workspace: PathBuf,
    extensions: Vec<String>,
}

impl Analyzer {
    pub fn new(workspace: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            workspace: workspace.into(),
            extensions,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Analyze every matching file and build the run's record
    ///
    /// Unreadable files are skipped with a warning. The interrupt flag is
    /// checked between files.
    pub fn run(&self, interrupt: &InterruptFlag) -> Result<MetricsRecord, MetricsError> {
        let timestamp = now_timestamp();
        let mut totals = Totals::new();

        tracing::info!(workspace = %self.workspace.display(), "analyzing workspace");

        for path in scan(&self.workspace, &self.extensions)? {
            interrupt.check()?;

            let relative = self.relative(&path);
            match read_file(&path) {
                Ok(content) => {
                    let stats = extract(&content, &relative);
                    tracing::debug!(
                        file = %relative,
                        lines = stats.line_count,
                        functions = stats.function_count,
                        flags = stats.flags.len(),
                        "analyzed file"
                    );
                    totals.add_file(stats);
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    totals.skip_file();
                }
            }
        }

        interrupt.check()?;

        tracing::info!(files = totals.file_count, lines = totals.total_lines, "analysis complete");
        Ok(totals.into_record(timestamp, self.workspace.display().to_string()))
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.workspace)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
