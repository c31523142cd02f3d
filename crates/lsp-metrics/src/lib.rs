//! lsp-metrics - Workspace metrics logger
//!
//! Walks a tree of Python sources, counts what a language server would index
//! (functions, classes, imports), flags imports that look made up, and keeps
//! a rolling history of runs.
//!
//! Pipeline:
//! - scanner: find candidate source files
//! - extract: per-file line statistics and suspicious-import flags
//! - aggregate: sum files into a record and derive benefits
//! - savings: fixed-formula time savings projection
//! - history: bounded on-disk log of past records

pub mod aggregate;
pub mod analyzer;
pub mod display;
pub mod error;
pub mod extract;
pub mod history;
pub mod record;
pub mod savings;
pub mod scanner;

pub use aggregate::{derive_benefits, Totals};
pub use analyzer::{Analyzer, InterruptFlag};
pub use error::MetricsError;
pub use extract::{extract, FileStats};
pub use history::HistoryStore;
pub use record::{Benefit, BenefitKind, FlagKind, HallucinationFlag, MetricsRecord};
pub use savings::TimeSavings;
