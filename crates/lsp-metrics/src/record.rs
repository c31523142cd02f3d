//! Metrics record and the entries it carries
//!
//! Field names on disk match the log format older runs already wrote, so the
//! serde renames here are load-bearing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One analysis run over a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Local time the run started, ISO-8601 without offset
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    pub workspace: String,
    #[serde(rename = "python_files")]
    pub file_count: u64,
    pub total_lines: u64,
    #[serde(rename = "functions_found")]
    pub function_count: u64,
    #[serde(rename = "classes_found")]
    pub class_count: u64,
    #[serde(rename = "imports_found")]
    pub import_count: u64,
    #[serde(rename = "potential_hallucinations")]
    pub hallucination_flags: Vec<HallucinationFlag>,
    #[serde(rename = "lsp_benefits")]
    pub benefits: Vec<Benefit>,
}

/// `YYYY-MM-DDTHH:MM:SS.ffffff`, fraction omitted on whole seconds
mod iso_timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const WHOLE: &str = "%Y-%m-%dT%H:%M:%S";
    const MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    const ANY: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if ts.nanosecond() == 0 { WHOLE } else { MICROS };
        serializer.collect_str(&ts.format(format))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, ANY).map_err(serde::de::Error::custom)
    }
}

/// Heuristic pattern kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    SuspiciousImport,
}

impl FlagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuspiciousImport => "suspicious_import",
        }
    }
}

/// A line that looks like an import of something that does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallucinationFlag {
    /// Path relative to the workspace root
    pub file: String,
    /// 1-based line number
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: FlagKind,
    /// Stripped line text
    pub content: String,
}

/// Kinds of benefit attributed to structural tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    CrossFileNavigation,
    ImportValidation,
    TypeChecking,
    AutoCompletion,
}

impl BenefitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrossFileNavigation => "cross_file_navigation",
            Self::ImportValidation => "import_validation",
            Self::TypeChecking => "type_checking",
            Self::AutoCompletion => "auto_completion",
        }
    }

    /// Human title, e.g. "Cross File Navigation"
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Qualitative benefit derived from aggregate thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(rename = "type")]
    pub kind: BenefitKind,
    #[serde(rename = "benefit")]
    pub description: String,
    #[serde(rename = "without_lsp")]
    pub alternative: String,
    #[serde(rename = "time_saved")]
    pub estimated_time_saved: String,
}
