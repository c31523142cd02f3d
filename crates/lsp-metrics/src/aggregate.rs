//! Workspace-level aggregation and benefit derivation

use chrono::NaiveDateTime;

use crate::extract::FileStats;
use crate::record::{Benefit, BenefitKind, HallucinationFlag, MetricsRecord};

/// Functions needed before cross-file navigation is worth mentioning
pub const NAVIGATION_THRESHOLD: u64 = 20;
/// Imports needed before import validation is worth mentioning
pub const IMPORT_THRESHOLD: u64 = 50;
/// Files needed before type checking is worth mentioning
pub const TYPE_CHECK_THRESHOLD: u64 = 10;

/// Running totals over the files of one scan
#[derive(Debug, Clone, Default)]
pub struct Totals {
    pub file_count: u64,
    pub total_lines: u64,
    pub function_count: u64,
    pub class_count: u64,
    pub import_count: u64,
    pub flags: Vec<HallucinationFlag>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one analyzed file into the totals
    pub fn add_file(&mut self, stats: FileStats) {
        self.file_count += 1;
        self.total_lines += stats.line_count;
        self.function_count += stats.function_count;
        self.class_count += stats.class_count;
        self.import_count += stats.import_count;
        self.flags.extend(stats.flags);
    }

    /// Count a discovered file that could not be read
    pub fn skip_file(&mut self) {
        self.file_count += 1;
    }

    /// Benefits implied by the current totals
    pub fn benefits(&self) -> Vec<Benefit> {
        derive_benefits(self.file_count, self.function_count, self.import_count)
    }

    /// Finish the run and produce its record
    pub fn into_record(self, timestamp: NaiveDateTime, workspace: String) -> MetricsRecord {
        let benefits = self.benefits();
        MetricsRecord {
            timestamp,
            workspace,
            file_count: self.file_count,
            total_lines: self.total_lines,
            function_count: self.function_count,
            class_count: self.class_count,
            import_count: self.import_count,
            hallucination_flags: self.flags,
            benefits,
        }
    }
}

/// Threshold rules, evaluated in fixed order; auto-completion always applies
pub fn derive_benefits(file_count: u64, function_count: u64, import_count: u64) -> Vec<Benefit> {
    let mut benefits = Vec::new();

    if function_count > NAVIGATION_THRESHOLD {
        benefits.push(Benefit {
            kind: BenefitKind::CrossFileNavigation,
            description: format!(
                "LSP enables instant navigation across {} functions",
                function_count
            ),
            alternative: "Manual grep/search through files".to_string(),
            estimated_time_saved: "~2-3 min per lookup".to_string(),
        });
    }

    if import_count > IMPORT_THRESHOLD {
        benefits.push(Benefit {
            kind: BenefitKind::ImportValidation,
            description: format!(
                "LSP validates {} import statements in real-time",
                import_count
            ),
            alternative: "Runtime errors or manual verification".to_string(),
            estimated_time_saved: "~30 sec per import error".to_string(),
        });
    }

    if file_count > TYPE_CHECK_THRESHOLD {
        benefits.push(Benefit {
            kind: BenefitKind::TypeChecking,
            description: format!("LSP provides type hints across {} files", file_count),
            alternative: "Type errors discovered at runtime".to_string(),
            estimated_time_saved: "~1-2 min per type error".to_string(),
        });
    }

    benefits.push(Benefit {
        kind: BenefitKind::AutoCompletion,
        description: "LSP provides context-aware completions".to_string(),
        alternative: "Manual typing or guessing function signatures".to_string(),
        estimated_time_saved: "~10-15 sec per function call".to_string(),
    });

    benefits
}
