//! Console output
//!
//! Summary of a run, the savings projection and the history table.

use std::fmt::Write as _;
use std::path::Path;

use crate::record::MetricsRecord;
use crate::savings::TimeSavings;

/// Flags listed in the summary before the rest are elided
pub const FLAGS_SHOWN: usize = 3;

const RULE_WIDTH: usize = 60;

/// Escape codes for the summary, empty when stdout is not a terminal
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    const ANSI: Colors = Colors {
        red: "\x1b[0;31m",
        green: "\x1b[0;32m",
        yellow: "\x1b[0;33m",
        cyan: "\x1b[0;36m",
        bold: "\x1b[1m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    const PLAIN: Colors = Colors {
        red: "",
        green: "",
        yellow: "",
        cyan: "",
        bold: "",
        dim: "",
        reset: "",
    };

    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }

    /// Colored only when stdout is a terminal
    pub fn auto() -> Self {
        Self::new(stdout_is_tty())
    }
}

#[cfg(unix)]
fn stdout_is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
fn stdout_is_tty() -> bool {
    true
}

/// Format an integer with thousands separators
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Tool banner printed before analysis
pub fn banner(colors: &Colors) -> String {
    format!(
        "\n{}lsp-metrics{} v{}\n   Purpose: Track Language Server Protocol benefits\n",
        colors.bold,
        colors.reset,
        env!("CARGO_PKG_VERSION")
    )
}

/// Full run summary
pub fn format_summary(record: &MetricsRecord, savings: &TimeSavings, colors: &Colors) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "{}LSP METRICS SUMMARY{}", colors.bold, colors.reset);
    let _ = writeln!(out, "{}", rule());

    let _ = writeln!(out, "\n{}Workspace Analysis:{}", colors.cyan, colors.reset);
    let _ = writeln!(out, "  - Python files: {}", record.file_count);
    let _ = writeln!(out, "  - Total lines: {}", format_thousands(record.total_lines));
    let _ = writeln!(out, "  - Functions: {}", record.function_count);
    let _ = writeln!(out, "  - Classes: {}", record.class_count);
    let _ = writeln!(out, "  - Imports: {}", record.import_count);

    if record.hallucination_flags.is_empty() {
        let _ = writeln!(
            out,
            "\n{}No Obvious Hallucination Patterns Detected{}",
            colors.green, colors.reset
        );
    } else {
        let _ = writeln!(
            out,
            "\n{}Potential Hallucinations Detected: {}{}",
            colors.yellow,
            record.hallucination_flags.len(),
            colors.reset
        );
        for flag in record.hallucination_flags.iter().take(FLAGS_SHOWN) {
            let _ = writeln!(out, "  - {}:{} - {}", flag.file, flag.line, flag.kind.as_str());
        }
    }

    let _ = writeln!(out, "\n{}LSP Benefits in This Workspace:{}", colors.cyan, colors.reset);
    for (i, benefit) in record.benefits.iter().enumerate() {
        let _ = writeln!(out, "\n  {}. {}", i + 1, benefit.kind.title());
        let _ = writeln!(out, "     {}+{} {}", colors.green, colors.reset, benefit.description);
        let _ = writeln!(out, "     Without LSP: {}", benefit.alternative);
        let _ = writeln!(out, "     Time saved: {}", benefit.estimated_time_saved);
    }

    let _ = writeln!(out, "\n{}Estimated Time Savings:{}", colors.cyan, colors.reset);
    let _ = writeln!(
        out,
        "  - Per session (7 hours): ~{} minutes",
        savings.per_session
    );
    let _ = writeln!(out, "  - Per week (5 sessions): ~{} minutes", savings.per_week);
    let _ = writeln!(out, "  - Per month (20 sessions): ~{} hours", savings.per_month);

    out
}

/// Footer naming the log location
pub fn format_footer(log_file: &Path) -> String {
    format!(
        "\n{}\nFull metrics logged to: {}\n{}\n",
        rule(),
        log_file.display(),
        rule()
    )
}

/// Closing hint on reviewing past runs
pub fn format_tip(colors: &Colors) -> String {
    format!(
        "\n{}Tip: Run this weekly to track LSP improvements over time\n   View history: lsp-metrics history{}",
        colors.dim, colors.reset
    )
}

/// One line per stored run, newest last
pub fn format_history(records: &[MetricsRecord], colors: &Colors) -> String {
    if records.is_empty() {
        return format!("{}No runs recorded yet{}\n", colors.dim, colors.reset);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{:<20} {:>6} {:>9} {:>6} {:>6}  WORKSPACE{}",
        colors.bold, "TIMESTAMP", "FILES", "LINES", "FUNCS", "FLAGS", colors.reset
    );
    for record in records {
        let flags = record.hallucination_flags.len();
        let flag_color = if flags > 0 { colors.red } else { "" };
        let flag_reset = if flags > 0 { colors.reset } else { "" };
        let _ = writeln!(
            out,
            "{:<20} {:>6} {:>9} {:>6} {}{:>6}{}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.file_count,
            format_thousands(record.total_lines),
            record.function_count,
            flag_color,
            flags,
            flag_reset,
            record.workspace
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Totals;
    use crate::extract::extract;
    use chrono::NaiveDate;

    fn sample(flag_lines: usize) -> MetricsRecord {
        let content = (0..flag_lines)
            .map(|i| format!("import fake_{}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let mut totals = Totals::new();
        totals.add_file(extract(&content, "app.py"));
        let timestamp = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut record = totals.into_record(timestamp, "/ws".to_string());
        record.total_lines = 12_345;
        record
    }

    #[test]
    fn test_plain_colors_are_empty() {
        let colors = Colors::new(false);
        assert_eq!(format!("{}{}{}", colors.red, colors.bold, colors.reset), "");
        assert!(Colors::new(true).reset.starts_with('\x1b'));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_lists_first_three_flags() {
        let colors = Colors::new(false);
        let text = format_summary(&sample(5), &TimeSavings::estimate(), &colors);

        assert!(text.contains("Potential Hallucinations Detected: 5"));
        assert!(text.contains("app.py:3 - suspicious_import"));
        assert!(!text.contains("app.py:4 - suspicious_import"));
        assert!(text.contains("Total lines: 12,345"));
        assert!(text.contains("1. Auto Completion"));
        assert!(text.contains("~82.5 minutes"));
        assert!(text.contains("~412.5 minutes"));
        assert!(text.contains("~27.5 hours"));
    }

    #[test]
    fn test_summary_without_flags() {
        let colors = Colors::new(false);
        let mut record = sample(0);
        record.hallucination_flags.clear();
        let text = format_summary(&record, &TimeSavings::estimate(), &colors);
        assert!(text.contains("No Obvious Hallucination Patterns Detected"));
    }

    #[test]
    fn test_history_table() {
        let colors = Colors::new(false);
        assert!(format_history(&[], &colors).contains("No runs recorded yet"));

        let text = format_history(&[sample(2)], &colors);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2026-10-16 09:30:00"));
        assert!(lines[1].contains("12,345"));
        assert!(lines[1].ends_with("/ws"));
    }
}
