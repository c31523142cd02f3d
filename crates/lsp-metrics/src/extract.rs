//! Per-file statistics
//!
//! Counts are line-prefix matches on the stripped line, not a parse, so
//! lines inside docstrings count too.

use std::path::Path;

use crate::error::MetricsError;
use crate::record::{FlagKind, HallucinationFlag};

const FUNCTION_PREFIX: &str = "def ";
const CLASS_PREFIX: &str = "class ";
const IMPORT_PREFIXES: [&str; 2] = ["import ", "from "];

/// Substrings that mark an import as probably invented
pub const SUSPICIOUS_TOKENS: [&str; 3] = ["fake_", "example_", "placeholder_"];

/// Statistics for a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub line_count: u64,
    pub function_count: u64,
    pub class_count: u64,
    pub import_count: u64,
    pub flags: Vec<HallucinationFlag>,
}

/// Read a file as UTF-8 text
pub fn read_file(path: &Path) -> Result<String, MetricsError> {
    std::fs::read_to_string(path).map_err(|source| MetricsError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute statistics for one file's content
///
/// `relative_path` is recorded on every flag raised for this file.
pub fn extract(content: &str, relative_path: &str) -> FileStats {
    let mut stats = FileStats::default();

    // split, not lines(): a trailing newline leaves an empty last line that counts
    for (i, line) in content.split('\n').enumerate() {
        stats.line_count += 1;

        let stripped = line.trim();
        if stripped.starts_with(FUNCTION_PREFIX) {
            stats.function_count += 1;
        }
        if stripped.starts_with(CLASS_PREFIX) {
            stats.class_count += 1;
        }
        if IMPORT_PREFIXES.iter().any(|p| stripped.starts_with(p)) {
            stats.import_count += 1;
        }

        if is_suspicious_import(line) {
            stats.flags.push(HallucinationFlag {
                file: relative_path.to_string(),
                line: i + 1,
                kind: FlagKind::SuspiciousImport,
                content: stripped.to_string(),
            });
        }
    }

    stats
}

/// Any line mentioning "import" (any case) together with a suspicious token
fn is_suspicious_import(line: &str) -> bool {
    line.to_lowercase().contains("import")
        && SUSPICIOUS_TOKENS.iter().any(|token| line.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn test_basic_counts() {
        let stats = extract("import fake_utils\ndef foo():\nclass Bar:", "mod.py");
        assert_eq!(stats.line_count, 3);
        assert_eq!(stats.function_count, 1);
        assert_eq!(stats.class_count, 1);
        assert_eq!(stats.import_count, 1);

        assert_eq!(stats.flags.len(), 1);
        let flag = &stats.flags[0];
        assert_eq!(flag.line, 1);
        assert_eq!(flag.kind, FlagKind::SuspiciousImport);
        assert_eq!(flag.content, "import fake_utils");
        assert_eq!(flag.file, "mod.py");
    }

    #[test]
    fn test_line_splitting() {
        assert_eq!(extract("", "a.py").line_count, 1);
        assert_eq!(extract("x = 1\n", "a.py").line_count, 2);
        assert_eq!(extract("x = 1\ny = 2", "a.py").line_count, 2);
        assert_eq!(extract("\n\n", "a.py").line_count, 3);
    }

    #[test]
    fn test_indentation_ignored() {
        let content = "class A:\n    def method(self):\n        pass\n\tdef other(self): return 1\n";
        let stats = extract(content, "a.py");
        assert_eq!(stats.function_count, 2);
        assert_eq!(stats.class_count, 1);
    }

    #[test]
    fn test_keyword_needs_trailing_space() {
        let content = "define = 1\ndef(x)\nclassify()\nimporter = None\nfromage = 2\n";
        let stats = extract(content, "a.py");
        assert_eq!(stats.function_count, 0);
        assert_eq!(stats.class_count, 0);
        assert_eq!(stats.import_count, 0);
    }

    #[test]
    fn test_both_import_forms() {
        let stats = extract("import os\nfrom sys import path\n  import json", "a.py");
        assert_eq!(stats.import_count, 3);
        assert!(stats.flags.is_empty());
    }

    #[test]
    fn test_suspicious_import_is_substring_based() {
        let content = [
            "from example_pkg import thing",
            "# IMPORTANT: placeholder_value below",
            "x = fake_value",
            "import Fake_module",
            "    import placeholder_x  ",
        ]
        .join("\n");
        let stats = extract(&content, "pkg/m.py");

        let lines: Vec<usize> = stats.flags.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 2, 5]);
        assert_eq!(stats.flags[2].content, "import placeholder_x");
        // Only real import statements count toward imports
        assert_eq!(stats.import_count, 3);
    }

    #[test]
    fn test_read_file_rejects_invalid_utf8() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("bad.py");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80])?;

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, MetricsError::FileRead { .. }));
        Ok(())
    }
}
