//! Bounded run history
//!
//! The whole history lives in one pretty-printed JSON array. Every append
//! rewrites the file; there is no locking, one run per log at a time.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::MetricsError;
use crate::record::MetricsRecord;

/// Runs kept by default
pub const DEFAULT_CAPACITY: usize = 30;

/// History log on disk
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    /// A capacity of 0 is treated as 1 so the newest run is always kept
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prior records, oldest first
    ///
    /// A missing log is an empty history. So is one that cannot be read or
    /// parsed; that case is logged and otherwise ignored.
    pub fn load(&self) -> Vec<MetricsRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "starting with empty history");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<MetricsRecord>, MetricsError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let corrupt = |reason: String| MetricsError::HistoryCorrupt {
            path: self.path.clone(),
            reason,
        };

        let contents = fs::read_to_string(&self.path).map_err(|e| corrupt(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))
    }

    /// Add a record and persist, keeping only the most recent `capacity` runs
    ///
    /// Returns the history as written.
    pub fn append(&self, record: MetricsRecord) -> Result<Vec<MetricsRecord>, MetricsError> {
        let mut records = self.load();
        records.push(record);
        retain_recent(&mut records, self.capacity);

        self.write(&records).map_err(|source| MetricsError::HistoryWrite {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            entries = records.len(),
            "history saved"
        );
        Ok(records)
    }

    /// Replace the log wholesale via a sibling temp file
    fn write(&self, records: &[MetricsRecord]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records).map_err(std::io::Error::other)?;

        let tmp_path = self.path.with_extension("tmp");
        let result = write_then_rename(&tmp_path, &self.path, json.as_bytes());
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(tmp_path, path)
}

/// Drop the oldest entries until at most `capacity` remain
pub fn retain_recent(records: &mut Vec<MetricsRecord>, capacity: usize) {
    if records.len() > capacity {
        let excess = records.len() - capacity;
        records.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Totals;
    use crate::extract::extract;
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(n: u64) -> MetricsRecord {
        let timestamp = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_micro_opt(10, 0, 0, 123_456)
            .unwrap()
            + chrono::Duration::days(n as i64);

        let mut totals = Totals::new();
        totals.add_file(extract("import fake_x\ndef f():\nclass C:", "pkg/a.py"));
        let mut record = totals.into_record(timestamp, format!("/ws/{}", n));
        record.total_lines = n;
        record
    }

    #[test]
    fn test_missing_log_is_empty() -> Result<()> {
        let tmp = TempDir::new()?;
        let store = HistoryStore::new(tmp.path().join("metrics.log"), DEFAULT_CAPACITY);
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_log_is_empty() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("metrics.log");
        fs::write(&path, "[{\"timestamp\": ")?;

        let store = HistoryStore::new(&path, DEFAULT_CAPACITY);
        assert!(store.load().is_empty());

        fs::write(&path, "{\"not\": \"a list\"}")?;
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_log_is_replaced_on_append() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("metrics.log");
        fs::write(&path, "garbage")?;

        let store = HistoryStore::new(&path, DEFAULT_CAPACITY);
        let written = store.append(record(1))?;
        assert_eq!(written.len(), 1);
        assert_eq!(store.load(), written);
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let tmp = TempDir::new()?;
        let store = HistoryStore::new(tmp.path().join("metrics.log"), DEFAULT_CAPACITY);

        let first = record(1);
        let second = record(2);
        store.append(first.clone())?;
        store.append(second.clone())?;

        assert_eq!(store.load(), vec![first, second]);
        Ok(())
    }

    #[test]
    fn test_retention_drops_oldest() -> Result<()> {
        let tmp = TempDir::new()?;
        let store = HistoryStore::new(tmp.path().join("metrics.log"), DEFAULT_CAPACITY);

        for n in 1..=31 {
            store.append(record(n))?;
        }

        let history = store.load();
        assert_eq!(history.len(), 30);
        assert_eq!(history[0].workspace, "/ws/2");
        assert_eq!(history[29].workspace, "/ws/31");
        assert!(history.iter().all(|r| r.workspace != "/ws/1"));
        Ok(())
    }

    #[test]
    fn test_creates_parent_dirs_and_leaves_no_temp_file() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("deep").join("dir").join("metrics.log");
        let store = HistoryStore::new(&path, DEFAULT_CAPACITY);

        store.append(record(1))?;
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        Ok(())
    }

    #[test]
    fn test_write_failure_is_reported() -> Result<()> {
        let tmp = TempDir::new()?;
        // A directory where the log should be cannot be replaced by a file
        let path = tmp.path().join("metrics.log");
        fs::create_dir_all(path.join("occupied"))?;

        let store = HistoryStore::new(&path, DEFAULT_CAPACITY);
        let err = store.append(record(1)).unwrap_err();
        assert!(matches!(err, MetricsError::HistoryWrite { .. }));
        assert!(!path.with_extension("tmp").exists());
        Ok(())
    }

    #[test]
    fn test_zero_capacity_keeps_newest() -> Result<()> {
        let tmp = TempDir::new()?;
        let store = HistoryStore::new(tmp.path().join("metrics.log"), 0);
        assert_eq!(store.capacity(), 1);

        store.append(record(1))?;
        let written = store.append(record(2))?;
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].workspace, "/ws/2");
        Ok(())
    }

    #[test]
    fn test_retain_recent() {
        let mut records: Vec<MetricsRecord> = (1..=5).map(record).collect();
        retain_recent(&mut records, 3);
        let lines: Vec<u64> = records.iter().map(|r| r.total_lines).collect();
        assert_eq!(lines, vec![3, 4, 5]);

        retain_recent(&mut records, 10);
        assert_eq!(records.len(), 3);
    }
}
