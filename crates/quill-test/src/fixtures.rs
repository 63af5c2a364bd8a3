//! Test fixtures for log files and timestamps.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use tempfile::TempDir;

/// Fixed instant used by timestamp assertions: `2024-01-05T10:30:00+00:00`.
pub const FIXED_TIMESTAMP: &str = "2024-01-05T10:30:00+00:00";

/// Create a scratch directory for log files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
pub fn temp_log_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp log dir")
}

/// Read a log file into its lines. A missing file reads as no lines.
#[must_use]
pub fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|contents| contents.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// Read a JSON-lines file into parsed values.
///
/// # Panics
///
/// Panics if any line is not valid JSON.
#[must_use]
pub fn read_json_lines(path: impl AsRef<Path>) -> Vec<serde_json::Value> {
    read_lines(path)
        .iter()
        .map(|line| serde_json::from_str(line).expect("log line is not valid JSON"))
        .collect()
}

/// The instant described by [`FIXED_TIMESTAMP`].
///
/// # Panics
///
/// Never in practice; the constant is valid RFC3339.
#[must_use]
pub fn fixed_datetime() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP).expect("fixture timestamp is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_missing_file() {
        let dir = temp_log_dir();
        assert!(read_lines(dir.path().join("absent.log")).is_empty());
    }

    #[test]
    fn test_read_json_lines() {
        let dir = temp_log_dir();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{\"a\":1}\n{\"a\":2}\n").unwrap();

        let values = read_json_lines(&path);
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["a"], 2);
    }

    #[test]
    fn test_fixed_datetime() {
        assert_eq!(fixed_datetime().to_rfc3339(), FIXED_TIMESTAMP);
    }
}
