use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};

use super::sink::AppendSink;
use super::traits::{Adapter, Threshold};
use crate::context::Context;
use crate::error::{LogError, LogResult};
use crate::interpolate::substitute;
use crate::level::Level;

/// Default line template.
pub const DEFAULT_FORMAT: &str = "[{timestamp}] {level}: {message}";

/// Default `strftime` pattern for the `{timestamp}` slot.
pub const DEFAULT_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Writes human-readable lines to a file.
///
/// Each record becomes one line built from a template with three slots:
/// `{timestamp}` (local time, formatted with a `strftime` pattern), `{level}`
/// (upper-case level name), and `{message}`.
///
/// ```rust,no_run
/// use quill_log::{Level, TextAdapter};
///
/// let adapter = TextAdapter::new("/var/log/app.log", Level::Info)
///     .with_format("{timestamp} - {level}: {message}")
///     .with_timestamp("%d-%m-%Y %H:%M:%S");
/// assert_eq!(adapter.timestamp(), "%d-%m-%Y %H:%M:%S");
/// ```
#[derive(Debug)]
pub struct TextAdapter {
    sink: AppendSink,
    threshold: Threshold,
    format: String,
    timestamp: String,
}

impl TextAdapter {
    /// Create an adapter writing to `path` with the given threshold.
    pub fn new(path: impl Into<PathBuf>, level: Level) -> Self {
        Self {
            sink: AppendSink::new(path),
            threshold: Threshold::new(level),
            format: DEFAULT_FORMAT.to_owned(),
            timestamp: DEFAULT_TIMESTAMP.to_owned(),
        }
    }

    /// Replace the line template.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Replace the timestamp pattern.
    ///
    /// An invalid pattern is reported by [`Adapter::log`] as
    /// [`LogError::TimestampFormat`]; use [`validate_timestamp`] to check it up
    /// front.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Line template.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Timestamp pattern.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.sink.path()
    }

    /// Build the line for a record logged at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::TimestampFormat`] if the timestamp pattern is invalid.
    pub fn format_line<Tz>(
        &self,
        level: Level,
        message: &str,
        now: &DateTime<Tz>,
    ) -> LogResult<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let timestamp = format_timestamp(now, &self.timestamp)?;
        let level = level.as_str().to_uppercase();
        let slots = [
            ("{timestamp}", timestamp.as_str()),
            ("{level}", level.as_str()),
            ("{message}", message),
        ];
        Ok(substitute(&self.format, &slots))
    }
}

impl Adapter for TextAdapter {
    fn level(&self) -> Level {
        self.threshold.get()
    }

    fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    fn log(&self, level: Level, message: &str, _context: &Context) -> LogResult<()> {
        let line = self.format_line(level, message, &Local::now())?;
        self.sink.append_line(&line)
    }
}

/// Check that a `strftime` pattern contains only known specifiers.
///
/// # Errors
///
/// Returns [`LogError::TimestampFormat`] for unknown or malformed specifiers.
pub fn validate_timestamp(pattern: &str) -> LogResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LogError::TimestampFormat {
            pattern: pattern.to_owned(),
        });
    }
    Ok(())
}

fn format_timestamp<Tz>(now: &DateTime<Tz>, pattern: &str) -> LogResult<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    validate_timestamp(pattern)?;
    let mut out = String::new();
    write!(out, "{}", now.format(pattern)).map_err(|_| LogError::TimestampFormat {
        pattern: pattern.to_owned(),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-05T10:30:00+00:00").unwrap()
    }

    #[test]
    fn test_default_line() {
        let adapter = TextAdapter::new("unused.log", Level::Debug);
        let line = adapter
            .format_line(Level::Error, "Disk full", &fixed_now())
            .unwrap();
        assert_eq!(line, "[2024-01-05 10:30:00] ERROR: Disk full");
    }

    #[test]
    fn test_custom_format_and_timestamp() {
        let adapter = TextAdapter::new("unused.log", Level::Debug)
            .with_format("[{timestamp}] - {level}: {message}")
            .with_timestamp("%d-%m-%Y %H:%M:%S");
        assert_eq!(adapter.format(), "[{timestamp}] - {level}: {message}");
        assert_eq!(adapter.timestamp(), "%d-%m-%Y %H:%M:%S");

        let line = adapter
            .format_line(Level::Notice, "ok", &fixed_now())
            .unwrap();
        assert_eq!(line, "[05-01-2024 10:30:00] - NOTICE: ok");
    }

    #[test]
    fn test_slots_in_message_are_not_expanded() {
        let adapter = TextAdapter::new("unused.log", Level::Debug);
        let line = adapter
            .format_line(Level::Info, "literal {level}", &fixed_now())
            .unwrap();
        assert_eq!(line, "[2024-01-05 10:30:00] INFO: literal {level}");
    }

    #[test]
    fn test_invalid_timestamp_pattern() {
        assert!(validate_timestamp(DEFAULT_TIMESTAMP).is_ok());
        assert!(matches!(
            validate_timestamp("%Y-%Q"),
            Err(LogError::TimestampFormat { .. })
        ));

        let adapter = TextAdapter::new("unused.log", Level::Debug).with_timestamp("%Q");
        let err = adapter
            .format_line(Level::Info, "x", &Utc::now())
            .unwrap_err();
        assert!(matches!(err, LogError::TimestampFormat { ref pattern } if pattern == "%Q"));
    }

    #[test]
    fn test_log_appends_trimmed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let adapter = TextAdapter::new(&path, Level::Info).with_format("{level}: {message}   ");

        adapter.log(Level::Info, "first", &Context::new()).unwrap();
        adapter.log(Level::Alert, "second", &Context::new()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "INFO: first\nALERT: second\n");
    }

    #[test]
    fn test_set_level() {
        let adapter = TextAdapter::new("unused.log", Level::Info);
        assert_eq!(adapter.level(), Level::Info);
        adapter.set_level(Level::Critical);
        assert_eq!(adapter.level(), Level::Critical);
    }
}
