use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{LogError, LogResult};

/// A file that is opened, appended to, and closed for every line.
///
/// The mutex serializes appends from adapters shared across threads; each
/// line is also written with a single `write_all` on an `O_APPEND` handle.
#[derive(Debug)]
pub(crate) struct AppendSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AppendSink {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` with surrounding whitespace trimmed, plus a newline.
    pub(crate) fn append_line(&self, line: &str) -> LogResult<()> {
        let line = line.trim();
        let mut buf = String::with_capacity(line.len().saturating_add(1));
        buf.push_str(line);
        buf.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;
        file.write_all(buf.as_bytes())
            .map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: std::io::Error) -> LogError {
        LogError::SinkWrite {
            path: self.path.display().to_string(),
            source,
        }
    }
}
