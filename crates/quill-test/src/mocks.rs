//! Mock adapters for testing.

use std::sync::{Arc, Mutex};

use quill_log::{Adapter, Context, Level, LogError, LogResult, Threshold};

/// A call captured by [`SpyAdapter`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Level the record was logged at.
    pub level: Level,
    /// Message as delivered (interpolated when the logger interpolates).
    pub message: String,
    /// Context as delivered.
    pub context: Context,
}

/// Adapter that records every call it receives.
///
/// Clones share the same recording, so a test can keep one handle while the
/// logger holds another.
///
/// Uses `std::sync::Mutex` for simplicity; poisoned locks read as empty.
#[derive(Debug, Clone)]
pub struct SpyAdapter {
    threshold: Arc<Threshold>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl SpyAdapter {
    /// Create a spy with a `debug` threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Level::Debug)
    }

    /// Create a spy with the given threshold.
    #[must_use]
    pub fn at(level: Level) -> Self {
        Self {
            threshold: Arc::new(Threshold::new(level)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wrap in an `Arc` ready to attach.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Get all captured calls.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Get the captured messages only.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|g| g.iter().map(|c| c.message.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of captured calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|g| g.len()).unwrap_or(0)
    }

    /// Check whether nothing has been captured.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.call_count() == 0
    }

    /// Clear all captured calls.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.clear();
        }
    }
}

impl Default for SpyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for SpyAdapter {
    fn level(&self) -> Level {
        self.threshold.get()
    }

    fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    fn log(&self, level: Level, message: &str, context: &Context) -> LogResult<()> {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(RecordedCall {
                level,
                message: message.to_owned(),
                context: context.clone(),
            });
        }
        Ok(())
    }
}

/// Adapter whose every write fails with [`LogError::SinkWrite`].
///
/// Counts attempts so tests can assert it was still called.
#[derive(Debug, Default)]
pub struct FailingAdapter {
    threshold: Threshold,
    attempts: Mutex<usize>,
}

impl FailingAdapter {
    /// Create a failing adapter with a `debug` threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes attempted.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|g| *g).unwrap_or(0)
    }
}

impl Adapter for FailingAdapter {
    fn level(&self) -> Level {
        self.threshold.get()
    }

    fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    fn log(&self, _level: Level, _message: &str, _context: &Context) -> LogResult<()> {
        if let Ok(mut guard) = self.attempts.lock() {
            *guard = guard.saturating_add(1);
        }
        Err(LogError::SinkWrite {
            path: "<failing>".to_string(),
            source: std::io::Error::other("simulated write failure"),
        })
    }
}
