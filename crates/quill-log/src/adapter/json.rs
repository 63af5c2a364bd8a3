use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde_json::{Map, Value};

use super::sink::AppendSink;
use super::traits::{Adapter, Threshold};
use crate::context::{Context, ContextValue, rfc3339};
use crate::error::LogResult;
use crate::level::Level;

/// Context key holding an error to attach to the event.
pub const EXCEPTION_KEY: &str = "@x";

/// Context key holding an event id, passed through verbatim.
pub const EVENT_ID_KEY: &str = "@i";

/// Writes one compact JSON event per line.
///
/// Every event starts with `@t` (RFC3339 timestamp), `@mt` (message), and `@l`
/// (normalized level name), followed by the context entries in order. Two
/// context keys are special:
///
/// - `@x`: an error value, written as its message followed by its trace.
///   Non-error values under this key are dropped.
/// - `@i`: an event id, written as-is.
///
/// Structured consumers usually want the raw template in `@mt`, so loggers
/// feeding this adapter typically disable auto-interpolation.
#[derive(Debug)]
pub struct JsonAdapter {
    sink: AppendSink,
    threshold: Threshold,
}

impl JsonAdapter {
    /// Create an adapter writing to `path` with the given threshold.
    pub fn new(path: impl Into<PathBuf>, level: Level) -> Self {
        Self {
            sink: AppendSink::new(path),
            threshold: Threshold::new(level),
        }
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.sink.path()
    }

    /// Build the event object for a record logged at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if a context value cannot be converted to JSON.
    pub fn build_event<Tz>(
        &self,
        level: Level,
        message: &str,
        context: &Context,
        now: &DateTime<Tz>,
    ) -> LogResult<Map<String, Value>>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut event = Map::new();
        event.insert("@t".to_owned(), Value::String(rfc3339(now)));
        event.insert("@mt".to_owned(), Value::String(message.to_owned()));
        event.insert(
            "@l".to_owned(),
            Value::String(normalized_level(level).to_owned()),
        );

        for (key, value) in context.iter() {
            match (key, value) {
                (EXCEPTION_KEY, ContextValue::Error(error)) => {
                    let text = format!("{}\n{}", error.message(), error.trace());
                    event.insert(key.to_owned(), Value::String(text));
                },
                (EXCEPTION_KEY, _) => {},
                _ => {
                    event.insert(key.to_owned(), serde_json::to_value(value)?);
                },
            }
        }

        Ok(event)
    }
}

/// Map a level onto the five structured-event level names.
#[must_use]
pub fn normalized_level(level: Level) -> &'static str {
    match level {
        Level::Debug => "Verbose",
        Level::Info | Level::Notice => "Information",
        Level::Warning => "Warning",
        Level::Error | Level::Alert => "Error",
        Level::Emergency | Level::Critical => "Fatal",
    }
}

impl Adapter for JsonAdapter {
    fn level(&self) -> Level {
        self.threshold.get()
    }

    fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    fn log(&self, level: Level, message: &str, context: &Context) -> LogResult<()> {
        let event = self.build_event(level, message, context, &Local::now())?;
        let line = serde_json::to_string(&Value::Object(event))?;
        self.sink.append_line(&line)
    }
}
