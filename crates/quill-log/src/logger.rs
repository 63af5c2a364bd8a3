//! The dispatcher: validates, interpolates, and fans records out to adapters.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::adapter::Adapter;
use crate::context::Context;
use crate::error::{LogError, LogResult};
use crate::interpolate;
use crate::level::Level;

/// Conversion into a [`Level`] at the logger boundary.
///
/// Implemented for [`Level`] itself (infallible) and for level names, which
/// fail with [`LogError::InvalidLevel`] when unknown.
pub trait IntoLevel {
    /// Resolve the level.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`] for unknown level names.
    fn into_level(self) -> LogResult<Level>;
}

impl IntoLevel for Level {
    fn into_level(self) -> LogResult<Level> {
        Ok(self)
    }
}

impl IntoLevel for &str {
    fn into_level(self) -> LogResult<Level> {
        self.parse()
    }
}

impl IntoLevel for &String {
    fn into_level(self) -> LogResult<Level> {
        self.parse()
    }
}

impl IntoLevel for String {
    fn into_level(self) -> LogResult<Level> {
        self.parse()
    }
}

/// An adapter that failed during a dispatch.
#[derive(Debug)]
pub struct AdapterFailure {
    /// Position of the adapter in attachment order.
    pub index: usize,
    /// What went wrong.
    pub error: LogError,
}

/// Outcome of a single [`Logger::log`] call.
///
/// Adapter failures never abort the fan-out; they are collected here instead.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Adapters that accepted and wrote the record.
    pub delivered: usize,
    /// Adapters whose threshold was above the record's level.
    pub skipped: usize,
    /// Adapters that were called but failed to write.
    pub failures: Vec<AdapterFailure>,
}

impl DispatchReport {
    /// Whether every called adapter succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Leveled logger that dispatches to an ordered list of adapters.
///
/// Attaching the same adapter twice delivers each record to it twice.
pub struct Logger {
    adapters: Vec<Arc<dyn Adapter>>,
    auto_interpolate: bool,
}

impl Logger {
    /// Create a logger with no adapters and auto-interpolation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
            auto_interpolate: true,
        }
    }

    /// Create a logger with a single adapter attached.
    #[must_use]
    pub fn with_adapter(adapter: Arc<dyn Adapter>) -> Self {
        let mut logger = Self::new();
        logger.attach(adapter);
        logger
    }

    /// Attach another adapter after the existing ones.
    pub fn attach(&mut self, adapter: Arc<dyn Adapter>) -> &mut Self {
        self.adapters.push(adapter);
        self
    }

    /// Enable or disable placeholder interpolation.
    ///
    /// When disabled, adapters receive the raw template.
    pub fn auto_interpolate(&mut self, enabled: bool) -> &mut Self {
        self.auto_interpolate = enabled;
        self
    }

    /// Whether placeholders are interpolated before dispatch.
    #[must_use]
    pub fn is_auto_interpolating(&self) -> bool {
        self.auto_interpolate
    }

    /// Attached adapters, in attachment order.
    #[must_use]
    pub fn adapters(&self) -> &[Arc<dyn Adapter>] {
        &self.adapters
    }

    /// Log a record at an arbitrary level.
    ///
    /// The level is validated before anything else. The message is
    /// interpolated at most once and shared by every adapter. Adapters are
    /// called one after another in attachment order; an adapter is skipped when
    /// its threshold outranks `level`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`] if `level` is not a known level, in
    /// which case no adapter is called. Adapter failures are reported in the
    /// returned [`DispatchReport`], never as an `Err`.
    pub fn log(
        &self,
        level: impl IntoLevel,
        message: &str,
        context: &Context,
    ) -> LogResult<DispatchReport> {
        let level = level.into_level()?;
        let message_rank = level.rank();
        let mut report = DispatchReport::default();

        if self.adapters.is_empty() {
            return Ok(report);
        }

        let message = if self.auto_interpolate {
            interpolate::render(message, context)
        } else {
            Cow::Borrowed(message)
        };

        for (index, adapter) in self.adapters.iter().enumerate() {
            let threshold = adapter.level();
            if threshold.rank() > message_rank {
                trace!(adapter = index, %level, %threshold, "Record below adapter threshold");
                report.skipped = report.skipped.saturating_add(1);
                continue;
            }

            match adapter.log(level, &message, context) {
                Ok(()) => report.delivered = report.delivered.saturating_add(1),
                Err(error) => {
                    warn!(adapter = index, %level, %error, "Log adapter failed to write record");
                    report.failures.push(AdapterFailure { index, error });
                },
            }
        }

        Ok(report)
    }
}

macro_rules! level_methods {
    ($($(#[$doc:meta])* $name:ident => $level:expr;)*) => {
        impl Logger {
            $(
                $(#[$doc])*
                ///
                /// # Errors
                ///
                /// Never fails on the level; see [`Logger::log`].
                pub fn $name(&self, message: &str, context: &Context) -> LogResult<DispatchReport> {
                    self.log($level, message, context)
                }
            )*
        }
    };
}

level_methods! {
    /// Log at `emergency`: system is unusable.
    emergency => Level::Emergency;
    /// Log at `alert`: action must be taken immediately.
    alert => Level::Alert;
    /// Log at `critical`: critical conditions.
    critical => Level::Critical;
    /// Log at `error`.
    error => Level::Error;
    /// Log at `warning`.
    warning => Level::Warning;
    /// Log at `notice`: normal but significant events.
    notice => Level::Notice;
    /// Log at `info`.
    info => Level::Info;
    /// Log at `debug`.
    debug => Level::Debug;
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("adapters", &self.adapters.len())
            .field("auto_interpolate", &self.auto_interpolate)
            .finish()
    }
}
