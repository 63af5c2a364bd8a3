use std::sync::atomic::{AtomicU16, Ordering};

use crate::context::Context;
use crate::error::LogResult;
use crate::level::Level;

/// A destination for log records.
///
/// Adapters are shared behind `Arc` and may be attached to several loggers,
/// so the threshold setter takes `&self`.
pub trait Adapter: Send + Sync {
    /// Minimum level this adapter accepts.
    fn level(&self) -> Level;

    /// Change the minimum level. Any level is accepted.
    fn set_level(&self, level: Level);

    /// Append one record to the adapter's target.
    ///
    /// `message` has already been interpolated when the logger has
    /// auto-interpolation enabled; `context` is always the caller's original.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written. The
    /// logger contains the error to this adapter and keeps fanning out.
    fn log(&self, level: Level, message: &str, context: &Context) -> LogResult<()>;
}

/// Atomically stored threshold level.
///
/// Adapters embed one of these so [`Adapter::set_level`] can be called through
/// a shared reference, even while another thread is logging.
#[derive(Debug)]
pub struct Threshold(AtomicU16);

impl Threshold {
    /// Create a threshold at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self(AtomicU16::new(level.rank()))
    }

    /// Current level.
    #[must_use]
    pub fn get(&self) -> Level {
        Level::from_rank(self.0.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Replace the level.
    pub fn set(&self, level: Level) {
        self.0.store(level.rank(), Ordering::Relaxed);
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults_to_debug() {
        assert_eq!(Threshold::default().get(), Level::Debug);
    }

    #[test]
    fn test_threshold_set_and_get() {
        let threshold = Threshold::new(Level::Info);
        assert_eq!(threshold.get(), Level::Info);
        for level in Level::ALL {
            threshold.set(level);
            assert_eq!(threshold.get(), level);
        }
    }
}
