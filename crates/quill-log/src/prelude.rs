//! Prelude module - commonly used types for convenient import.
//!
//! Use `use quill_log::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quill_log::prelude::*;
//!
//! # fn main() -> LogResult<()> {
//! let adapter = Arc::new(JsonAdapter::new("events.json", Level::Debug));
//! let mut logger = Logger::with_adapter(adapter);
//! logger.auto_interpolate(false);
//!
//! logger.info("Booting machine: {machine}", &Context::new().with("machine", "db-1"))?;
//! # Ok(())
//! # }
//! ```

// Errors
pub use crate::{LogError, LogResult};

// Levels
pub use crate::{IntoLevel, Level};

// Records
pub use crate::{Context, ContextValue};

// Dispatch
pub use crate::{DispatchReport, Logger};

// Adapters
pub use crate::{Adapter, JsonAdapter, TextAdapter, Threshold};

// Configuration
pub use crate::{AdapterConfig, LoggerConfig};
