//! Quill Log - Leveled logging front end with pluggable file adapters.
//!
//! This crate provides:
//! - A fixed eight-level severity table (`emergency` … `debug`)
//! - `{placeholder}` interpolation from an ordered, typed context
//! - A [`Logger`] that fans each record out to every attached adapter whose
//!   threshold the record meets
//! - Plain-text and JSON-lines file adapters
//! - TOML configuration for building loggers declaratively
//!
//! Every call is synchronous: when [`Logger::log`] returns, each adapter that
//! accepted the record has finished writing it.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quill_log::{Context, JsonAdapter, Level, Logger, TextAdapter};
//!
//! # fn main() -> Result<(), quill_log::LogError> {
//! let mut logger = Logger::with_adapter(Arc::new(TextAdapter::new("app.log", Level::Info)));
//! logger.attach(Arc::new(JsonAdapter::new("app.json", Level::Debug)));
//!
//! let report = logger.error(
//!     "An unknown error occurred, code returned: {code}",
//!     &Context::new().with("code", 500),
//! )?;
//! assert_eq!(report.delivered, 2);
//!
//! // Unknown level names are rejected before any adapter runs.
//! assert!(logger.log("verbose", "nope", &Context::new()).is_err());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod adapter;
mod config;
mod context;
mod error;
pub mod interpolate;
pub mod level;
mod logger;

pub use adapter::{Adapter, JsonAdapter, TextAdapter, Threshold};
pub use config::{AdapterConfig, LoggerConfig};
pub use context::{Context, ContextValue, ErrorValue, ObjectValue};
pub use error::{LogError, LogResult};
pub use level::Level;
pub use logger::{AdapterFailure, DispatchReport, IntoLevel, Logger};
