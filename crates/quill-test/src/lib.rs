//! Quill Test - Shared test utilities for Quill crates.
//!
//! This crate provides mock adapters and fixtures that can be used across
//! Quill crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! quill-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use quill_log::{Context, Level, Logger};
//!     use quill_test::SpyAdapter;
//!
//!     #[test]
//!     fn test_warning_threshold() {
//!         let spy = SpyAdapter::at(Level::Warning);
//!         let logger = Logger::with_adapter(spy.clone().shared());
//!
//!         logger.info("quiet", &Context::new()).unwrap();
//!
//!         assert!(spy.is_untouched());
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
