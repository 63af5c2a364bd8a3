//! Output adapters.
//!
//! An **adapter** is a sink that receives finalized log records from a
//! [`Logger`](crate::Logger). Each adapter owns its own threshold; the logger
//! only consults it to decide whether to deliver.
//!
//! | Adapter | Output |
//! |---------|--------|
//! | [`TextAdapter`] | `[<timestamp>] <LEVEL>: <message>` lines |
//! | [`JsonAdapter`] | one compact JSON event per line (`@t`, `@mt`, `@l`, ...) |
//!
//! Both reference adapters open their file in append mode for every record
//! and close it afterwards; no handle is kept between calls.

/// Append-only file target shared by the reference adapters.
mod sink;
/// JSON-lines adapter.
pub mod json;
/// Plain-text adapter.
pub mod text;
/// Adapter trait and threshold storage.
pub mod traits;

pub use json::JsonAdapter;
pub use text::TextAdapter;
pub use traits::{Adapter, Threshold};
