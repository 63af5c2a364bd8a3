//! Prelude module - commonly used test helpers.
//!
//! Use `use quill_test::prelude::*;` in test modules.

// Mocks
pub use crate::{FailingAdapter, RecordedCall, SpyAdapter};

// Fixtures
pub use crate::{FIXED_TIMESTAMP, fixed_datetime, read_json_lines, read_lines, temp_log_dir};

// Harness
pub use crate::init_test_logging;
