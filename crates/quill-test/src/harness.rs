//! Diagnostic output for tests.

use tracing_subscriber::EnvFilter;

/// Route `tracing` output from the crates under test to the test writer.
///
/// Honours `RUST_LOG`, defaulting to `quill_log=debug`. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quill_log=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
