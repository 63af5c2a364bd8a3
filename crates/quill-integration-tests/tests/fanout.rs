//! Integration tests for dispatching one record to several adapters.

use std::sync::Arc;

use quill_log::{Adapter, Context, JsonAdapter, Level, LogError, Logger, TextAdapter};
use quill_test::prelude::*;

#[test]
fn test_threshold_filters_per_adapter() {
    init_test_logging();
    let dir = temp_log_dir();
    let text_path = dir.path().join("app.log");
    let json_path = dir.path().join("app.json");

    let mut logger = Logger::new();
    logger
        .attach(Arc::new(TextAdapter::new(&text_path, Level::Warning)))
        .attach(Arc::new(JsonAdapter::new(&json_path, Level::Debug)));

    let report = logger
        .info("User {id} signed in", &Context::new().with("id", 7))
        .unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.is_clean());
    assert!(read_lines(&text_path).is_empty());

    let events = read_json_lines(&json_path);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["@mt"], "User 7 signed in");
    assert_eq!(events[0]["id"], 7);
}

#[test]
fn test_invalid_level_reaches_no_adapter() {
    let spy = SpyAdapter::new();
    let logger = Logger::with_adapter(spy.clone().shared());

    let err = logger.log("verbose", "x", &Context::new()).unwrap_err();

    assert!(matches!(err, LogError::InvalidLevel { ref level } if level == "verbose"));
    assert!(spy.is_untouched());
}

#[test]
fn test_level_names_are_case_sensitive() {
    let spy = SpyAdapter::new();
    let logger = Logger::with_adapter(spy.clone().shared());

    assert!(logger.log("INFO", "x", &Context::new()).is_err());
    assert!(logger.log("info", "x", &Context::new()).is_ok());
    assert_eq!(spy.call_count(), 1);
}

#[test]
fn test_threshold_matrix() {
    for threshold in Level::ALL {
        let spy = SpyAdapter::at(threshold);
        let logger = Logger::with_adapter(spy.clone().shared());

        for level in Level::ALL {
            logger.log(level, "m", &Context::new()).unwrap();
        }

        let seen: Vec<Level> = spy.calls().iter().map(|call| call.level).collect();
        let expected: Vec<Level> = Level::ALL
            .into_iter()
            .filter(|level| level.rank() >= threshold.rank())
            .collect();
        assert_eq!(seen, expected, "threshold {threshold}");
    }
}

#[test]
fn test_failing_adapter_does_not_block_others() {
    let failing = Arc::new(FailingAdapter::new());
    let spy = SpyAdapter::new();

    let mut logger = Logger::new();
    logger.attach(failing.clone()).attach(spy.clone().shared());

    let report = logger.alert("still delivered", &Context::new()).unwrap();

    assert_eq!(failing.attempts(), 1);
    assert_eq!(spy.messages(), vec!["still delivered"]);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 0);
    assert!(matches!(
        report.failures[0].error,
        LogError::SinkWrite { .. }
    ));
}

#[test]
fn test_same_adapter_attached_twice_receives_twice() {
    let spy = SpyAdapter::new();
    let mut logger = Logger::new();
    logger.attach(spy.clone().shared()).attach(spy.clone().shared());

    logger.notice("twice", &Context::new()).unwrap();

    assert_eq!(spy.messages(), vec!["twice", "twice"]);
}

#[test]
fn test_threshold_change_applies_to_next_record() {
    let spy = SpyAdapter::at(Level::Error);
    let logger = Logger::with_adapter(spy.clone().shared());

    logger.info("dropped", &Context::new()).unwrap();
    logger.adapters()[0].set_level(Level::Info);
    logger.info("kept", &Context::new()).unwrap();

    assert_eq!(spy.messages(), vec!["kept"]);
}

#[test]
fn test_adapter_shared_between_loggers() {
    let spy = SpyAdapter::new();
    let first = Logger::with_adapter(spy.clone().shared());
    let second = Logger::with_adapter(spy.clone().shared());

    first.debug("one", &Context::new()).unwrap();
    second.emergency("two", &Context::new()).unwrap();

    let calls = spy.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].level, Level::Emergency);
}

#[test]
fn test_context_is_delivered_unchanged() {
    let spy = SpyAdapter::new();
    let logger = Logger::with_adapter(spy.clone().shared());
    let context = Context::new().with("user", "ada");

    logger.info("Hi {user}", &context).unwrap();

    let call = &spy.calls()[0];
    assert_eq!(call.message, "Hi ada");
    assert_eq!(call.context.len(), 1);
    assert!(call.context.contains_key("user"));
}
