//! Tests against process-wide state
//!
//! The global store flow is kept in one test function, since the store is
//! shared by every test in this binary. Only the environment test touches
//! `LOG_LEVEL`, and it uses a private store so its version bumps stay out
//! of the global flow.

use context_logger::prelude::*;
use context_logger::LOG_LEVEL_ENV;
use std::sync::Arc;

fn global_logger(context: &str, buffer: &MemoryAppender) -> Logger {
    Logger::builder()
        .context(context)
        .level_source(FixedLevel::new("TRACE"))
        .overrides(ConfigPatch::new().output(buffer.clone()))
        .build()
}

#[test]
fn test_global_configure_flow() {
    let buffer = MemoryAppender::new();
    let start = config_version();

    let early = global_logger("early", &buffer);
    configure(&ConfigPatch::new().colors_disabled().no_date());
    assert_eq!(config_version(), start + 1);

    let late = global_logger("late", &buffer);
    early.info("one");
    late.info("two");
    assert_eq!(buffer.contents(), "[info][early] one\n[info][late] two\n");

    buffer.clear();
    configure(&ConfigPatch::new());
    assert_eq!(config_version(), start + 2);
    early.info("one");
    assert_eq!(buffer.contents(), "[info][early] one\n");

    buffer.clear();
    configure(&ConfigPatch::new().date_format("%Y"));
    early.warn("dated");
    assert!(buffer.contents().starts_with('['));
    assert!(buffer.contents().ends_with("][warn][early] dated\n"));
    assert!(!buffer.contents().starts_with("[warn]"));
}

#[test]
fn test_environment_level_read_on_every_recompute() {
    let buffer = MemoryAppender::new();
    let store = Arc::new(ConfigStore::new());
    std::env::set_var(LOG_LEVEL_ENV, "ERROR");

    let logger = Logger::builder()
        .context("env")
        .provider(Arc::clone(&store))
        .level_source(EnvLevel::default())
        .overrides(
            ConfigPatch::new()
                .output(buffer.clone())
                .colors_disabled()
                .no_date(),
        )
        .build();

    logger.warn("hidden");
    logger.error("shown");
    assert_eq!(logger.log_level(), LogLevel::Error);
    assert_eq!(buffer.contents(), "[error][env] shown\n");

    // Cached until the store changes
    std::env::set_var(LOG_LEVEL_ENV, "trace");
    assert_eq!(logger.log_level(), LogLevel::Error);

    buffer.clear();
    store.configure(&ConfigPatch::new());
    logger.trace("now visible");
    assert_eq!(logger.log_level(), LogLevel::Trace);
    assert_eq!(buffer.contents(), "[trace][env] now visible\n");

    std::env::set_var(LOG_LEVEL_ENV, "nonsense");
    store.configure(&ConfigPatch::new());
    assert_eq!(logger.log_level(), LogLevel::Warn);

    std::env::remove_var(LOG_LEVEL_ENV);
    store.configure(&ConfigPatch::new());
    assert_eq!(logger.log_level(), LogLevel::Warn);
}
