//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::{info, logger};
//!
//! let log = logger!("server");
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//! ```

/// Create a logger.
///
/// - `logger!()`: context from the calling file
/// - `logger!("name")`: explicit context
/// - `logger!("name", overrides)`: explicit context with a `ConfigPatch`
/// - `logger!(overrides)`: context from the calling file with a `ConfigPatch`
///
/// # Examples
///
/// ```
/// use context_logger::{logger, ConfigPatch};
///
/// let log = logger!("jobs", ConfigPatch::new().log_level("info"));
/// assert_eq!(log.context(), "jobs");
///
/// let here = logger!();
/// assert!(here.context().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! logger {
    () => {
        $crate::Logger::from_caller()
    };
    ($context:literal) => {
        $crate::Logger::new($context)
    };
    ($context:literal, $overrides:expr) => {
        $crate::Logger::with_overrides($context, $overrides)
    };
    ($overrides:expr) => {
        $crate::Logger::from_caller_with($overrides)
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use context_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::with_overrides("doc", ConfigPatch::new().log_level("trace"));
/// use context_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use context_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use context_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = Logger::new("doc");
/// use context_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{ConfigPatch, ConfigStore, FixedLevel, LogLevel, Logger};
    use std::sync::Arc;

    fn capture(buffer: &MemoryAppender) -> Logger {
        Logger::builder()
            .context("macros")
            .provider(Arc::new(ConfigStore::new()))
            .level_source(FixedLevel::new("TRACE"))
            .overrides(
                ConfigPatch::new()
                    .output(buffer.clone())
                    .colors_disabled()
                    .no_date(),
            )
            .build()
    }

    #[test]
    fn test_log_macro() {
        let buffer = MemoryAppender::new();
        let logger = capture(&buffer);
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert_eq!(buffer.contents(), "[info][macros] Formatted: 42\n");
    }

    #[test]
    fn test_level_macros() {
        let buffer = MemoryAppender::new();
        let logger = capture(&buffer);
        trace!(logger, "t{}", 1);
        info!(logger, "i{}", 2);
        warn!(logger, "w{}", 3);
        error!(logger, "e{}", 4);
        assert_eq!(
            buffer.lines(),
            vec![
                "[trace][macros] t1\n",
                "[info][macros] i2\n",
                "[warn][macros] w3\n",
                "[error][macros] e4\n",
            ]
        );
    }

    #[test]
    fn test_logger_macro_forms() {
        assert_eq!(logger!("named").context(), "named");
        assert_eq!(
            logger!("tuned", ConfigPatch::new().log_level("error")).context(),
            "tuned"
        );
        assert!(logger!().context().ends_with("macros.rs"));
        assert!(logger!(ConfigPatch::new()).context().ends_with("macros.rs"));
    }
}
