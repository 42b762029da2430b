//! # Context Logger
//!
//! A lightweight leveled console logger. Every line carries a timestamp, a
//! severity tag and the context label of the logger that wrote it:
//!
//! ```text
//! [2023-11-01 17:10:00.000][warn][db/pool.rs] connection pool exhausted
//! ```
//!
//! ## Features
//!
//! - **Context Tags**: explicit labels or the caller's source file
//! - **Lazy Global Configuration**: `configure` reaches every existing logger
//!   on its next call, without re-creating it
//! - **Per-Logger Overrides**: any setting can be replaced for one logger
//! - **Multi-line Values**: text, pretty-printed JSON and errors with traces
//!
//! ## Example
//!
//! ```
//! use context_logger::prelude::*;
//!
//! configure(&ConfigPatch::new().date_format("%H:%M:%S"));
//!
//! let logger = Logger::new("startup");
//! logger.warn("cache directory missing, using /tmp");
//! logger.error(serde_json::json!({"code": 7, "retry": false}));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        paint, Appender, Clock, ColorFn, ConfigPatch, ConfigProvider, ConfigStore, EnvLevel,
        ErrorReport, FixedClock, FixedLevel, LevelSource, LogLevel, LogValue, Logger,
        LoggerBuilder, LoggerError, PalettePatch, Result,
    };
    pub use crate::{config_version, configure};
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender};
pub use crate::core::{
    format_timestamp, paint, render_lines, Appender, Clock, ColorFn, ColorsPatch, ConfigPatch,
    ConfigProvider, ConfigStore, EffectiveConfig, EnvLevel, ErrorReport, FixedClock, FixedLevel,
    LevelSource, LogLevel, LogValue, Logger, LoggerBuilder, LoggerConfig, LoggerError, Palette,
    PalettePatch, RenderOptions, Result, SystemClock, DEFAULT_DATE_FORMAT, LOG_LEVEL_ENV,
    STACK_TRACE_HEADER,
};

/// Merge `patch` into the process-wide configuration.
///
/// Loggers built on the global store pick the change up on their next call.
pub fn configure(patch: &ConfigPatch) {
    ConfigStore::global().configure(patch);
}

/// Version of the process-wide configuration
pub fn config_version() -> u64 {
    ConfigStore::global().version()
}
