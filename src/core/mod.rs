//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod level_source;
pub mod log_level;
pub mod log_value;
pub mod logger;
pub mod render;
pub mod store;
pub mod timestamp;

pub use appender::Appender;
pub use config::{
    paint, ColorFn, ColorsPatch, ConfigPatch, EffectiveConfig, LoggerConfig, Palette, PalettePatch,
};
pub use error::{LoggerError, Result};
pub use level_source::{EnvLevel, FixedLevel, LevelSource, LOG_LEVEL_ENV};
pub use log_level::LogLevel;
pub use log_value::{ErrorReport, LogValue};
pub use logger::{Logger, LoggerBuilder};
pub use render::{render_lines, RenderOptions, STACK_TRACE_HEADER};
pub use store::{ConfigProvider, ConfigStore};
pub use timestamp::{format_timestamp, Clock, FixedClock, SystemClock, DEFAULT_DATE_FORMAT};
