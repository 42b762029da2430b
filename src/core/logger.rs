//! Main logger implementation

use super::{
    appender::Appender,
    config::{ConfigPatch, EffectiveConfig, LoggerConfig},
    level_source::{EnvLevel, LevelSource},
    log_level::LogLevel,
    log_value::LogValue,
    render::{render_lines, RenderOptions},
    store::{ConfigProvider, ConfigStore},
    timestamp::{format_timestamp, Clock, SystemClock},
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

struct CachedConfig {
    config: Arc<EffectiveConfig>,
    version: u64,
}

/// Leveled logger bound to one context label
///
/// Settings come from a [`ConfigProvider`] (the global store unless another
/// is injected) merged with the overrides given at construction. The merge
/// result is cached and recomputed only after the provider's version moves.
///
/// # Example
///
/// ```
/// use context_logger::prelude::*;
///
/// let buffer = MemoryAppender::new();
/// let logger = Logger::with_overrides(
///     "db",
///     ConfigPatch::new()
///         .output(buffer.clone())
///         .colors_disabled()
///         .no_date()
///         .log_level("info"),
/// );
///
/// logger.info("connected");
/// assert_eq!(buffer.contents(), "[info][db] connected\n");
/// ```
pub struct Logger {
    context: String,
    overrides: ConfigPatch,
    provider: Arc<dyn ConfigProvider>,
    level_source: Arc<dyn LevelSource>,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<CachedConfig>>,
}

impl Logger {
    /// Logger with an explicit context label and no overrides
    pub fn new(context: impl Into<String>) -> Self {
        Self::builder().context(context).build()
    }

    pub fn with_overrides(context: impl Into<String>, overrides: ConfigPatch) -> Self {
        Self::builder().context(context).overrides(overrides).build()
    }

    /// Logger labelled with the caller's source file, relative to the
    /// working directory
    ///
    /// The path comes from `Location::file()`, which the compiler records
    /// relative to the directory cargo was invoked from (or absolute for
    /// some dependencies). Only absolute paths are rewritten against the
    /// current directory, so a process started elsewhere sees the
    /// build-time relative path.
    #[track_caller]
    pub fn from_caller() -> Self {
        Self::builder().build()
    }

    #[track_caller]
    pub fn from_caller_with(overrides: ConfigPatch) -> Self {
        Self::builder().overrides(overrides).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Current settings, recomputed if the provider changed since last use
    pub fn effective_config(&self) -> Arc<EffectiveConfig> {
        let current = self.provider.version();
        let mut cache = self.cache.lock();

        if let Some(cached) = cache.as_ref() {
            if cached.version == current {
                return Arc::clone(&cached.config);
            }
        }

        let (config, version) = self.provider.snapshot();
        let config = Arc::new(self.resolve(config));
        *cache = Some(CachedConfig {
            config: Arc::clone(&config),
            version,
        });
        config
    }

    /// Level precedence: override, then environment, then `WARN`.
    ///
    /// A `log_level` merged into the store is not consulted.
    fn resolve(&self, mut config: LoggerConfig) -> EffectiveConfig {
        config.log_level = self
            .level_source
            .level()
            .unwrap_or_else(|| LogLevel::Warn.to_str().to_string());
        config.apply(&self.overrides);
        EffectiveConfig::from(config)
    }

    /// Effective minimum level; displays in upper case
    pub fn log_level(&self) -> LogLevel {
        self.effective_config().log_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        self.effective_config().should_log(level)
    }

    pub fn log(&self, level: LogLevel, value: impl Into<LogValue>) {
        let config = self.effective_config();
        if !config.should_log(level) {
            return;
        }

        let value = value.into();
        let date = config
            .date_format
            .as_deref()
            .map(|pattern| format!("[{}]", format_timestamp(pattern, &self.clock.now())))
            .unwrap_or_default();
        let color = config.color_for(level);
        let sink: &dyn Appender = match &config.output {
            Some(appender) => appender.as_ref(),
            None => &ConsoleAppender,
        };

        for line in render_lines(&value, RenderOptions::from(config.as_ref())) {
            let text = format!("{}[{}][{}] {}", date, level.tag(), self.context, line);
            let mut output = match color {
                Some(paint) => paint(&text),
                None => text,
            };
            output.push('\n');

            Self::dispatch(sink, "append", || sink.append(&output));
        }
        Self::dispatch(sink, "flush", || sink.flush());
    }

    /// Run one appender operation, isolating the caller from its errors and panics
    fn dispatch<F>(appender: &dyn Appender, operation: &str, op: F)
    where
        F: FnOnce() -> crate::core::error::Result<()>,
    {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(op));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!(
                    "[LOGGER ERROR] Appender '{}' {} failed: {}",
                    appender.name(),
                    operation,
                    e
                );
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_msg
                );
            }
        }
    }

    #[inline]
    pub fn trace(&self, value: impl Into<LogValue>) {
        self.log(LogLevel::Trace, value);
    }

    #[inline]
    pub fn info(&self, value: impl Into<LogValue>) {
        self.log(LogLevel::Info, value);
    }

    #[inline]
    pub fn warn(&self, value: impl Into<LogValue>) {
        self.log(LogLevel::Warn, value);
    }

    #[inline]
    pub fn error(&self, value: impl Into<LogValue>) {
        self.log(LogLevel::Error, value);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

fn caller_context(location: &Location<'_>) -> String {
    let file = Path::new(location.file());
    std::env::current_dir()
        .ok()
        .and_then(|cwd| file.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| file.to_path_buf())
        .display()
        .to_string()
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use context_logger::prelude::*;
/// use std::sync::Arc;
///
/// let store = Arc::new(ConfigStore::new());
/// let logger = Logger::builder()
///     .context("worker")
///     .provider(Arc::clone(&store))
///     .level_source(FixedLevel::new("trace"))
///     .build();
///
/// assert_eq!(logger.log_level(), LogLevel::Trace);
/// ```
pub struct LoggerBuilder {
    context: Option<String>,
    overrides: ConfigPatch,
    provider: Option<Arc<dyn ConfigProvider>>,
    level_source: Option<Arc<dyn LevelSource>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            context: None,
            overrides: ConfigPatch::new(),
            provider: None,
            level_source: None,
            clock: None,
        }
    }

    /// Set the context label; derived from the caller's file if never set
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overrides(mut self, overrides: ConfigPatch) -> Self {
        self.overrides = overrides;
        self
    }

    /// Read base settings from `provider` instead of the global store
    #[must_use = "builder methods return a new value"]
    pub fn provider<P: ConfigProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        let provider: Arc<dyn ConfigProvider> = provider;
        self.provider = Some(provider);
        self
    }

    /// Replace the `LOG_LEVEL` environment lookup
    #[must_use = "builder methods return a new value"]
    pub fn level_source<L: LevelSource + 'static>(mut self, source: L) -> Self {
        self.level_source = Some(Arc::new(source));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the Logger
    #[track_caller]
    pub fn build(self) -> Logger {
        let context = match self.context {
            Some(context) => context,
            None => caller_context(Location::caller()),
        };
        let provider = self.provider.unwrap_or_else(|| {
            let global: Arc<ConfigStore> = Arc::clone(ConfigStore::global());
            global as Arc<dyn ConfigProvider>
        });

        Logger {
            context,
            overrides: self.overrides,
            provider,
            level_source: self
                .level_source
                .unwrap_or_else(|| Arc::new(EnvLevel::default())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            cache: Mutex::new(None),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
