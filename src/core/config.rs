//! Logger configuration
//!
//! This module provides:
//! - `LoggerConfig`: the complete settings held by a config store
//! - `ConfigPatch`: a partial set of settings, merged into a `LoggerConfig`
//!   by `configure` and used as per-logger overrides
//! - `EffectiveConfig`: the normalized settings a logger formats with

use super::appender::Appender;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::DEFAULT_DATE_FORMAT;
use colored::{Color, Colorize};
use std::fmt;
use std::sync::Arc;

/// Wraps a finished line for terminal display
pub type ColorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Build a [`ColorFn`] painting text with a `colored` color.
pub fn paint(color: Color) -> ColorFn {
    Arc::new(move |text: &str| text.color(color).to_string())
}

/// One optional color function per level
#[derive(Clone, Default)]
pub struct Palette {
    slots: [Option<ColorFn>; 4],
}

impl Palette {
    /// Grey, cyan, yellow and bright red for trace, info, warn and error.
    pub fn standard() -> Self {
        let mut palette = Self::default();
        for level in LogLevel::ALL {
            palette.slots[level.rank() as usize] = Some(paint(level.color_code()));
        }
        palette
    }

    pub fn get(&self, level: LogLevel) -> Option<&ColorFn> {
        self.slots[level.rank() as usize].as_ref()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.get(level).is_some()
    }

    fn apply(&mut self, patch: &PalettePatch) {
        for (slot, change) in self.slots.iter_mut().zip(patch.slots.iter()) {
            if let Some(change) = change {
                *slot = change.clone();
            }
        }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for level in LogLevel::ALL {
            map.entry(&level.tag(), &self.is_enabled(level));
        }
        map.finish()
    }
}

/// Per-level color changes, merged key by key into a [`Palette`]
#[derive(Clone, Default)]
pub struct PalettePatch {
    slots: [Option<Option<ColorFn>>; 4],
}

impl PalettePatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, level: LogLevel, color: ColorFn) -> Self {
        self.slots[level.rank() as usize] = Some(Some(color));
        self
    }

    #[must_use]
    pub fn disable(mut self, level: LogLevel) -> Self {
        self.slots[level.rank() as usize] = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Change to the `colors` setting
#[derive(Clone)]
pub enum ColorsPatch {
    /// Turn coloring off for every level
    Disabled,
    /// Merge per-level changes; starts from an empty palette if coloring was off
    Levels(PalettePatch),
}

/// Complete logger settings
#[derive(Clone)]
pub struct LoggerConfig {
    /// `None` disables coloring entirely
    pub colors: Option<Palette>,
    /// strftime pattern; `None` or empty disables the timestamp
    pub date_format: Option<String>,
    pub trim: bool,
    pub ignore_empty: bool,
    /// Minimum level; loggers replace the stored value with the environment
    /// level (or `WARN`) before applying their overrides
    pub log_level: String,
    /// `None` writes to stdout
    pub output: Option<Arc<dyn Appender>>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            colors: Some(Palette::standard()),
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            trim: true,
            ignore_empty: true,
            log_level: LogLevel::Warn.to_str().to_string(),
            output: None,
        }
    }
}

impl LoggerConfig {
    /// Deep-merge `patch` into this configuration; fields absent from the
    /// patch are left untouched.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        match &patch.colors {
            Some(ColorsPatch::Disabled) => self.colors = None,
            Some(ColorsPatch::Levels(levels)) => {
                self.colors
                    .get_or_insert_with(Palette::default)
                    .apply(levels);
            }
            None => {}
        }
        if let Some(date_format) = &patch.date_format {
            self.date_format = date_format.clone();
        }
        if let Some(trim) = patch.trim {
            self.trim = trim;
        }
        if let Some(ignore_empty) = patch.ignore_empty {
            self.ignore_empty = ignore_empty;
        }
        if let Some(log_level) = &patch.log_level {
            self.log_level = log_level.clone();
        }
        if let Some(output) = &patch.output {
            self.output = output.clone();
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("colors", &self.colors)
            .field("date_format", &self.date_format)
            .field("trim", &self.trim)
            .field("ignore_empty", &self.ignore_empty)
            .field("log_level", &self.log_level)
            .field("output", &self.output.as_ref().map(|o| o.name().to_string()))
            .finish()
    }
}

/// Partial configuration
///
/// Nullable settings are tri-state: untouched, explicitly disabled, or set.
///
/// # Example
///
/// ```
/// use context_logger::{ConfigPatch, LogLevel, paint};
/// use colored::Color;
///
/// let patch = ConfigPatch::new()
///     .date_format("%H:%M:%S")
///     .color(LogLevel::Info, paint(Color::Green))
///     .log_level("info");
/// assert!(!patch.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct ConfigPatch {
    colors: Option<ColorsPatch>,
    date_format: Option<Option<String>>,
    trim: Option<bool>,
    ignore_empty: Option<bool>,
    log_level: Option<String>,
    output: Option<Option<Arc<dyn Appender>>>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn colors_disabled(mut self) -> Self {
        self.colors = Some(ColorsPatch::Disabled);
        self
    }

    #[must_use]
    pub fn colors(mut self, levels: PalettePatch) -> Self {
        self.colors = Some(ColorsPatch::Levels(levels));
        self
    }

    /// Set the color of one level, keeping the others as configured
    #[must_use]
    pub fn color(self, level: LogLevel, color: ColorFn) -> Self {
        let levels = self.take_levels().set(level, color);
        Self {
            colors: Some(ColorsPatch::Levels(levels)),
            ..self
        }
    }

    /// Turn coloring off for one level
    #[must_use]
    pub fn no_color(self, level: LogLevel) -> Self {
        let levels = self.take_levels().disable(level);
        Self {
            colors: Some(ColorsPatch::Levels(levels)),
            ..self
        }
    }

    fn take_levels(&self) -> PalettePatch {
        match &self.colors {
            Some(ColorsPatch::Levels(levels)) => levels.clone(),
            _ => PalettePatch::new(),
        }
    }

    /// An empty pattern disables the timestamp like [`ConfigPatch::no_date`]
    #[must_use]
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.date_format = Some(if pattern.is_empty() { None } else { Some(pattern) });
        self
    }

    #[must_use]
    pub fn no_date(mut self) -> Self {
        self.date_format = Some(None);
        self
    }

    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = Some(trim);
        self
    }

    #[must_use]
    pub fn ignore_empty(mut self, ignore_empty: bool) -> Self {
        self.ignore_empty = Some(ignore_empty);
        self
    }

    /// Case-insensitive; unrecognized values resolve to `WARN`
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn output<A: Appender + 'static>(self, appender: A) -> Self {
        self.shared_output(Arc::new(appender))
    }

    #[must_use]
    pub fn shared_output(mut self, appender: Arc<dyn Appender>) -> Self {
        self.output = Some(Some(appender));
        self
    }

    /// Go back to writing on stdout
    #[must_use]
    pub fn default_output(mut self) -> Self {
        self.output = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_none()
            && self.date_format.is_none()
            && self.trim.is_none()
            && self.ignore_empty.is_none()
            && self.log_level.is_none()
            && self.output.is_none()
    }

    /// Parse a JSON configuration document.
    ///
    /// Keys: `colors` (`false`, `null`, `true` or an object mapping level
    /// names to color names / `false`), `dateFormat` (string, `""` or
    /// `null`), `trim`, `ignoreEmpty`, `logLevel`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let object = value
            .as_object()
            .ok_or_else(|| LoggerError::config("config", "expected a JSON object"))?;

        let mut patch = Self::new();
        for (key, value) in object {
            match key.as_str() {
                "colors" => patch.colors = Some(parse_colors(value)?),
                "dateFormat" => match value {
                    Value::String(pattern) => patch = patch.date_format(pattern.as_str()),
                    Value::Null | Value::Bool(false) => patch = patch.no_date(),
                    _ => return Err(LoggerError::config("dateFormat", "expected a string")),
                },
                "trim" => patch.trim = Some(expect_bool("trim", value)?),
                "ignoreEmpty" => patch.ignore_empty = Some(expect_bool("ignoreEmpty", value)?),
                "logLevel" => match value {
                    Value::String(level) => patch.log_level = Some(level.clone()),
                    Value::Null => {}
                    _ => return Err(LoggerError::config("logLevel", "expected a string")),
                },
                other => {
                    return Err(LoggerError::config(
                        "config",
                        format!("unknown key '{}'", other),
                    ))
                }
            }
        }
        Ok(patch)
    }
}

fn expect_bool(component: &str, value: &serde_json::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| LoggerError::config(component, "expected a boolean"))
}

fn parse_colors(value: &serde_json::Value) -> Result<ColorsPatch> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(false) => Ok(ColorsPatch::Disabled),
        Value::Bool(true) => {
            let levels = LogLevel::ALL
                .iter()
                .fold(PalettePatch::new(), |levels, level| {
                    levels.set(*level, paint(level.color_code()))
                });
            Ok(ColorsPatch::Levels(levels))
        }
        Value::Object(entries) => {
            let mut levels = PalettePatch::new();
            for (name, color) in entries {
                // Level names outside the four known ones are accepted and ignored
                let Ok(level) = name.parse::<LogLevel>() else {
                    continue;
                };
                levels = match color {
                    Value::Null | Value::Bool(false) => levels.disable(level),
                    Value::String(color_name) => {
                        let color: Color = color_name.parse().map_err(|_| {
                            LoggerError::config(
                                "colors",
                                format!("unknown color '{}' for {}", color_name, level.tag()),
                            )
                        })?;
                        levels.set(level, paint(color))
                    }
                    _ => {
                        return Err(LoggerError::config(
                            "colors",
                            format!("expected a color name for {}", level.tag()),
                        ))
                    }
                };
            }
            Ok(ColorsPatch::Levels(levels))
        }
        _ => Err(LoggerError::config(
            "colors",
            "expected false, null, true or an object",
        )),
    }
}

impl fmt::Debug for ConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colors = match &self.colors {
            None => "unchanged",
            Some(ColorsPatch::Disabled) => "disabled",
            Some(ColorsPatch::Levels(_)) => "levels",
        };
        f.debug_struct("ConfigPatch")
            .field("colors", &colors)
            .field("date_format", &self.date_format)
            .field("trim", &self.trim)
            .field("ignore_empty", &self.ignore_empty)
            .field("log_level", &self.log_level)
            .field("output", &self.output.as_ref().map(Option::is_some))
            .finish()
    }
}

/// Settings one logger formats with, normalized from a [`LoggerConfig`]
#[derive(Clone)]
pub struct EffectiveConfig {
    pub colors: Option<Palette>,
    /// Always non-empty when present
    pub date_format: Option<String>,
    pub trim: bool,
    pub ignore_empty: bool,
    pub log_level: LogLevel,
    pub output: Option<Arc<dyn Appender>>,
}

impl EffectiveConfig {
    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level.rank() >= self.log_level.rank()
    }

    pub fn color_for(&self, level: LogLevel) -> Option<&ColorFn> {
        self.colors.as_ref().and_then(|palette| palette.get(level))
    }
}

impl From<LoggerConfig> for EffectiveConfig {
    fn from(config: LoggerConfig) -> Self {
        Self {
            colors: config.colors,
            date_format: config.date_format.filter(|pattern| !pattern.is_empty()),
            trim: config.trim,
            ignore_empty: config.ignore_empty,
            log_level: LogLevel::normalize(Some(config.log_level.as_str())),
            output: config.output,
        }
    }
}

impl fmt::Debug for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveConfig")
            .field("colors", &self.colors)
            .field("date_format", &self.date_format)
            .field("trim", &self.trim)
            .field("ignore_empty", &self.ignore_empty)
            .field("log_level", &self.log_level)
            .field("output", &self.output.as_ref().map(|o| o.name().to_string()))
            .finish()
    }
}
