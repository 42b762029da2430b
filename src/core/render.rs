//! Converts one logged value into the text lines that get prefixed

use super::config::EffectiveConfig;
use super::log_value::{ErrorReport, LogValue};
use serde_json::Value;

/// Line that separates an error message from its trace
pub const STACK_TRACE_HEADER: &str = "Stack trace:";

/// Text handling switches, taken from the effective configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub trim: bool,
    pub ignore_empty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim: true,
            ignore_empty: true,
        }
    }
}

impl From<&EffectiveConfig> for RenderOptions {
    fn from(config: &EffectiveConfig) -> Self {
        Self {
            trim: config.trim,
            ignore_empty: config.ignore_empty,
        }
    }
}

/// Render `value` into lines.
///
/// Shapes are checked in a fixed order: empty, error, structured, text.
/// Only text is subject to `trim` and `ignore_empty`, so an all-blank text
/// can produce no lines at all.
pub fn render_lines(value: &LogValue, options: RenderOptions) -> Vec<String> {
    if value.is_falsy() {
        return vec![String::new()];
    }

    match value {
        LogValue::Error(report) => error_lines(report),
        LogValue::Structured(json @ (Value::Object(_) | Value::Array(_))) => json_lines(json),
        LogValue::Pretty(notation) => notation.split('\n').map(str::to_string).collect(),
        LogValue::Structured(Value::String(text)) | LogValue::Text(text) => {
            text_lines(text, options)
        }
        LogValue::Structured(scalar) => text_lines(&scalar.to_string(), options),
        LogValue::Empty => vec![String::new()],
    }
}

fn error_lines(report: &ErrorReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.trace.len() + 2);
    lines.push(report.message.clone());
    lines.push(STACK_TRACE_HEADER.to_string());
    lines.extend(report.trace.iter().cloned());
    lines
}

fn json_lines(json: &Value) -> Vec<String> {
    let pretty = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
    pretty.split('\n').map(str::to_string).collect()
}

fn text_lines(text: &str, options: RenderOptions) -> Vec<String> {
    text.split('\n')
        .map(|line| if options.trim { line.trim() } else { line })
        .filter(|line| !(options.ignore_empty && line.is_empty()))
        .map(str::to_string)
        .collect()
}
