//! Values accepted by the leveled log methods

use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

/// Anything a logger can render into lines
///
/// Conversions exist for text, numbers, booleans, `serde_json::Value`,
/// `Option<T>` and [`ErrorReport`]. Use [`LogValue::error`],
/// [`LogValue::structured`] or [`LogValue::debug`] for the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Renders as a single empty line
    Empty,
    Text(String),
    Error(ErrorReport),
    /// Objects and arrays are pretty-printed; scalars render as text
    Structured(serde_json::Value),
    /// Already formatted multi-line notation, emitted line by line as is
    Pretty(String),
}

impl LogValue {
    /// Capture the message, `source()` chain and (when enabled through
    /// `RUST_BACKTRACE`) a backtrace of `err`.
    pub fn error<E: Error + 'static>(err: &E) -> Self {
        LogValue::Error(ErrorReport::from_error(err))
    }

    /// Serialize `value` to JSON.
    ///
    /// Values serde cannot represent (maps with non-string keys, failing
    /// `Serialize` impls) become the text `<unserializable value: {reason}>`.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => LogValue::Structured(json),
            Err(e) => LogValue::Text(format!("<unserializable value: {}>", e)),
        }
    }

    /// Pretty `Debug` output, for types without `Serialize`
    ///
    /// `{:#?}` indents by four spaces; each line is reindented to two to
    /// match structured values.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        let notation = format!("{:#?}", value);
        let lines: Vec<String> = notation
            .split('\n')
            .map(|line| {
                let body = line.trim_start_matches(' ');
                let depth = (line.len() - body.len()) / 4;
                format!("{}{}", "  ".repeat(depth), body)
            })
            .collect();
        LogValue::Pretty(lines.join("\n"))
    }

    /// Empty text, JSON `null`, `false`, `0` and `""` all count as empty.
    pub fn is_falsy(&self) -> bool {
        use serde_json::Value;

        match self {
            LogValue::Empty => true,
            LogValue::Text(text) | LogValue::Pretty(text) => text.is_empty(),
            LogValue::Error(_) => false,
            LogValue::Structured(json) => match json {
                Value::Null | Value::Bool(false) => true,
                Value::String(text) => text.is_empty(),
                Value::Number(n) => n.as_f64() == Some(0.0),
                _ => false,
            },
        }
    }
}

/// Error-like value: a message plus trace lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub trace: Vec<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, trace: Vec<String>) -> Self {
        Self {
            message: message.into(),
            trace,
        }
    }

    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        Self::with_backtrace(err, &Backtrace::capture())
    }

    /// Like [`ErrorReport::from_error`] with an explicitly captured backtrace
    pub fn with_backtrace(err: &(dyn Error + 'static), backtrace: &Backtrace) -> Self {
        let mut trace: Vec<String> = std::iter::successors(err.source(), |&e| e.source())
            .map(|source| format!("    caused by: {}", source))
            .collect();

        if backtrace.status() == BacktraceStatus::Captured {
            trace.extend(backtrace.to_string().lines().map(str::to_string));
        }

        Self::new(err.to_string(), trace)
    }
}

impl From<ErrorReport> for LogValue {
    fn from(report: ErrorReport) -> Self {
        LogValue::Error(report)
    }
}

impl From<Box<dyn Error + Send + Sync>> for LogValue {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        let err: &(dyn Error + 'static) = &*err;
        LogValue::Error(ErrorReport::from_error(err))
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Text(s)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Text(s.to_string())
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Text(s.clone())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(json: serde_json::Value) -> Self {
        LogValue::Structured(json)
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Structured(i.into())
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Structured(i.into())
    }
}

impl From<u64> for LogValue {
    fn from(u: u64) -> Self {
        LogValue::Structured(u.into())
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Structured(f.into())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Structured(b.into())
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "inner failed")
        }
    }

    impl Error for Inner {}

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_falsy_values() {
        assert!(LogValue::Empty.is_falsy());
        assert!(LogValue::from("").is_falsy());
        assert!(LogValue::from(json!(null)).is_falsy());
        assert!(LogValue::from(false).is_falsy());
        assert!(LogValue::from(0).is_falsy());
        assert!(LogValue::from(None::<&str>).is_falsy());

        assert!(!LogValue::from("  ").is_falsy());
        assert!(!LogValue::from(1).is_falsy());
        assert!(!LogValue::from(json!({})).is_falsy());
        assert!(!LogValue::from(ErrorReport::new("", vec![])).is_falsy());
    }

    #[test]
    fn test_error_report_walks_sources() {
        let report = ErrorReport::with_backtrace(&Outer(Inner), &Backtrace::disabled());
        assert_eq!(report.message, "outer failed");
        assert_eq!(report.trace, vec!["    caused by: inner failed".to_string()]);
    }

    #[test]
    fn test_error_report_includes_captured_backtrace() {
        let backtrace = Backtrace::force_capture();
        let report = ErrorReport::with_backtrace(&Inner, &backtrace);
        if backtrace.status() == BacktraceStatus::Captured {
            assert!(!report.trace.is_empty());
        }
    }

    #[test]
    fn test_structured_serializes() {
        #[derive(Serialize)]
        struct Ship {
            name: &'static str,
            crew: u32,
        }

        let value = LogValue::structured(&Ship {
            name: "Voyager",
            crew: 141,
        });
        assert_eq!(value, LogValue::Structured(json!({"name": "Voyager", "crew": 141})));
    }

    #[test]
    fn test_structured_falls_back_to_text() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys");
        match LogValue::structured(&map) {
            LogValue::Text(text) => assert!(text.starts_with("<unserializable value: ")),
            other => panic!("expected text fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_is_pretty() {
        let value = LogValue::debug(&Some(3));
        assert_eq!(value, LogValue::Pretty("Some(\n  3,\n)".to_string()));
    }

    #[test]
    fn test_debug_nested_uses_two_space_indent() {
        #[derive(Debug)]
        struct Crew {
            captain: &'static str,
            ranks: Vec<u8>,
        }

        let value = LogValue::debug(&Crew {
            captain: "Picard",
            ranks: vec![1],
        });
        let expected = "Crew {\n  captain: \"Picard\",\n  ranks: [\n    1,\n  ],\n}";
        assert_eq!(value, LogValue::Pretty(expected.to_string()));
    }
}
