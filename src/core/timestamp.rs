//! Timestamp formatting utilities
//!
//! Line prefixes use chrono strftime patterns rendered in local time. A
//! [`Clock`] supplies "now" so output can be pinned in tests.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Default prefix pattern: `2023-11-01 17:10:00.000`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Source of the current time for line prefixes
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Returns true if chrono understands every specifier in `pattern`.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Format `datetime` with `pattern`.
///
/// Patterns chrono rejects are replaced by [`DEFAULT_DATE_FORMAT`] so a bad
/// configuration never aborts a log call.
#[must_use]
pub fn format_timestamp(pattern: &str, datetime: &DateTime<Local>) -> String {
    let pattern = if is_valid_pattern(pattern) {
        pattern
    } else {
        DEFAULT_DATE_FORMAT
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();

    let mut out = String::new();
    if write!(out, "{}", datetime.format_with_items(items.iter())).is_err() {
        out.clear();
        let _ = write!(out, "{}", datetime.format(DEFAULT_DATE_FORMAT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_datetime() -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2023, 11, 1)
            .and_then(|d| d.and_hms_milli_opt(17, 10, 0, 42))
            .expect("valid datetime");
        Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("representable local time")
    }

    #[test]
    fn test_default_format_has_millis() {
        let result = format_timestamp(DEFAULT_DATE_FORMAT, &fixed_datetime());
        assert_eq!(result, "2023-11-01 17:10:00.042");
    }

    #[test]
    fn test_custom_format() {
        let result = format_timestamp("%Y-%m-%d", &fixed_datetime());
        assert_eq!(result, "2023-11-01");
    }

    #[test]
    fn test_invalid_pattern_uses_default() {
        assert!(!is_valid_pattern("%Q"));
        let result = format_timestamp("%Q", &fixed_datetime());
        assert_eq!(result, "2023-11-01 17:10:00.042");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(fixed_datetime());
        assert_eq!(clock.now(), fixed_datetime());
    }

    #[test]
    fn test_system_clock_advances() {
        let before = Local::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
