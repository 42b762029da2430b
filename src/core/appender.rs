//! Appender trait for log output destinations

use super::error::Result;

/// Receives every finished line (prefixed, colorized, newline-terminated).
///
/// Any `Fn(&str) + Send + Sync` closure is an appender.
pub trait Appender: Send + Sync {
    fn append(&self, line: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<F> Appender for F
where
    F: Fn(&str) + Send + Sync,
{
    fn append(&self, line: &str) -> Result<()> {
        self(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}
