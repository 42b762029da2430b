//! In-memory appender that keeps every line it receives

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects appended lines; clones share the same buffer.
///
/// # Example
///
/// ```
/// use context_logger::appenders::MemoryAppender;
/// use context_logger::Appender;
///
/// let buffer = MemoryAppender::new();
/// buffer.append("[warn][app] low disk\n").unwrap();
/// assert_eq!(buffer.contents(), "[warn][app] low disk\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line in arrival order, each with its trailing newline
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// All lines concatenated
    pub fn contents(&self) -> String {
        self.lines.lock().concat()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
