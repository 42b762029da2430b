//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::MemoryAppender;

pub use crate::core::Appender;
