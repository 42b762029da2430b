//! Basic logger usage example
//!
//! Demonstrates context labels, level filtering, per-logger overrides and
//! multi-line values.
//!
//! Run with: cargo run --example basic_usage

use colored::Color;
use context_logger::prelude::*;
use context_logger::{info, warn};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
struct PoolExhausted;

impl fmt::Display for PoolExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection pool exhausted")
    }
}

impl std::error::Error for PoolExhausted {}

fn main() -> Result<()> {
    println!("=== Context Logger - Basic Usage Example ===\n");

    // Optional global defaults, e.g. loaded from a config file
    let patch = ConfigPatch::from_json_str(r#"{"dateFormat": "%H:%M:%S%.3f"}"#)?;
    configure(&patch);

    // Context derived from this file's path
    let logger = Logger::from_caller();
    println!("1. Default level is {} (set LOG_LEVEL to change it):", logger.log_level());
    logger.trace("This is a trace message (hidden)");
    logger.info("This is an info message (hidden)");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Explicit context with overrides:");
    let db = Logger::with_overrides(
        "db",
        ConfigPatch::new()
            .log_level("trace")
            .color(LogLevel::Info, paint(Color::Green)),
    );
    db.trace("opening pool");
    info!(db, "pool ready with {} connections", 8);

    println!("\n3. Multi-line values:");
    db.info("  first line  \n\n  second line ");
    db.info(json!({"host": "localhost", "port": 5432}));
    db.error(LogValue::error(&PoolExhausted));

    println!("\n4. Reconfiguring affects existing loggers:");
    configure(&ConfigPatch::new().no_date().colors_disabled());
    warn!(logger, "now without timestamp or colors");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
