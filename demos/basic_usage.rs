//! Basic logger usage example
//!
//! Demonstrates console logging, structured context, error attachment and
//! exit handlers.
//!
//! Run with: cargo run --example basic_usage

use hlog::prelude::*;
use hlog::{info, warn};
use std::collections::HashMap;

fn main() -> Result<()> {
    println!("=== hlog - Basic Usage Example ===\n");

    let config = Config::from_yaml_str("logLevel: trace\n")?;
    let logger = Logger::from_config(&config);

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", ());
    logger.debug("This is a debug message", ());
    logger.info("This is an info message", ());
    logger.warn("This is a warning message", ());
    logger.error("This is an error message", ());

    println!("\n2. Structured context:");
    let mut ctx = HashMap::new();
    ctx.insert("user", "alice");
    ctx.insert("action", "login");
    logger.info("User signed in", &ctx);
    logger.info(
        "Request served",
        ContextValue::record([("status", "200"), ("latency_ms", "12")]),
    );
    info!(logger, ctx; "Macro with context, attempt {}", 2);

    println!("\n3. Attaching an error:");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "cache.db missing");
    logger.with_error(&err).warn("Starting with an empty cache", ());
    warn!(logger, "Retrying in {}s", 5);

    println!("\n4. Higher threshold - trace and debug won't show:");
    let quiet = Logger::from_config(&Config::console(LogLevel::Info));
    quiet.trace("Trace message (hidden)", ());
    quiet.debug("Debug message (hidden)", ());
    quiet.info("Info message (visible)", ());

    println!("\n5. Fatal with an exit handler:");
    // Private handlers and a stub exit keep this demo running to completion;
    // the default logger runs the global handlers and exits with status 1
    let handlers = ExitHandlers::new();
    handlers.register(|| println!("   exit handler: releasing resources"));
    let fatal_logger = Logger::builder()
        .exit_handlers(handlers)
        .exit_fn(|code| println!("   would exit with status {}", code))
        .build();
    fatal_logger.fatal("This is a fatal message", ());

    Ok(())
}
