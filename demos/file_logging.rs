//! File logging example
//!
//! Loads a configuration that writes to a rotating file and mirrors every
//! record to the console.
//!
//! Run with: cargo run --example file_logging

use hlog::prelude::*;

const CONFIG: &str = r#"
logLevel: Debug
outputFilePath: logs/application.log
maxSize: 1
maxBackups: 3
maxAge: 7
compress: true
stdout: true
format: logfmt
"#;

fn main() -> Result<()> {
    println!("=== hlog - File Logging Example ===\n");

    let config = Config::from_yaml_str(CONFIG)?;
    let logger = Logger::from_config(&config);

    println!("1. Logging to both console and file:");
    logger.info("Application started", ());
    logger.debug("Loading configuration...", ());
    logger.warn("Using default settings for some options", ());
    logger.error("Failed to load optional plugin", ());

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i), ContextValue::record([("item", i)]));
        if i == 3 {
            logger.warn("Item 3 took longer than expected", ());
        }
    }

    logger.info("All operations completed", ());
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", config.output_file_path);

    Ok(())
}
