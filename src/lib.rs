//! # hlog
//!
//! Leveled, structured logging configured from a YAML or JSON document.
//!
//! - **Configurable**: threshold, output file, rotation and console mirroring
//!   come from one [`Config`]
//! - **Structured**: maps and records passed as context become fields
//! - **Rotating files**: size-triggered rotation with age/count retention and
//!   gzip archives
//! - **Fatal handling**: registered exit handlers run before the process exits
//!
//! ```no_run
//! use hlog::{Config, Logger};
//! use std::collections::HashMap;
//!
//! let config = Config::from_yaml_file("config/logger.yaml")?;
//! let logger = Logger::from_config(&config);
//!
//! let mut ctx = HashMap::new();
//! ctx.insert("port", 8080);
//! logger.info("server started", ctx);
//! # Ok::<(), hlog::LoggerError>(())
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{
        compile_sink, ConsoleAppender, FanOutAppender, RotatingFileAppender, RotationPolicy,
    };
    pub use crate::config::Config;
    pub use crate::core::{
        extract_fields, register_exit_handler, Appender, ContextValue, ExitHandlers, FieldSet,
        LogEntry, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        OutputFormat, Result, SinkKind, TimestampFormat, ToFields,
    };
}

pub use appenders::{
    compile_sink, ConsoleAppender, FanOutAppender, RotatingFileAppender, RotationPolicy,
};
pub use config::Config;
pub use core::{
    extract_fields, register_exit_handler, Appender, ContextValue, ExitHandlers, FieldSet,
    LogEntry, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    OutputFormat, Result, SinkKind, TimestampFormat, ToFields,
};
