//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod exit;
pub mod field_set;
pub mod fields;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;

pub use appender::{Appender, SinkKind};
pub use error::{DecodeFailure, LoggerError, Result};
pub use exit::{default_exit_fn, register_exit_handler, ExitFn, ExitHandler, ExitHandlers};
pub use field_set::FieldSet;
pub use fields::{extract_fields, ContextValue, ToFields};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{LogEvent, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
