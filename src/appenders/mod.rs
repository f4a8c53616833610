//! Appender implementations and sink compilation

pub mod compile;
pub mod console;
pub mod fan_out;
pub mod rotating_file;

pub use compile::compile_sink;
pub use console::ConsoleAppender;
pub use fan_out::FanOutAppender;
pub use rotating_file::{RotatingFileAppender, RotationPolicy, DEFAULT_MAX_SIZE_MB};

pub use crate::core::{Appender, SinkKind};
