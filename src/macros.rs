//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and log the result.
//! Context can be supplied ahead of the message, separated by `;`.
//!
//! # Examples
//!
//! ```
//! use hlog::prelude::*;
//! use hlog::info;
//! use std::collections::HashMap;
//!
//! let logger = Logger::default();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With context fields
//! let mut ctx = HashMap::new();
//! ctx.insert("user_id", 42);
//! info!(logger, ctx; "User performed action: {}", "login");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use hlog::prelude::*;
/// # let logger = Logger::default();
/// use hlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, ContextValue::record([("attempt", 3)]); "retrying");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $ctx:expr; $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $ctx, None)
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), (), None)
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use hlog::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).build();
/// use hlog::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use hlog::prelude::*;
/// # let logger = Logger::default();
/// use hlog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use hlog::prelude::*;
/// # let logger = Logger::default();
/// use hlog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run exit handlers and terminate.
///
/// # Examples
///
/// ```
/// # use hlog::prelude::*;
/// # let logger = Logger::builder()
/// #     .exit_handlers(ExitHandlers::new())
/// #     .exit_fn(|_| {})
/// #     .build();
/// use hlog::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $ctx:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $ctx; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Appender, ContextValue, ExitHandlers, LogLevel, Logger, OutputFormat, Result};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Appender for Capture {
        fn append(&mut self, record: &[u8]) -> Result<()> {
            self.0.lock().extend_from_slice(record);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn logger(level: LogLevel) -> (Logger, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder()
            .min_level(level)
            .sink(capture.clone())
            .output_format(OutputFormat::Logfmt)
            .exit_handlers(ExitHandlers::new())
            .exit_fn(|_| {})
            .build();
        (logger, capture)
    }

    fn output(capture: &Capture) -> String {
        String::from_utf8(capture.0.lock().clone()).unwrap()
    }

    #[test]
    fn test_log_macro_formats_arguments() {
        let (logger, capture) = logger(LogLevel::Info);
        log!(logger, LogLevel::Info, "Formatted: {}", 42);

        assert!(output(&capture).contains("message=\"Formatted: 42\""));
    }

    #[test]
    fn test_level_macros_respect_threshold() {
        let (logger, capture) = logger(LogLevel::Debug);
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let out = output(&capture);
        assert_eq!(out.lines().count(), 4);
        assert!(!out.contains("Trace message"));
        assert!(out.contains("level=Warn message=\"Retry 1 of 3\""));
    }

    #[test]
    fn test_context_prefix() {
        let (logger, capture) = logger(LogLevel::Info);
        let mut ctx = BTreeMap::new();
        ctx.insert("request", "r-17");

        info!(logger, ctx; "handled in {}ms", 12);
        error!(logger, ContextValue::record([("code", 500)]); "upstream failed");

        let out = output(&capture);
        assert!(out.contains("message=\"handled in 12ms\" request=r-17"));
        assert!(out.contains("message=\"upstream failed\" code=500"));
    }

    #[test]
    fn test_fatal_macro_runs_handlers() {
        let handlers = ExitHandlers::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        handlers.register(move || flag.store(true, Ordering::SeqCst));

        let logger = Logger::builder()
            .sink(Capture::default())
            .exit_handlers(handlers)
            .exit_fn(|_| {})
            .build();

        fatal!(logger, "Critical failure: {}", "system");
        assert!(ran.load(Ordering::SeqCst));
    }
}
