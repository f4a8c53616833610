//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    exit::{default_exit_fn, ExitFn, ExitHandlers},
    fields::{extract_fields, ContextValue},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use crate::appenders::{compile_sink, ConsoleAppender};
use crate::config::Config;
use parking_lot::Mutex;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

/// Leveled, structured logger writing to one compiled sink
///
/// Every call formats its record once and blocks until the sink has written
/// and flushed it. The sink is guarded by a mutex, so a `Logger` can be
/// shared across threads (typically behind an `Arc`) and records never
/// interleave.
///
/// Logging never returns an error. A failing write is reported on stderr and
/// counted in [`LoggerMetrics::failed_writes`].
pub struct Logger {
    min_level: LogLevel,
    sink: Mutex<Box<dyn Appender>>,
    format: OutputFormat,
    timestamp_format: TimestampFormat,
    exit_handlers: ExitHandlers,
    exit_fn: ExitFn,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Build a logger from a decoded configuration
    ///
    /// # Example
    /// ```
    /// use hlog::{Config, Logger, LogLevel};
    ///
    /// let config = Config::from_yaml_str("logLevel: debug\n").unwrap();
    /// let logger = Logger::from_config(&config);
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Logger::builder()
            .min_level(config.log_level)
            .output_format(config.format)
            .boxed_sink(compile_sink(config))
            .build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use hlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .sink(ConsoleAppender::new())
    ///     .output_format(OutputFormat::Logfmt)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Threshold this logger was built with
    pub fn level(&self) -> LogLevel {
        self.min_level
    }

    /// True if a record at `level` would be written
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_at_least_as_severe_as(self.min_level)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    /// Log one record
    ///
    /// All level methods and [`LogEvent`] funnel through here. A `Fatal`
    /// record runs the exit handlers and then terminates the process with
    /// status 1, even if the write failed.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: impl Into<ContextValue>,
        error: Option<&dyn Error>,
    ) {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let mut entry = LogEntry::new(level, message).with_fields(extract_fields(&context.into()));
        if let Some(err) = error {
            entry = entry.with_error(err.to_string());
        }

        let line = self.format.format(&entry, &self.timestamp_format);
        self.write_record(line.as_bytes());

        if level == LogLevel::Fatal {
            self.terminate();
        }
    }

    /// Attach an error to the next record
    ///
    /// The error lives only in the returned [`LogEvent`], so concurrent calls
    /// on the same logger never see each other's errors.
    ///
    /// ```
    /// use hlog::Logger;
    ///
    /// let logger = Logger::default();
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// logger.with_error(&err).error("could not save", ());
    /// ```
    pub fn with_error<'a>(&'a self, error: &'a dyn Error) -> LogEvent<'a> {
        LogEvent {
            logger: self,
            error,
        }
    }

    pub fn fatal(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Fatal, message, context, None);
    }

    pub fn error(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Error, message, context, None);
    }

    pub fn warn(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Warn, message, context, None);
    }

    pub fn info(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Info, message, context, None);
    }

    pub fn debug(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Debug, message, context, None);
    }

    pub fn trace(&self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.log(LogLevel::Trace, message, context, None);
    }

    /// Write and flush under the sink lock, isolating sink panics
    fn write_record(&self, record: &[u8]) {
        let mut sink = self.sink.lock();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            sink.append(record)?;
            sink.flush()
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_written();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                self.metrics.record_failed_write();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}",
                    sink.name(),
                    panic_msg
                );
                self.metrics.record_failed_write();
            }
        }
    }

    fn terminate(&self) {
        self.exit_handlers.run_all();
        (self.exit_fn)(1);
    }
}

impl Default for Logger {
    /// Console logger at `Info`
    fn default() -> Self {
        Logger::builder().build()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.sink.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// One pending record with an error attached
///
/// Created by [`Logger::with_error`]; each terminal method logs through the
/// originating logger and consumes the event.
#[must_use = "a LogEvent does nothing until one of its level methods is called"]
pub struct LogEvent<'a> {
    logger: &'a Logger,
    error: &'a dyn Error,
}

impl LogEvent<'_> {
    pub fn fatal(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Fatal, message, context);
    }

    pub fn error(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Error, message, context);
    }

    pub fn warn(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Warn, message, context);
    }

    pub fn info(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Info, message, context);
    }

    pub fn debug(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Debug, message, context);
    }

    pub fn trace(self, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.emit(LogLevel::Trace, message, context);
    }

    fn emit(self, level: LogLevel, message: impl Into<String>, context: impl Into<ContextValue>) {
        self.logger.log(level, message, context, Some(self.error));
    }
}

/// Builder for configuring a Logger
///
/// Defaults: `Info` threshold, stdout sink, text layout, ISO 8601 timestamps,
/// the process-wide exit handlers and `std::process::exit`.
///
/// # Example
/// ```
/// use hlog::prelude::*;
///
/// let handlers = ExitHandlers::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Warn)
///     .sink(ConsoleAppender::new())
///     .exit_handlers(handlers)
///     .timestamp_format(TimestampFormat::UnixMillis)
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    sink: Option<Box<dyn Appender>>,
    format: OutputFormat,
    timestamp_format: TimestampFormat,
    exit_handlers: Option<ExitHandlers>,
    exit_fn: Option<ExitFn>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sink: None,
            format: OutputFormat::default(),
            timestamp_format: TimestampFormat::default(),
            exit_handlers: None,
            exit_fn: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the destination
    #[must_use = "builder methods return a new value"]
    pub fn sink<A: Appender + 'static>(mut self, sink: A) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set an already boxed destination, such as the result of [`compile_sink`]
    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Appender>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Use a private exit handler list instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn exit_handlers(mut self, handlers: ExitHandlers) -> Self {
        self.exit_handlers = Some(handlers);
        self
    }

    /// Replace the termination primitive called after a fatal record
    #[must_use = "builder methods return a new value"]
    pub fn exit_fn<F>(mut self, exit_fn: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_fn = Some(std::sync::Arc::new(exit_fn));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            min_level: self.min_level,
            sink: Mutex::new(
                self.sink
                    .unwrap_or_else(|| Box::new(ConsoleAppender::new())),
            ),
            format: self.format,
            timestamp_format: self.timestamp_format,
            exit_handlers: self
                .exit_handlers
                .unwrap_or_else(|| ExitHandlers::global().clone()),
            exit_fn: self.exit_fn.unwrap_or_else(default_exit_fn),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
