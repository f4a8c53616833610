//! Console appender implementation

use crate::core::{Appender, LoggerError, Result, SinkKind};
use std::io::{self, Write};

/// Writes records to standard output
///
/// The target can be swapped for any writer, which is how tests capture
/// console output.
pub struct ConsoleAppender {
    target: Box<dyn Write + Send>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            target: Box::new(io::stdout()),
        }
    }

    /// Console appender writing to a custom target instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use hlog::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(Vec::new());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            target: Box::new(writer),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        self.target
            .write_all(record)
            .map_err(|e| LoggerError::io_operation("writing to console", "write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.target.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_writes_bytes_verbatim() {
        let capture = Capture::default();
        let mut appender = ConsoleAppender::with_writer(capture.clone());

        appender.append(b"first\n").unwrap();
        appender.append(b"second\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(&*capture.0.lock(), b"first\nsecond\n");
        assert_eq!(appender.kind(), SinkKind::Console);
    }
}
