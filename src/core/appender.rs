//! Appender trait for log output destinations

use super::error::Result;
use std::path::PathBuf;

/// Shape of a compiled destination, for inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    RotatingFile { path: PathBuf },
    FanOut(Vec<SinkKind>),
    Custom(String),
}

/// A blocking destination for formatted records
///
/// Every call receives the complete bytes of one record. Implementations
/// must be `Send` so the logger can be shared across threads; the logger
/// serializes access, so `&mut self` is never contended.
pub trait Appender: Send {
    fn append(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    fn kind(&self) -> SinkKind {
        SinkKind::Custom(self.name().to_string())
    }
}

impl<A: Appender + ?Sized> Appender for Box<A> {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        (**self).append(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> SinkKind {
        (**self).kind()
    }
}
