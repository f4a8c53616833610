//! Fan-out appender duplicating every record to several children

use crate::core::{Appender, LoggerError, Result, SinkKind};

/// Writes every record to all children, in order
///
/// Failure policy is best-effort: a failing child does not stop the
/// remaining children from receiving the record. After all children were
/// attempted, the first error is returned.
pub struct FanOutAppender {
    children: Vec<Box<dyn Appender>>,
}

impl FanOutAppender {
    pub fn new(children: Vec<Box<dyn Appender>>) -> Self {
        Self { children }
    }

    /// Add a child appender, builder style
    #[must_use]
    pub fn with<A: Appender + 'static>(mut self, child: A) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn for_each_child<F>(&mut self, mut op: F) -> Result<()>
    where
        F: FnMut(&mut Box<dyn Appender>) -> Result<()>,
    {
        let mut first_error: Option<LoggerError> = None;
        for child in self.children.iter_mut() {
            if let Err(e) = op(child) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Appender for FanOutAppender {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        self.for_each_child(|child| child.append(record))
    }

    fn flush(&mut self) -> Result<()> {
        self.for_each_child(|child| child.flush())
    }

    fn name(&self) -> &str {
        "fan_out"
    }

    fn kind(&self) -> SinkKind {
        SinkKind::FanOut(self.children.iter().map(|c| c.kind()).collect())
    }
}
