//! Log entry structure

use super::field_set::FieldSet;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// One record on its way to the sink
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
    pub fields: FieldSet,
}

impl LogEntry {
    /// Escape line breaks and tabs so one call always produces one line
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: Self::sanitize(&message.into()),
            timestamp: Utc::now(),
            error: None,
            fields: FieldSet::new(),
        }
    }

    /// Attach fields; keys and values are sanitized like the message
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields
            .iter()
            .map(|(k, v)| (Self::sanitize(k), Self::sanitize(v)))
            .collect();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(Self::sanitize(&error.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_single_line() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nERROR fake\tentry\r");
        assert_eq!(entry.message, "line one\\nERROR fake\\tentry\\r");
    }

    #[test]
    fn test_error_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Error, "failed").with_error("disk\nfull");
        assert_eq!(entry.error.as_deref(), Some("disk\\nfull"));
    }

    #[test]
    fn test_fields_are_sanitized() {
        let fields = FieldSet::new().with_field("note", "a\nb");
        let entry = LogEntry::new(LogLevel::Info, "m").with_fields(fields);
        assert_eq!(entry.fields.get("note"), Some("a\\nb"));
    }
}
