//! Output format configuration for log entries
//!
//! Provides different output formats for log entries:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools
//!
//! Every layout renders exactly one line per entry, terminated by `\n`.

use super::field_set::FieldSet;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Keys the record itself occupies; colliding fields are prefixed with `fields.`
/// until the name is free
const RESERVED_KEYS: [&str; 4] = ["timestamp", "level", "message", "error"];

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [Info ] Request processed user=alice`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"Info","message":"Request processed","timestamp":"2025-01-08T10:30:45.123Z","user":"alice"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=Info message="Request processed" user="alice"`
    Logfmt,
}

impl OutputFormat {
    /// Format a log entry as a newline-terminated line
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut line = match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp_format),
        };
        line.push('\n');
        line
    }

    /// Emitted name of a field; never equal to a record key or another field
    fn field_key(key: &str, fields: &FieldSet) -> String {
        if !RESERVED_KEYS.contains(&key) {
            return key.to_string();
        }
        let mut renamed = format!("fields.{}", key);
        while fields.contains_key(&renamed) {
            renamed.insert_str(0, "fields.");
        }
        renamed
    }

    /// Format as human-readable text
    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut line = format!(
            "[{}] [{:5}] {}",
            timestamp_format.format(&entry.timestamp),
            entry.level.as_str(),
            entry.message
        );

        if let Some(ref error) = entry.error {
            line.push_str(" error=");
            line.push_str(error);
        }

        for (key, value) in entry.fields.iter() {
            line.push(' ');
            line.push_str(&Self::field_key(key, &entry.fields));
            line.push('=');
            line.push_str(value);
        }

        line
    }

    /// Format as JSON
    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        let timestamp = if timestamp_format.is_numeric() {
            serde_json::Value::Number(entry.timestamp.timestamp_millis().into())
        } else {
            serde_json::Value::String(timestamp_format.format(&entry.timestamp))
        };
        json_obj.insert("timestamp".to_string(), timestamp);
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.as_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        if let Some(ref error) = entry.error {
            json_obj.insert("error".to_string(), serde_json::Value::String(error.clone()));
        }

        for (key, value) in entry.fields.iter() {
            json_obj.insert(Self::field_key(key, &entry.fields), serde_json::Value::String(value.to_string()));
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = vec![
            format!(
                "timestamp={}",
                self.escape_logfmt_value(&timestamp_format.format(&entry.timestamp))
            ),
            format!("level={}", entry.level.as_str()),
            // Message is always quoted
            format!("message={}", self.quote_logfmt_value(&entry.message)),
        ];

        if let Some(ref error) = entry.error {
            parts.push(format!("error={}", self.quote_logfmt_value(error)));
        }

        for (key, value) in entry.fields.iter() {
            parts.push(format!(
                "{}={}",
                self.escape_logfmt_key(&Self::field_key(key, &entry.fields)),
                self.escape_logfmt_value(value)
            ));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect()
    }

    /// Escape a logfmt value (quote if it contains spaces, quotes or `=`)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=']) {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
