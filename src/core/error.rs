//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Underlying cause of a configuration decode failure
#[derive(Debug, thiserror::Error)]
pub enum DecodeFailure {
    /// The configuration source could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The YAML document is malformed or has the wrong shape
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document is malformed or has the wrong shape
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration source identifier was empty
    #[error("Configuration source is empty")]
    EmptySource,

    /// Configuration source unreadable or malformed (including an invalid level)
    #[error("Could not decode configuration from '{origin}': {source}")]
    Decode {
        origin: String,
        #[source]
        source: DecodeFailure,
    },

    /// Severity token that names none of the six levels
    #[error("Unrecognized log level: '{0}'")]
    UnrecognizedLevel(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a decode error for the given origin
    pub fn decode(origin: impl Into<String>, source: impl Into<DecodeFailure>) -> Self {
        LoggerError::Decode {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Create an unrecognized level error
    pub fn unrecognized_level(token: impl Into<String>) -> Self {
        LoggerError::UnrecognizedLevel(token.into())
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
