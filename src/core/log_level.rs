//! Log level definitions
//!
//! Levels are ordered most-severe first: `Fatal` has the smallest ordinal and
//! `Trace` the largest. The ordinal doubles as the index into [`LEVEL_NAMES`].

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical names, indexed by ordinal
const LEVEL_NAMES: [&str; 6] = ["Fatal", "Error", "Warn", "Info", "Debug", "Trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// All levels in ordinal order
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Canonical capitalised name (`"Debug"`, `"Warn"`, ...)
    pub fn as_str(&self) -> &'static str {
        LEVEL_NAMES[*self as usize]
    }

    /// Parse a level name, ignoring letter case but not whitespace
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnrecognizedLevel`] for anything that is not one
    /// of the six canonical names.
    pub fn parse(text: &str) -> Result<Self, LoggerError> {
        match text.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::unrecognized_level(text)),
        }
    }

    /// True if `self` clears a threshold of `other`
    ///
    /// Smaller ordinal means more severe, so `Error` is at least as severe as
    /// `Info` but `Debug` is not.
    #[inline]
    pub fn is_at_least_as_severe_as(&self, other: LogLevel) -> bool {
        (*self as u8) <= (other as u8)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s)
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        LogLevel::parse(&text).map_err(serde::de::Error::custom)
    }
}
