//! Declarative logger configuration
//!
//! A configuration document (YAML or JSON) looks like:
//!
//! ```yaml
//! logLevel: Debug            # fatal | error | warn | info | debug | trace, any case
//! outputFilePath: log/dev.log  # empty or absent: console only
//! maxAge: 14                 # days to keep archives, 0 or less keeps them forever
//! maxBackups: 3              # archives to keep, 0 or less keeps all
//! maxSize: 500               # MB before rotating, 0 or less means 100
//! compress: true             # gzip archives
//! stdout: true               # also write to the console when a file is set
//! format: text               # text | json | logfmt
//! ```
//!
//! Decoding validates the level; every failure after the source was named,
//! including a bad level, is reported as [`LoggerError::Decode`].

use crate::appenders::RotationPolicy;
use crate::core::{LogLevel, LoggerError, OutputFormat, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Severity threshold; required in documents
    pub log_level: LogLevel,

    /// Active log file; empty selects console-only output
    #[serde(default, deserialize_with = "null_as_default")]
    pub output_file_path: String,

    /// Archive age limit in days
    #[serde(default)]
    pub max_age: i64,

    /// Archive count limit
    #[serde(default)]
    pub max_backups: i64,

    /// Rotation size in megabytes
    #[serde(default)]
    pub max_size: i64,

    #[serde(default, alias = "Compress")]
    pub compress: bool,

    /// Mirror file output to stdout
    #[serde(default, alias = "Stdout")]
    pub stdout: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Console-only configuration at the given level
    pub fn console(level: LogLevel) -> Self {
        Self {
            log_level: level,
            output_file_path: String::new(),
            max_age: 0,
            max_backups: 0,
            max_size: 0,
            compress: false,
            stdout: false,
            format: OutputFormat::default(),
        }
    }

    /// Decode a YAML configuration file
    ///
    /// # Errors
    ///
    /// * [`LoggerError::EmptySource`] if `path` is empty
    /// * [`LoggerError::Decode`] if the file cannot be read or decoded, or
    ///   names an unknown level
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (origin, content) = read_source(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| LoggerError::decode(origin, e))
    }

    /// Decode a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (origin, content) = read_source(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| LoggerError::decode(origin, e))
    }

    /// Decode a configuration file, choosing JSON for `.json` and YAML otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| LoggerError::decode("<yaml>", e))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::decode("<json>", e))
    }

    /// True when no output file is set; rotation fields and `stdout` are ignored
    pub fn is_console_only(&self) -> bool {
        self.output_file_path.is_empty()
    }

    /// Rotation thresholds for the file destination
    ///
    /// Negative limits read as `0`, which selects the policy default.
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new()
            .with_max_size_mb(u64::try_from(self.max_size).unwrap_or(0))
            .with_max_backups(usize::try_from(self.max_backups).unwrap_or(0))
            .with_max_age_days(u64::try_from(self.max_age).unwrap_or(0))
            .with_compression(self.compress)
    }
}

fn read_source(path: &Path) -> Result<(String, String)> {
    if path.as_os_str().is_empty() {
        return Err(LoggerError::EmptySource);
    }
    let origin = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => Ok((origin, content)),
        Err(e) => Err(LoggerError::decode(origin, e)),
    }
}
