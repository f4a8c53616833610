//! Rotating file appender with size-triggered rotation
//!
//! The active file is written in append mode. Once the next record would push
//! it past the size limit, it is archived as `<file>.1` (older archives shift
//! up by one) and a fresh active file is started. Archives are evicted by
//! count and by age, and optionally gzip-compressed to `<file>.<n>.gz`.
//!
//! Opening the file is deferred until the first write, so constructing an
//! appender never fails.

use crate::core::appender::{Appender, SinkKind};
use crate::core::error::{LoggerError, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Rotation size used when the configured size is zero
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Rotation thresholds for [`RotatingFileAppender`]
///
/// # Examples
///
/// ```
/// use hlog::appenders::RotationPolicy;
///
/// // 500 MB files, keep 3 archives for at most 14 days, gzip them
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(500)
///     .with_max_backups(3)
///     .with_max_age_days(14)
///     .with_compression(true);
///
/// assert_eq!(policy.max_bytes, 500 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size in bytes the active file may reach before rotating
    pub max_bytes: u64,
    /// Maximum number of archives to keep, `0` keeps all
    pub max_backups: usize,
    /// Archives older than this are deleted regardless of count
    pub max_age: Option<Duration>,
    /// Whether to gzip archives
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: 0,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit in megabytes; `0` selects [`DEFAULT_MAX_SIZE_MB`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_bytes = megabytes.saturating_mul(MEGABYTE);
        self
    }

    /// Set the size limit in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Set the archive age limit in days; `0` disables age eviction
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = (days > 0).then(|| Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)));
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// One archived file found next to the active file
#[derive(Debug)]
struct Backup {
    index: usize,
    path: PathBuf,
    compressed: bool,
    modified: SystemTime,
}

/// File appender that rotates by size and evicts archives by count and age
///
/// # Examples
///
/// ```no_run
/// use hlog::appenders::{RotatingFileAppender, RotationPolicy};
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_compression(true);
/// let appender = RotatingFileAppender::with_policy("/var/log/app.log", policy);
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Create an appender with the default policy
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_policy(path, RotationPolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Self {
        Self {
            base_path: path.as_ref().to_path_buf(),
            policy,
            writer: None,
            current_size: 0,
        }
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    fn display_path(&self) -> String {
        self.base_path.display().to_string()
    }

    fn directory(&self) -> PathBuf {
        match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> OsString {
        self.base_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("app.log"))
    }

    /// Get archive path for given index
    fn backup_path(&self, index: usize, compressed: bool) -> PathBuf {
        let mut name = self.file_name();
        name.push(format!(".{}", index));
        if compressed {
            name.push(".gz");
        }
        self.directory().join(name)
    }

    /// Open the active file, rotating first if the pending write would not fit
    fn open_existing_or_new(&mut self, pending: u64) -> Result<()> {
        let directory = self.directory();
        fs::create_dir_all(&directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", directory.display()),
                e,
            )
        })?;

        let size = self.open_active()?;
        if size > 0 && size + pending > self.policy.max_bytes {
            self.rotate_or_continue()
        } else {
            self.enforce_retention();
            Ok(())
        }
    }

    /// Open the active file for appending and take its size as the current size
    fn open_active(&mut self) -> Result<u64> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| LoggerError::file_appender(self.display_path(), format!("Failed to open: {}", e)))?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    self.display_path(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        Ok(size)
    }

    /// Rotate, or keep appending to the active file when rotation fails
    fn rotate_or_continue(&mut self) -> Result<()> {
        if let Err(e) = self.rotate() {
            eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
            if self.writer.is_none() {
                self.open_active()?;
            }
        }
        Ok(())
    }

    /// Archive the active file and start a new one
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.display_path(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        // Shift newest-last so no rename overwrites an archive still to be moved
        let mut backups = self.list_backups();
        backups.sort_by(|a, b| b.index.cmp(&a.index));
        for backup in &backups {
            let Some(next) = backup.index.checked_add(1) else {
                eprintln!(
                    "[WARN] Leaving log archive {} in place: index cannot be shifted",
                    backup.path.display()
                );
                continue;
            };
            let target = self.backup_path(next, backup.compressed);
            fs::rename(&backup.path, &target).map_err(|e| {
                LoggerError::file_rotation(
                    backup.path.display().to_string(),
                    format!("Failed to shift archive: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let first = self.backup_path(1, false);
            fs::rename(&self.base_path, &first).map_err(|e| {
                LoggerError::file_rotation(
                    self.display_path(),
                    format!("Failed to archive current log file: {}", e),
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.display_path(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;

        self.enforce_retention();
        Ok(())
    }

    /// Archives next to the active file, in no particular order
    fn list_backups(&self) -> Vec<Backup> {
        let prefix = format!("{}.", self.file_name().to_string_lossy());
        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let suffix = name.strip_prefix(&prefix)?;
                let (digits, compressed) = match suffix.strip_suffix(".gz") {
                    Some(digits) => (digits, true),
                    None => (suffix, false),
                };
                let index: usize = digits.parse().ok().filter(|i| *i > 0)?;
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or_else(|_| SystemTime::now());
                Some(Backup {
                    index,
                    path: entry.path(),
                    compressed,
                    modified,
                })
            })
            .collect()
    }

    /// Delete archives past the count or age limit, compress the rest if enabled
    ///
    /// Failures are reported and skipped; retention never blocks writing.
    fn enforce_retention(&self) {
        let now = SystemTime::now();

        for backup in self.list_backups() {
            let over_count =
                self.policy.max_backups > 0 && backup.index > self.policy.max_backups;
            let over_age = self.policy.max_age.is_some_and(|max_age| {
                now.duration_since(backup.modified)
                    .map(|age| age > max_age)
                    .unwrap_or(false)
            });

            if over_count || over_age {
                if let Err(e) = fs::remove_file(&backup.path) {
                    eprintln!(
                        "[WARN] Failed to remove old log archive {}: {}",
                        backup.path.display(),
                        e
                    );
                }
            } else if self.policy.compress && !backup.compressed {
                let target = self.backup_path(backup.index, true);
                if let Err(e) = Self::compress_file(&backup.path, &target) {
                    eprintln!("[WARN] Failed to compress log archive: {}", e);
                }
            }
        }
    }

    /// Gzip `path` into `gz_path`, removing the original only on success
    ///
    /// The output is streamed through a temporary file and renamed into place.
    fn compress_file(path: &Path, gz_path: &Path) -> Result<()> {
        use std::io::{BufReader, Read};

        let mut temp_name = gz_path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_gz_path = PathBuf::from(temp_name);

        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open file for compression: {}", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::with_capacity(64 * 1024, input);

        let output = File::create(&temp_gz_path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
                e,
            )
        })?;
        let mut encoder = flate2::write::GzEncoder::new(
            BufWriter::with_capacity(64 * 1024, output),
            flate2::Compression::default(),
        );

        let mut buffer = vec![0u8; 64 * 1024];
        let streamed = loop {
            match reader.read(&mut buffer) {
                Ok(0) => break Ok(()),
                Ok(n) => {
                    if let Err(e) = encoder.write_all(&buffer[..n]) {
                        break Err(e);
                    }
                }
                Err(e) => break Err(e),
            }
        };

        let finished = streamed
            .and_then(|_| encoder.finish())
            .and_then(|mut inner| inner.flush())
            .and_then(|_| fs::rename(&temp_gz_path, gz_path));
        if let Err(e) = finished {
            let _ = fs::remove_file(&temp_gz_path);
            return Err(LoggerError::io_operation(
                "compress log file",
                format!("Failed to compress {}", path.display()),
                e,
            ));
        }

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[WARN] Compression succeeded but failed to remove original file {}: {}",
                path.display(),
                e
            );
        }

        Ok(())
    }
}

impl Appender for RotatingFileAppender {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        let len = record.len() as u64;
        if len > self.policy.max_bytes {
            return Err(LoggerError::file_appender(
                self.display_path(),
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.policy.max_bytes
                ),
            ));
        }

        if self.writer.is_none() {
            self.open_existing_or_new(len)?;
        } else if self.current_size + len > self.policy.max_bytes {
            self.rotate_or_continue()?;
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(record).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += len;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }

    fn kind(&self) -> SinkKind {
        SinkKind::RotatingFile {
            path: self.base_path.clone(),
        }
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
