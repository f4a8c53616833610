//! Configuration to sink compilation

use super::{ConsoleAppender, FanOutAppender, RotatingFileAppender};
use crate::config::Config;
use crate::core::Appender;

/// Build the destination pipeline described by `config`
///
/// * no output file: console only
/// * output file: a rotating file carrying the configured thresholds
/// * output file and `stdout`: fan-out to the file, then the console
///
/// Never fails; a file that cannot be opened reports on the first write.
pub fn compile_sink(config: &Config) -> Box<dyn Appender> {
    if config.is_console_only() {
        return Box::new(ConsoleAppender::new());
    }

    let file = RotatingFileAppender::with_policy(&config.output_file_path, config.rotation_policy());

    if config.stdout {
        Box::new(
            FanOutAppender::new(Vec::new())
                .with(file)
                .with(ConsoleAppender::new()),
        )
    } else {
        Box::new(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, SinkKind};
    use std::path::PathBuf;

    #[test]
    fn test_empty_path_is_console_only() {
        let config = Config {
            output_file_path: String::new(),
            stdout: true,
            max_size: 10,
            ..Config::console(LogLevel::Debug)
        };

        assert_eq!(compile_sink(&config).kind(), SinkKind::Console);
    }

    #[test]
    fn test_path_without_stdout_is_file_only() {
        let config = Config {
            output_file_path: "x.log".to_string(),
            ..Config::console(LogLevel::Debug)
        };

        assert_eq!(
            compile_sink(&config).kind(),
            SinkKind::RotatingFile {
                path: PathBuf::from("x.log")
            }
        );
    }

    #[test]
    fn test_path_with_stdout_fans_out_file_first() {
        let config = Config {
            output_file_path: "x.log".to_string(),
            stdout: true,
            ..Config::console(LogLevel::Debug)
        };

        assert_eq!(
            compile_sink(&config).kind(),
            SinkKind::FanOut(vec![
                SinkKind::RotatingFile {
                    path: PathBuf::from("x.log")
                },
                SinkKind::Console,
            ])
        );
    }

    #[test]
    fn test_compile_does_not_touch_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("never.log");
        let config = Config {
            output_file_path: path.display().to_string(),
            ..Config::console(LogLevel::Info)
        };

        let _sink = compile_sink(&config);
        assert!(!path.exists());
        assert!(!dir.path().join("deep").exists());
    }
}
