use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::utils::format_timestamp;

pub enum LogOutput {
    Stdout,
    Stderr,
}

pub struct Logger {
    pub write_to_std: Option<LogOutput>,
    pub severity: Level,
    pub file: Option<Arc<Mutex<File>>>,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger; the file sink is only opened when `file_path` is given
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_std: Option<LogOutput>,
        enable_colors: bool,
    ) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
                .map(|f| Arc::new(Mutex::new(f)))
        });

        Logger {
            write_to_std,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    fn get_timestamp() -> String {
        format_timestamp(SystemTime::now()).unwrap_or_default()
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }

    fn get_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Initialize logger with environment variables.
    ///
    /// `PANTRY_LOG` (or `RUST_LOG`) picks the level, `PANTRY_LOG_FILE` names an
    /// extra file sink and `NO_COLOR` disables ANSI colors.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("PANTRY_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let file_path = std::env::var("PANTRY_LOG_FILE").ok().map(PathBuf::from);
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger::new(file_path, Some(severity), Some(LogOutput::Stderr), enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }

    fn format_line(&self, record: &Record, timestamp: &str, colored: bool) -> String {
        let level_str = record.level().as_str();
        let args = record.args();
        if colored {
            let color = Self::get_color(record.level());
            let reset = Self::get_reset();
            format!("{color}[{timestamp}] {level_str}{reset} {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();

        if let Some(write_to_std) = &self.write_to_std {
            let line = self.format_line(record, &timestamp, self.enable_colors);
            match write_to_std {
                LogOutput::Stdout => {
                    let _ = std::io::stdout().write_all(line.as_bytes());
                }
                LogOutput::Stderr => {
                    let _ = std::io::stderr().write_all(line.as_bytes());
                }
            }
        }

        // files never get colors
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let line = self.format_line(record, &timestamp, false);
                let _ = file_guard.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_receives_uncolored_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/pantry.log");
        let logger = Logger::new(Some(path.clone()), Some(Level::Info), None, true);

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("page index is stale"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("WARN page index is stale"));
        assert!(!written.contains("filtered out"));
        assert!(!written.contains('\x1b'));
    }
}
