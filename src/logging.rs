//! Logging backend for the `log` facade
//!
//! The interactive view owns the terminal, so log lines go to a file when one
//! is configured and to stderr otherwise. Each line reads
//! `[millis] [LEVEL] [target] message`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

enum Sink {
    File(File),
    Stderr,
}

/// Main logger struct
pub struct LookupLogger {
    sink: Mutex<Sink>,
    min_level: LevelFilter,
}

impl LookupLogger {
    fn new(sink: Sink, min_level: LevelFilter) -> Self {
        Self {
            sink: Mutex::new(sink),
            min_level,
        }
    }

    /// Default log file location: next to the executable
    pub fn default_log_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("anslookup.log")
    }
}

/// Render one log line
pub fn format_line(timestamp_ms: u128, level: Level, target: &str, message: &str) -> String {
    format!(
        "[{:013}] [{:5}] [{}] {}\n",
        timestamp_ms, level, target, message
    )
}

impl Log for LookupLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = format_line(
            timestamp,
            record.level(),
            record.target(),
            &record.args().to_string(),
        );

        match &mut *self.sink.lock() {
            Sink::File(file) => {
                let _ = file.write_all(entry.as_bytes());
                let _ = file.flush();
            }
            Sink::Stderr => {
                let _ = io::stderr().write_all(entry.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &mut *self.sink.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the global logger.
///
/// With a path, the file is truncated and every line goes there. Without one,
/// lines go to stderr. Calling this twice keeps the first logger.
pub fn init(log_file: Option<&Path>, level: LevelFilter) -> io::Result<()> {
    let sink = match log_file {
        Some(path) => Sink::File(
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Start fresh each run
                .open(path)?,
        ),
        None => Sink::Stderr,
    };

    if log::set_boxed_logger(Box::new(LookupLogger::new(sink, level))).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}
