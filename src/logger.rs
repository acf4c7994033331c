//! Custom logging module.
//!
//! This module provides a logger implementation that timestamps entries,
//! writes them to standard error, keeping standard output free for command
//! results, and optionally forwards them to a registered callback.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!(
        "{} {} {}: {}",
        timestamp,
        level_str,
        record.target(),
        record.args()
    )
}

/// Logger that writes formatted entries at or above its level to stderr.
///
pub struct CatalogLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CatalogLogger {
    pub fn new(level: LevelFilter) -> Self {
        CatalogLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward every enabled entry, formatted, to the callback as well.
    ///
    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CatalogLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let formatted = format_log(record);
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(formatted.clone());
                }
            }
            // Logging never fails the caller
            let _ = writeln!(std::io::stderr(), "{}", formatted);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger as the global `log` backend and return it so a
/// callback can be registered later.
///
pub fn init(level: LevelFilter) -> Result<&'static CatalogLogger, AppError> {
    let logger: &'static CatalogLogger = Box::leak(Box::new(CatalogLogger::new(level)));
    log::set_logger(logger).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(logger)
}
