//! Custom logging module.
//!
//! This module provides a logger implementation that captures log entries
//! into a bounded buffer shared with the application state for display in
//! the UI.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Oldest entries are dropped past this many.
///
const MAX_ENTRIES: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Shared, bounded list of formatted log lines.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn push(&self, entry: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == MAX_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns up to `count` of the newest entries, oldest first.
    ///
    pub fn recent(&self, count: usize) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Custom logger that captures logs to the shared buffer
///
pub struct CustomLogger {
    level: LevelFilter,
    buffer: LogBuffer,
}

impl CustomLogger {
    pub fn new(level: LevelFilter, buffer: LogBuffer) -> Self {
        CustomLogger { level, buffer }
    }

    /// Install as the global logger.
    ///
    pub fn init(self) -> Result<(), AppError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Keep dependency chatter out of the pane
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_newest() {
        let buffer = LogBuffer::default();
        for i in 0..MAX_ENTRIES + 10 {
            buffer.push(i.to_string());
        }
        assert_eq!(buffer.len(), MAX_ENTRIES);
        assert_eq!(
            buffer.recent(2),
            vec![
                (MAX_ENTRIES + 8).to_string(),
                (MAX_ENTRIES + 9).to_string()
            ]
        );
    }

    #[test]
    fn recent_with_few_entries() {
        let buffer = LogBuffer::default();
        buffer.push("only".to_string());
        assert_eq!(buffer.recent(5), vec!["only".to_string()]);
    }

    #[test]
    fn logger_filters_by_level_and_target() {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(LevelFilter::Info, buffer.clone());
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("items_tui::api")
                .args(format_args!("kept"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("items_tui::api")
                .args(format_args!("too verbose"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("hyper::proto")
                .args(format_args!("not ours"))
                .build(),
        );
        let entries = buffer.recent(10);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("INFO  kept"));
    }
}
