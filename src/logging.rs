use std::io::{self, Write};
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

use crate::constants::LOG_PREVIEW_CHARS;

/// Writes log records to standard error, keeping standard output for tool results
struct ConsoleLogger {
    level: LevelFilter,
    out: Mutex<io::Stderr>,
}

impl ConsoleLogger {
    fn new(level: LevelFilter) -> Self {
        ConsoleLogger {
            level,
            out: Mutex::new(io::stderr()),
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut out) = self.out.lock() {
                let _ = writeln!(
                    out,
                    "[{}] [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Initialize the console logger at the given level
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))
        .map(|()| log::set_max_level(level))
}

/// Shorten a received frame for logging, appending `...` when it was cut
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview("hello"), "hello");
        let exact = "a".repeat(LOG_PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_CHARS + 5);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.trim_end_matches("...").chars().count(), LOG_PREVIEW_CHARS);
    }

    #[test]
    fn test_logger_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        let info = Metadata::builder().level(log::Level::Info).build();
        let warn = Metadata::builder().level(log::Level::Warn).build();
        assert!(!logger.enabled(&info));
        assert!(logger.enabled(&warn));
    }
}
