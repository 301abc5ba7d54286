//! Diagnostic logging to stderr.
//!
//! Library diagnostics go through the `log` facade; this logger prints them
//! with a local timestamp. User-facing messages never pass through here.

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};

/// `log` backend that writes one line per record to stderr.
#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Logger for the given verbosity flags: `--verbose` shows debug output,
    /// `--quiet` only errors.
    pub fn for_flags(verbose: bool, quiet: bool) -> Self {
        let level = if verbose {
            LevelFilter::Debug
        } else if quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        };
        Self::new(level)
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}",
                format_line(Local::now(), record.level(), record.target(), record.args())
            );
        }
    }

    fn flush(&self) {}
}

fn format_line(
    timestamp: DateTime<Local>,
    level: Level,
    target: &str,
    message: &std::fmt::Arguments<'_>,
) -> String {
    format!(
        "{} {level:<5} {target}: {message}",
        timestamp.format("%H:%M:%S%.3f")
    )
}
