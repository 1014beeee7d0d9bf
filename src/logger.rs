//! Stderr logger for the `log` facade.

use std::fmt::{self, Display};
use std::env;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::ShellError;

/// Environment variable holding the maximum log level.
pub const LOG_ENV: &str = "TERMEMU_LOG";

pub struct SimpleLogger;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let args = record.args();
        let color_reset = "\u{1B}[0m";

        let color = match level {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        };

        eprintln!("[{level} {file}:{line}] {color}{args}{color_reset}");
    }

    fn flush(&self) {}
}

pub fn level_from (value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Installs the logger with the level named by `TERMEMU_LOG`.
pub fn init () -> Result<(), ShellError> {
    log::set_logger(&SimpleLogger).map_err(|_| ShellError::LoggerInit)?;
    log::set_max_level(level_from(env::var(LOG_ENV).ok().as_deref()));
    Ok(())
}
