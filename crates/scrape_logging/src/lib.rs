#![deny(missing_docs)]
//! Shared logging utilities for the scraper workspace.
//!
//! This crate provides the `scrape_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger and a thread-local
//! capture facility so tests can assert on what was logged.

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scrape_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// A log record captured on the current thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Severity of the record.
    pub level: Level,
    /// Module path or explicit target of the record.
    pub target: String,
    /// Fully formatted message.
    pub message: String,
}

thread_local! {
    /// Active capture buffer for the current thread, if any.
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = const { RefCell::new(None) };
}

/// Collects every record logged on the current thread until [`LogCapture::finish`].
///
/// Requires the global logger to have been installed with
/// [`initialize_for_tests`]; records are not captured otherwise.
#[must_use = "records are only collected while the capture is alive"]
pub struct LogCapture {
    _private: (),
}

impl LogCapture {
    /// Starts capturing on the current thread, discarding any earlier capture.
    pub fn start() -> Self {
        CAPTURED.with(|slot| *slot.borrow_mut() = Some(Vec::new()));
        Self { _private: () }
    }

    /// Stops capturing and returns everything recorded since [`LogCapture::start`].
    pub fn finish(self) -> Vec<CapturedRecord> {
        CAPTURED.with(|slot| slot.borrow_mut().take().unwrap_or_default())
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        CAPTURED.with(|slot| slot.borrow_mut().take());
    }
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|slot| {
            if let Some(records) = slot.borrow_mut().as_mut() {
                records.push(CapturedRecord {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

impl SharedLogger for CaptureLogger {
    fn level(&self) -> LevelFilter {
        LevelFilter::Trace
    }

    fn config(&self) -> Option<&Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

/// Initializes a simple terminal logger for use in tests, together with the
/// thread-local capture used by [`LogCapture`].
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        Box::new(CaptureLogger),
    ];
    let _ = CombinedLogger::init(loggers);
}
