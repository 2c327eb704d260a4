//! Logging initialization for the docscrape binary.
//!
//! Logs go to the terminal and to `parser.log` in the configured log
//! directory. The file is appended to and rotated once it grows past
//! [`MAX_LOG_BYTES`], keeping [`LOG_BACKUPS`] old generations.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "parser.log";
const MAX_LOG_BYTES: u64 = 1_000_000;
const LOG_BACKUPS: usize = 5;

/// Initialize terminal and file logging at `level`.
///
/// A log file that cannot be opened is reported on stderr and skipped; the
/// terminal logger is always installed.
pub fn initialize(log_dir: &Path, level: LevelFilter) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(file_logger) = create_file_logger(log_dir, level, config) {
        loggers.push(file_logger);
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    log_dir: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    let log_path = log_dir.join(LOG_FILENAME);
    let opened = fs::create_dir_all(log_dir).and_then(|()| {
        rotate_if_needed(&log_path)?;
        OpenOptions::new().create(true).append(true).open(&log_path)
    });
    match opened {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not open log file at {:?}: {}", log_path, err);
            None
        }
    }
}

/// `parser.log` -> `parser.log.1` -> ... -> `parser.log.N`, dropping the oldest.
fn rotate_if_needed(log_path: &Path) -> std::io::Result<()> {
    match fs::metadata(log_path) {
        Ok(meta) if meta.len() >= MAX_LOG_BYTES => {}
        _ => return Ok(()),
    }
    for generation in (1..LOG_BACKUPS).rev() {
        let from = backup_path(log_path, generation);
        if from.exists() {
            fs::rename(&from, backup_path(log_path, generation + 1))?;
        }
    }
    fs::rename(log_path, backup_path(log_path, 1))
}

fn backup_path(log_path: &Path, generation: usize) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(format!(".{generation}"));
    PathBuf::from(name)
}
