//! Per-run log file setup
//!
//! The rename core only emits `tracing` events. This module is the one
//! place that creates the log directory, opens the file and installs the
//! subscriber that writes to it.

use crate::types::RenamerError;
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default level when `RUST_LOG` is not set; every detection and attempt
/// is logged.
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Timestamp format used in log file names
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `<program>_<timestamp>.log`
pub fn log_file_name(program: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}.log", program, at.format(LOG_TIMESTAMP_FORMAT))
}

/// Create `dir` if needed and open (append) this run's log file
///
/// # Errors
/// * `RenamerError::LogDirCreate` - the directory could not be created or
///   the file could not be opened
pub fn open_log_file(
    dir: &Path,
    program: &str,
    at: &DateTime<Local>,
) -> Result<(File, PathBuf), RenamerError> {
    fs::create_dir_all(dir).map_err(|source| RenamerError::LogDirCreate {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(log_file_name(program, at));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| RenamerError::LogDirCreate {
            path: path.clone(),
            source,
        })?;

    Ok((file, path))
}

/// Open the run's log file and install it as the global tracing sink
///
/// Returns the log file path so the console summary can point at it.
///
/// # Errors
/// * `RenamerError::LogDirCreate` - callers should report it and carry on
///   without a log file
/// * `RenamerError::Config` - a global subscriber was already installed
pub fn init_file_logging(dir: &Path, program: &str) -> Result<PathBuf, RenamerError> {
    let (file, path) = open_log_file(dir, program, &Local::now())?;

    tracing_subscriber::registry()
        .with(build_env_filter(DEFAULT_LOG_LEVEL))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|err| {
            RenamerError::Config(format!("failed to install tracing subscriber: {err}"))
        })?;

    Ok(path)
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
