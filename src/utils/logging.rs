//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! `$XDG_STATE_HOME/raptic/raptic.log`. The terminal is owned by dialog and
//! the sessions, so nothing is logged to stdout or stderr. Logs are rotated
//! on startup keeping 5 historical files.

use crate::constants::LOG_DIR_NAME;
use crate::error::{RapticError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (raptic.log.1 through raptic.log.5)
const MAX_LOG_FILES: u8 = 5;

/// Base name of the log file
const LOG_FILE_NAME: &str = "raptic.log";

/// Directory holding the log files
pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_DIR_NAME)
}

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
/// Rotates existing logs on startup to maintain a history of the last sessions.
pub fn init_logging() -> Result<PathBuf> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    rotate_logs_on_startup(&log_path)?;

    // Rotation is handled above, once per start
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("raptic")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| RapticError::IoError(std::io::Error::other(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| RapticError::IoError(std::io::Error::other(e)))?;

    tracing::info!("RAPTIC v{} started", env!("CARGO_PKG_VERSION"));

    Ok(log_path)
}

/// Rotate log files on application startup
///
/// - raptic.log.5 is deleted (oldest log)
/// - raptic.log.4 -> raptic.log.5, ..., raptic.log.1 -> raptic.log.2
/// - raptic.log -> raptic.log.1
/// - A fresh raptic.log will be created by the logger
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let invalid = || {
        RapticError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid log path {}", log_path.display()),
        ))
    };
    let log_dir = log_path.parent().ok_or_else(invalid)?;
    let log_name = log_path.file_name().ok_or_else(invalid)?.to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}
