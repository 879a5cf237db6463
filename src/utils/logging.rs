//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `<log dir>/junkyard.log`.
//! Each start shifts the previous session logs one slot up (`junkyard.log.1`,
//! `.2`, ...) and drops the oldest beyond the configured history.

use crate::config::LoggingConfig;
use crate::error::{JunkyardError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PREFIX: &str = "junkyard";
const LOG_SUFFIX: &str = "log";

/// Initialize the logging system
///
/// The filter comes from `RUST_LOG` when set, else from `config.level`.
pub fn init_logging(log_dir: &Path, config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}"));
    rotate_logs_on_startup(&log_path, config.max_log_files)?;

    // Rotation happens per session above, never by time
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(log_dir)
        .map_err(|e| JunkyardError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| JunkyardError::ConfigError(Box::new(e)))?;

    tracing::info!("Junkyard v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `<log>` to `<log>.1`, `<log>.1` to `<log>.2` and so on, deleting
/// `<log>.<max_files>` first. Does nothing when `<log>` does not exist.
fn rotate_logs_on_startup(log_path: &Path, max_files: u8) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| JunkyardError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| JunkyardError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    if max_files == 0 {
        std::fs::remove_file(log_path)?;
        return Ok(());
    }

    let oldest = log_dir.join(format!("{log_name}.{max_files}"));
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for i in (1..max_files).rev() {
        let current = log_dir.join(format!("{log_name}.{i}"));
        if current.exists() {
            std::fs::rename(&current, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;
    Ok(())
}
