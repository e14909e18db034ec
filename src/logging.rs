//! Logging infrastructure for tabclean
//!
//! Logs go to the console and to daily-rotating files in the app data
//! directory (or the configured `log_dir`).
//!
//! ## Usage
//!
//! ```no_run
//! use tabclean::logging;
//!
//! // Initialize once at startup
//! logging::init(None).expect("Failed to initialize logging");
//!
//! tracing::info!("Server started");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/tabclean/logs`
/// - macOS: `~/Library/Application Support/tabclean/logs`
/// - Linux: `~/.local/share/tabclean/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("tabclean").join("logs"))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initializes the logging system with console and file output
///
/// Creates two log files:
/// - `tabclean.log`: All log levels
/// - `error.log`: Only errors and warnings
///
/// Both rotate daily, keeping 10 old files.
///
/// # Errors
///
/// Returns error if log directory cannot be created or file appenders fail
pub fn init(log_dir_override: Option<&Path>) -> Result<()> {
    let log_dir = match log_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => get_log_dir()?,
    };
    ensure_dir(&log_dir)?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("tabclean")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    // Default to INFO, allow override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(true)
        .with_file(true)
        .pretty();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);

    Ok(())
}

/// Gets the path to today's (UTC) log file inside `log_dir`
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("tabclean.{today}.log"))
}

/// Gets the path to today's error log file inside `log_dir`
pub fn current_error_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("error.{today}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir() {
        if let Ok(log_dir) = get_log_dir() {
            assert!(log_dir.ends_with("tabclean/logs") || log_dir.ends_with("tabclean\\logs"));
        }
    }

    #[test]
    fn test_current_log_paths() {
        let dir = Path::new("/var/log/tabclean");
        let all = current_log_path(dir);
        let errors = current_error_log_path(dir);
        assert!(all.starts_with(dir));
        assert!(
            all.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("tabclean.") && n.ends_with(".log"))
        );
        assert!(
            errors
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("error."))
        );
    }
}
