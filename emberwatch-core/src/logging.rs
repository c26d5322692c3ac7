//! Structured Logging for Emberwatch Core.
//!
//! A configurable logging framework built on the `tracing` ecosystem. It
//! supports console output and optional file logging (text or JSON format,
//! daily rotation via `tracing-appender`).

use crate::config::LoggingConfig;
use crate::error::CoreError;
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Holds the worker guard of the file logger for the lifetime of the
/// process so buffered log lines are flushed on shutdown.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests, early application startup before the configuration is
/// loaded, or as a fallback if full logging initialization fails. Filters via
/// the `RUST_LOG` environment variable, defaulting to "info". Errors (e.g., a
/// global logger already being set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Creates a file logging layer with daily rotation.
///
/// Ensures the parent directory for the log file exists and configures the
/// requested format ("text" or "json"; anything else falls back to text).
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("emberwatch.log")),
    );
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        match format.to_lowercase().as_str() {
            "json" => Box::new(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_writer)
                    .with_ansi(false),
            ),
            _ => Box::new(fmt::layer().with_writer(non_blocking_writer).with_ansi(false)),
        };
    Ok((layer, guard))
}

/// Initializes the global logging system based on the provided
/// [`LoggingConfig`].
///
/// Sets up a console layer and, when `file_path` is configured, a rolling
/// file layer, filtered by the configured level.
///
/// # Arguments
///
/// * `config`: the logging configuration (level, optional file path,
///   format).
/// * `is_reload`: if `true`, an already-initialized global subscriber is
///   tolerated (the call becomes a no-op); if `false`, it is an error.
///
/// # Errors
///
/// Returns [`CoreError::LoggingInitialization`] if the configured level is
/// invalid or setting the global subscriber fails on initial setup.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            return Err(CoreError::LoggingInitialization(format!(
                "Invalid log level in configuration: '{}'",
                other
            )));
        }
    };
    let filter = EnvFilter::new(level.to_string());

    let console_layer: Box<dyn Layer<Registry> + Send + Sync + 'static> = Box::new(
        fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout)),
    );

    let mut layers = vec![console_layer];
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        layers.push(file_layer);
        *LOG_WORKER_GUARD
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(guard);
    }

    let init_result = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init();

    match init_result {
        Ok(()) => Ok(()),
        Err(_) if is_reload => {
            tracing::debug!("Logging already initialized; reload request ignored");
            Ok(())
        }
        Err(e) => Err(CoreError::LoggingInitialization(format!(
            "Failed to set global tracing subscriber: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use tempfile::tempdir;

    #[test]
    fn init_logging_rejects_invalid_level() {
        let config = LoggingConfig {
            level: "superlog".to_string(),
            file_path: None,
            format: "text".to_string(),
        };
        let result = init_logging(&config, false);
        match result.err().expect("expected an initialization error") {
            CoreError::LoggingInitialization(msg) => {
                assert!(msg.contains("Invalid log level"));
            }
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn create_file_layer_creates_parent_directory() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("logs/emberwatch.log");

        let result = create_file_layer(&log_path, "text");
        assert!(result.is_ok(), "create_file_layer failed: {:?}", result.err());
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn repeated_initialization_is_tolerated_on_reload() {
        let config = LoggingConfig::default();
        // First call may or may not win the global slot depending on test
        // order; the reload path must succeed either way.
        let _ = init_logging(&config, false);
        let result = init_logging(&config, true);
        assert!(result.is_ok());
    }
}
