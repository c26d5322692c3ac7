//! Default configuration values for Emberwatch Core.
//!
//! These functions are used by `serde`'s `default` attribute in the
//! configuration structures to provide sensible default values when they are
//! not specified in the configuration file.

use crate::config::LoggingConfig;
use std::path::PathBuf;

/// Returns the default `LoggingConfig`.
///
/// Used by `CoreConfig` if the `logging` section is missing from
/// `config.toml`.
pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

/// Returns the default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log file path (`None`): no log file by default.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Returns the default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}
