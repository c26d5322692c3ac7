//! Configuration Data Structures for Emberwatch Core.
//!
//! The structs here are populated by deserializing the TOML configuration
//! file. They use `serde` defaults (from [`super::defaults`]) for absent
//! fields and reject unknown fields via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// Used by `emberwatch_core::logging` to initialize the global logger.
///
/// # Examples
///
/// ```
/// use emberwatch_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/emberwatch.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/emberwatch.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn",
    /// "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a file where logs should be written. If `None`, file
    /// logging is disabled. Relative paths are resolved against the
    /// application's state directory during validation.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// The format for log messages written to a file.
    /// Valid values (case-insensitive): "text", "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Root configuration structure for the Emberwatch core layer.
///
/// Aggregates all core configuration settings; currently this is the logging
/// configuration. Deserialized from `config.toml` with defaults applied for
/// missing sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
        }
    }
}
