//! Configuration Loading for Emberwatch Core.
//!
//! Provides the [`ConfigLoader`], responsible for loading, parsing, and
//! validating the [`CoreConfig`]. `ConfigLoader::load()` reads `config.toml`
//! from the application configuration directory (resolved through
//! [`crate::utils::paths`]); a missing file yields the default
//! configuration.
//!
//! After loading, the configuration undergoes validation:
//! - log level and format are normalized to lowercase and checked against
//!   the accepted sets;
//! - a relative log file path is resolved against the application state
//!   directory, and its parent directory is created if necessary.

use std::fs;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as core_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

/// Namespace struct for configuration loading logic.
///
/// The main entry point is [`ConfigLoader::load`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the [`CoreConfig`] for the application.
    ///
    /// Reads `config.toml` from the application configuration directory. A
    /// missing or empty file yields [`CoreConfig::default`]; other read
    /// errors and TOML parse errors are returned as [`ConfigError`]s wrapped
    /// in [`CoreError::Config`].
    pub fn load() -> Result<CoreConfig, CoreError> {
        let config_dir = get_app_config_dir()?;
        let config_path = config_dir.join("config.toml");

        let mut config: CoreConfig = match fs::read_to_string(&config_path) {
            Ok(content) if content.trim().is_empty() => CoreConfig::default(),
            Ok(content) => {
                toml::from_str(&content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CoreConfig::default(),
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: config_path,
                    source: e,
                }));
            }
        };

        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Validates the loaded `CoreConfig` and performs normalization.
    ///
    /// - Log level must be one of trace/debug/info/warn/error (normalized to
    ///   lowercase).
    /// - Log format must be text or json (normalized to lowercase).
    /// - A relative `file_path` is made absolute against the application
    ///   state directory; parent directories are created as needed.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if let Some(path) = &config.logging.file_path {
            let absolute_path = if path.is_absolute() {
                path.clone()
            } else {
                get_app_state_dir()?.join(path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    core_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        Ok(())
    }
}
