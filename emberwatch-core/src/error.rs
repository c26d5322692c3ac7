//! Error handling for the Emberwatch core layer.
//!
//! This module defines the error types used throughout the infrastructure
//! crate, built on `thiserror`. The main error type is [`CoreError`], which
//! wraps more specific errors like [`ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Emberwatch infrastructure layer.
///
/// Represents all failures that can occur in the core crate. Domain crates
/// wrap this in their own error types rather than exposing it directly.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur during the initialization of the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// Errors related to filesystem operations, such as creating directories
    /// or reading files. Includes the path involved and the source I/O error.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by other variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while attempting to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error occurred while parsing a configuration file (invalid TOML).
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value failed validation after successful parsing.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (e.g., XDG config/state home) could not be
    /// determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}
