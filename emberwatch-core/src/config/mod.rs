//! Configuration Management for Emberwatch Core.
//!
//! This module defines how configuration is structured, loaded, validated,
//! and accessed.
//!
//! - [`types`]: the configuration struct definitions ([`CoreConfig`],
//!   [`LoggingConfig`]) defining the schema of the configuration file.
//! - [`defaults`]: functions returning default values for settings, used
//!   when a configuration file is missing or incomplete.
//! - [`loader`]: the [`ConfigLoader`] that locates `config.toml` in the
//!   application config directory, parses it, and validates the result.
//!
//! ## Loading process
//!
//! 1. `ConfigLoader::load()` resolves the application config directory and
//!    attempts to read `config.toml`.
//! 2. A missing (or empty) file yields the default configuration; a present
//!    file is parsed as TOML.
//! 3. The configuration is validated and normalized (log level/format are
//!    lowercased, relative log file paths are resolved against the
//!    application state directory).

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig};
