//! # Emberwatch Core Library (`emberwatch-core`)
//!
//! `emberwatch-core` is the infrastructure layer of the Emberwatch wildfire
//! operations platform. It provides the foundational services the domain
//! crates build on:
//!
//! - **Error Handling**: a unified error system through the [`CoreError`] enum
//!   and its associated specific error types like [`ConfigError`].
//! - **Configuration Management**: TOML-based configuration loading with
//!   default fallbacks and validation, through [`ConfigLoader`] and
//!   [`CoreConfig`].
//! - **Logging**: a structured logging framework built on the `tracing`
//!   ecosystem, configurable for console and file output in text or JSON
//!   format.
//! - **Utilities**: filesystem helpers (`utils::fs`) and XDG path resolution
//!   (`utils::paths`) used by both configuration and state persistence.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use emberwatch_core::config::ConfigLoader;
//! use emberwatch_core::error::CoreError;
//! use emberwatch_core::logging;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     logging::init_logging(&config.logging, false)?;
//!     tracing::info!("emberwatch core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use config::{ConfigLoader, CoreConfig, LoggingConfig};
pub use error::{ConfigError, CoreError};
pub use logging::{init_logging, init_minimal_logging};
