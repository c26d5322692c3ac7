//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Utility functions for resolving standard directory paths according to the
//! XDG Base Directory Specification and for constructing paths specific to
//! the Emberwatch application. Relies on the `directories-next` crate.
//!
//! All functions return `Result<PathBuf, CoreError>`, yielding
//! [`CoreError::Config`] with [`ConfigError::DirectoryUnavailable`] if a
//! required directory cannot be determined (e.g., when the HOME directory is
//! not set).

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Emberwatch";
const APPLICATION: &str = "Emberwatch";

/// Returns the primary base directory for user-specific configuration files.
///
/// Typically `$XDG_CONFIG_HOME` on Linux (e.g., `~/.config`).
pub fn get_config_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "Config Base".to_string(),
            })
        })
}

/// Returns the primary base directory for user-specific data files.
///
/// Typically `$XDG_DATA_HOME` on Linux (e.g., `~/.local/share`).
pub fn get_data_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "Data Base".to_string(),
            })
        })
}

/// Returns the primary base directory for user-specific state files.
///
/// Typically `$XDG_STATE_HOME` on Linux (e.g., `~/.local/state`), falling
/// back to `$HOME/.local/state` when unset. `directories-next` has no
/// generic `state_dir()` on `BaseDirs`, so non-Linux platforms fall back to
/// the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Returns the application-specific configuration directory.
///
/// Derived via `ProjectDirs`; on Linux this typically resolves to
/// `~/.config/Emberwatch`.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}

/// Returns the application-specific data directory.
///
/// Derived via `ProjectDirs`; on Linux this typically resolves to
/// `~/.local/share/Emberwatch`.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Data".to_string(),
            })
        })
}

/// Returns the application-specific state directory.
///
/// Constructed by appending `ORGANIZATION/APPLICATION` to the base state
/// directory; on Linux this typically resolves to
/// `~/.local/state/Emberwatch/Emberwatch`. This is where persisted runtime
/// state (notification history, log files) lives.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base| base.join(ORGANIZATION).join(APPLICATION))
}
