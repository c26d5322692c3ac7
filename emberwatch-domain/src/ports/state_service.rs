//! Injected key-value state persistence capability.
//!
//! Domain services that persist runtime state (notification history) do so
//! through [`StateServiceAsync`] rather than touching the filesystem
//! directly, so the core stays testable with an in-memory fake. The
//! implementation resolves keys to files; a missing key reads as `None`,
//! never as an error.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use emberwatch_core::utils::fs::ensure_dir_exists;
use emberwatch_core::utils::paths::get_app_state_dir;
use emberwatch_core::CoreError;

/// Trait for a service that can read and write state strings by key.
///
/// Keys are simple file names (e.g., `notifications.json`); the
/// implementation resolves them to full paths.
#[async_trait]
pub trait StateServiceAsync: Send + Sync {
    /// Reads the state entry identified by `key`.
    ///
    /// Returns `Ok(None)` when no entry exists for the key.
    async fn read_state_file_string(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Writes `content` to the state entry identified by `key`, replacing
    /// any previous content.
    async fn write_state_file_string(&self, key: &str, content: String) -> Result<(), CoreError>;
}

/// Filesystem-backed [`StateServiceAsync`] rooted in a base directory.
pub struct FilesystemStateService {
    base_dir: PathBuf,
}

impl FilesystemStateService {
    /// Creates a state service rooted in the application state directory.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] if the state directory cannot be resolved.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            base_dir: get_app_state_dir()?,
        })
    }

    /// Creates a state service rooted in an explicit directory. Primarily
    /// for tests and embedded deployments with custom layouts.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

#[async_trait]
impl StateServiceAsync for FilesystemStateService {
    async fn read_state_file_string(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.resolve(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key, "state entry not found");
                Ok(None)
            }
            Err(e) => Err(CoreError::Filesystem {
                message: "Failed to read state file".to_string(),
                path,
                source: e,
            }),
        }
    }

    async fn write_state_file_string(&self, key: &str, content: String) -> Result<(), CoreError> {
        ensure_dir_exists(&self.base_dir)?;
        let path = self.resolve(key);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| CoreError::Filesystem {
                message: "Failed to write state file".to_string(),
                path,
                source: e,
            })
    }
}
