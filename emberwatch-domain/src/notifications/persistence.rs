use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::errors::NotificationError;
use super::persistence_iface::NotificationStateProvider;
use super::types::Notification;
use crate::ports::StateServiceAsync;

/// Filesystem-backed [`NotificationStateProvider`].
///
/// Serializes the whole collection as a single JSON array under one state
/// key, matching the store's full read/replace persistence semantics.
pub struct FilesystemNotificationStateProvider {
    state_service: Arc<dyn StateServiceAsync>,
    state_key: String,
}

impl FilesystemNotificationStateProvider {
    pub fn new(state_service: Arc<dyn StateServiceAsync>, state_key: String) -> Self {
        Self {
            state_service,
            state_key,
        }
    }
}

#[async_trait]
impl NotificationStateProvider for FilesystemNotificationStateProvider {
    async fn load(&self) -> Result<VecDeque<Notification>, NotificationError> {
        debug!(key = %self.state_key, "loading notification state");
        match self.state_service.read_state_file_string(&self.state_key).await {
            Ok(Some(json)) => serde_json::from_str(&json).map_err(|e| {
                error!(key = %self.state_key, error = %e, "failed to deserialize notification state");
                NotificationError::Deserialization(e)
            }),
            Ok(None) => {
                info!(key = %self.state_key, "no persisted notification state; starting empty");
                Ok(VecDeque::new())
            }
            Err(core_error) => {
                error!(key = %self.state_key, error = %core_error, "failed to read notification state");
                Err(NotificationError::state_persistence(
                    "load",
                    "Failed to read notification state",
                    core_error,
                ))
            }
        }
    }

    async fn save(&self, notifications: &VecDeque<Notification>) -> Result<(), NotificationError> {
        debug!(key = %self.state_key, count = notifications.len(), "saving notification state");
        let json = serde_json::to_string(notifications).map_err(NotificationError::Serialization)?;
        self.state_service
            .write_state_file_string(&self.state_key, json)
            .await
            .map_err(|core_error| {
                NotificationError::state_persistence(
                    "save",
                    "Failed to write notification state",
                    core_error,
                )
            })
    }
}
