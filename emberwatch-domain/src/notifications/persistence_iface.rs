use async_trait::async_trait;
use std::collections::VecDeque;

use super::errors::NotificationError;
use super::types::Notification;

/// Persistence capability for the notification collection.
///
/// The full collection is read and replaced as a unit; there is no
/// incremental persistence.
#[async_trait]
pub trait NotificationStateProvider: Send + Sync {
    /// Loads the persisted collection. A missing store reads as an empty
    /// collection, not an error.
    async fn load(&self) -> Result<VecDeque<Notification>, NotificationError>;

    /// Replaces the persisted collection with `notifications`.
    async fn save(&self, notifications: &VecDeque<Notification>) -> Result<(), NotificationError>;
}
