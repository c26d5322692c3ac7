use serde::{Deserialize, Serialize};

use super::types::Notification;

/// The event channels the notification core publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The full notification list changed.
    Updated,
    /// A single new notification was inserted.
    New,
}

/// Change events delivered to subscribers.
///
/// Payloads are copies of the store's state at publish time; subscribers
/// cannot mutate the store through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// The full current notification list, most-recent-first.
    Updated { notifications: Vec<Notification> },
    /// The single newly inserted notification.
    New { notification: Notification },
}

impl NotificationEvent {
    /// The channel this event is delivered on.
    pub fn kind(&self) -> EventKind {
        match self {
            NotificationEvent::Updated { .. } => EventKind::Updated,
            NotificationEvent::New { .. } => EventKind::New,
        }
    }
}
