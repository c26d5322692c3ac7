use thiserror::Error;

use emberwatch_core::CoreError;

/// Errors raised by the notification persistence layer.
///
/// Store mutations themselves are infallible: persistence failures are
/// logged and swallowed by the service, which keeps operating on its
/// in-memory state. These errors surface only to callers using a
/// [`NotificationStateProvider`](super::persistence_iface::NotificationStateProvider)
/// directly.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The underlying state capability failed during a load or save.
    #[error("Notification state persistence error during operation '{operation}': {message}")]
    StatePersistence {
        operation: String,
        message: String,
        #[source]
        source: CoreError,
    },

    /// The persisted collection could not be serialized.
    #[error("Failed to serialize notification state: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The persisted collection could not be deserialized.
    #[error("Failed to deserialize notification state: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl NotificationError {
    pub(crate) fn state_persistence(
        operation: &str,
        message: &str,
        source: CoreError,
    ) -> Self {
        NotificationError::StatePersistence {
            operation: operation.to_string(),
            message: message.to_string(),
            source,
        }
    }
}
