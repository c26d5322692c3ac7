//! Error module for the Emberwatch domain layer.

use thiserror::Error;

use crate::notifications::NotificationError;
use crate::telemetry::DispatchError;
use emberwatch_core::CoreError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Core infrastructure error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Notification store/persistence error.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Update decode/dispatch error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Other error.
    #[error("Domain error: {0}")]
    Other(String),
}
