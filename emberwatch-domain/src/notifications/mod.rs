//! Notification core: types, event bus, bounded store, and persistence.

pub mod bus;
pub mod errors;
pub mod events;
pub mod persistence;
pub mod persistence_iface;
pub mod service;
pub mod types;

pub use bus::{EventHandler, NotificationBus, Subscription};
pub use errors::NotificationError;
pub use events::{EventKind, NotificationEvent};
pub use persistence::FilesystemNotificationStateProvider;
pub use persistence_iface::NotificationStateProvider;
pub use service::{DefaultNotificationService, NotificationService};
pub use types::{
    Notification, NotificationCandidate, NotificationFilter, NotificationSettings,
    NotificationSource, Severity,
};
