use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::bus::{EventHandler, NotificationBus, Subscription};
use super::events::{EventKind, NotificationEvent};
use super::persistence_iface::NotificationStateProvider;
use super::types::{Notification, NotificationCandidate, NotificationFilter, NotificationSettings};

// --- NotificationService Trait ---

/// The notification store: owns the bounded, most-recent-first collection
/// and announces changes on the event bus.
///
/// Mutating operations are infallible: persistence failures are logged and
/// swallowed, and the in-memory state remains authoritative. Lookup misses
/// are silent no-ops.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Accepts a candidate: assigns identity, inserts at the front, evicts
    /// beyond capacity, persists, and publishes `Updated` followed by `New`.
    /// Returns the inserted record.
    async fn post(&self, candidate: NotificationCandidate) -> Notification;

    /// Marks the matching record read. No-op if `notification_id` is absent.
    async fn mark_as_read(&self, notification_id: &str);

    /// Marks every record read. No-op if the collection is empty.
    async fn mark_all_as_read(&self);

    /// Deletes the matching record. No-op if `notification_id` is absent.
    async fn remove(&self, notification_id: &str);

    /// Empties the collection.
    async fn clear_all(&self);

    /// Returns a snapshot copy of the collection, most-recent-first.
    async fn notifications(&self) -> Vec<Notification>;

    /// Number of unread records.
    async fn unread_count(&self) -> usize;

    /// Returns the records matching `filter`, in store order.
    async fn filtered(&self, filter: &NotificationFilter) -> Vec<Notification>;

    /// Registers a handler for events on `kind`.
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Subscription;

    /// Deregisters a previously registered handler.
    fn unsubscribe(&self, subscription: Subscription);

    /// Drops every subscriber; part of explicit instance teardown.
    fn dispose(&self);
}

// --- DefaultNotificationService Implementation ---

/// Default [`NotificationService`] backed by an injected state provider.
pub struct DefaultNotificationService {
    notifications: Arc<RwLock<VecDeque<Notification>>>,
    settings: NotificationSettings,
    state_provider: Arc<dyn NotificationStateProvider>,
    bus: NotificationBus,
}

impl DefaultNotificationService {
    /// Creates a service and restores its collection from the state
    /// provider. A load failure is non-fatal: the service starts empty and
    /// logs the failure. A restored collection longer than the configured
    /// capacity is truncated so the capacity invariant holds from
    /// construction onward.
    pub async fn new(
        settings: NotificationSettings,
        state_provider: Arc<dyn NotificationStateProvider>,
    ) -> Self {
        let restored = match state_provider.load().await {
            Ok(mut stored) => {
                if stored.len() > settings.capacity {
                    debug!(
                        persisted = stored.len(),
                        capacity = settings.capacity,
                        "truncating restored notification state to capacity"
                    );
                    stored.truncate(settings.capacity);
                }
                stored
            }
            Err(e) => {
                warn!(error = %e, "failed to restore notification state; starting empty");
                VecDeque::new()
            }
        };

        Self {
            notifications: Arc::new(RwLock::new(restored)),
            settings,
            state_provider,
            bus: NotificationBus::new(),
        }
    }

    /// Persists the current collection; a failure is logged and swallowed,
    /// leaving the in-memory state authoritative for this cycle.
    async fn persist(&self, operation: &str) {
        let snapshot = self.notifications.read().await.clone();
        if let Err(e) = self.state_provider.save(&snapshot).await {
            warn!(error = %e, operation, "failed to persist notification state; continuing in-memory");
        }
    }

    async fn publish_updated(&self) {
        let notifications = self.notifications().await;
        self.bus
            .publish(&NotificationEvent::Updated { notifications });
    }
}

#[async_trait]
impl NotificationService for DefaultNotificationService {
    async fn post(&self, candidate: NotificationCandidate) -> Notification {
        let notification = Notification::from(candidate);
        {
            let mut guard = self.notifications.write().await;
            guard.push_front(notification.clone());
            guard.truncate(self.settings.capacity);
        }

        self.persist("post").await;
        self.publish_updated().await;
        self.bus.publish(&NotificationEvent::New {
            notification: notification.clone(),
        });
        info!(id = %notification.id, severity = ?notification.severity, "notification posted");
        notification
    }

    async fn mark_as_read(&self, notification_id: &str) {
        let found = {
            let mut guard = self.notifications.write().await;
            match guard.iter_mut().find(|n| n.id == notification_id) {
                Some(notification) => {
                    notification.mark_as_read();
                    true
                }
                None => false,
            }
        };

        if found {
            self.persist("mark_as_read").await;
            self.publish_updated().await;
        } else {
            debug!(id = notification_id, "mark_as_read: no such notification");
        }
    }

    async fn mark_all_as_read(&self) {
        {
            let mut guard = self.notifications.write().await;
            if guard.is_empty() {
                return;
            }
            for notification in guard.iter_mut() {
                notification.mark_as_read();
            }
        }

        self.persist("mark_all_as_read").await;
        self.publish_updated().await;
    }

    async fn remove(&self, notification_id: &str) {
        let found = {
            let mut guard = self.notifications.write().await;
            let before = guard.len();
            guard.retain(|n| n.id != notification_id);
            guard.len() != before
        };

        if found {
            self.persist("remove").await;
            self.publish_updated().await;
        } else {
            debug!(id = notification_id, "remove: no such notification");
        }
    }

    async fn clear_all(&self) {
        self.notifications.write().await.clear();
        self.persist("clear_all").await;
        self.publish_updated().await;
    }

    async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.iter().cloned().collect()
    }

    async fn unread_count(&self) -> usize {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    async fn filtered(&self, filter: &NotificationFilter) -> Vec<Notification> {
        filter.apply(&self.notifications().await)
    }

    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        self.bus.subscribe_handler(kind, handler)
    }

    fn unsubscribe(&self, subscription: Subscription) {
        self.bus.unsubscribe(subscription);
    }

    fn dispose(&self) {
        self.bus.clear();
    }
}
