//! Event bus for notification change events.
//!
//! [`NotificationBus`] decouples the notification store from its consumers
//! via the named event channels in [`EventKind`]. The store owns a bus by
//! composition and forwards its `subscribe`/`unsubscribe` surface; nothing
//! inherits an open-ended emitter interface.
//!
//! Delivery contract:
//! - any number of subscribers may register per channel;
//! - a published event is delivered synchronously, in subscriber
//!   registration order, to every subscriber registered at publish time;
//! - a subscriber may unsubscribe at any time, including from within its own
//!   handler, without affecting delivery to the other subscribers of the
//!   same publish cycle;
//! - publishing with zero subscribers is a no-op;
//! - delivery completes before `publish` returns.

use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::events::{EventKind, NotificationEvent};

/// Callback invoked with each event published on a subscribed channel.
pub type EventHandler = Arc<dyn Fn(&NotificationEvent) + Send + Sync>;

/// Token identifying a registered subscriber; pass it back to
/// [`NotificationBus::unsubscribe`] to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(Uuid);

struct SubscriberEntry {
    token: Subscription,
    kind: EventKind,
    handler: EventHandler,
}

/// In-process publish/subscribe channel for [`NotificationEvent`]s.
#[derive(Clone, Default)]
pub struct NotificationBus {
    // Registration order is delivery order.
    subscribers: Arc<Mutex<Vec<SubscriberEntry>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events on `kind` and returns its
    /// subscription token.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&NotificationEvent) + Send + Sync + 'static,
    {
        self.subscribe_handler(kind, Arc::new(handler))
    }

    /// Registers an already-shared handler. Object-safe variant used by the
    /// service trait.
    pub fn subscribe_handler(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        let token = Subscription(Uuid::new_v4());
        self.lock().push(SubscriberEntry {
            token,
            kind,
            handler,
        });
        token
    }

    /// Deregisters a subscriber. Returns `false` if the token was not (or no
    /// longer) registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|entry| entry.token != subscription);
        subscribers.len() != before
    }

    /// Delivers `event` to every subscriber of its channel, in registration
    /// order. The subscriber set is snapshotted at publish time, so handlers
    /// may (un)subscribe freely without affecting the current cycle.
    pub fn publish(&self, event: &NotificationEvent) {
        let kind = event.kind();
        let cycle: Vec<EventHandler> = self
            .lock()
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| Arc::clone(&entry.handler))
            .collect();
        for handler in cycle {
            handler(event);
        }
    }

    /// Drops every subscriber on every channel.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of subscribers currently registered for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|entry| entry.kind == kind).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SubscriberEntry>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::{Notification, NotificationCandidate, Severity};
    use std::sync::Mutex as StdMutex;

    fn sample_event() -> NotificationEvent {
        NotificationEvent::New {
            notification: Notification::from(NotificationCandidate {
                severity: Severity::Info,
                title: "t".to_string(),
                message: "m".to_string(),
                drone_id: None,
                action_required: None,
                source: None,
            }),
        }
    }

    #[test]
    fn publish_with_zero_subscribers_is_a_noop() {
        let bus = NotificationBus::new();
        bus.publish(&sample_event());
    }

    #[test]
    fn delivery_follows_registration_order() {
        let bus = NotificationBus::new();
        let order = Arc::new(StdMutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(EventKind::New, move |_| order.lock().unwrap().push(label));
        }

        bus.publish(&sample_event());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn events_only_reach_their_own_channel() {
        let bus = NotificationBus::new();
        let new_count = Arc::new(StdMutex::new(0usize));
        let updated_count = Arc::new(StdMutex::new(0usize));

        {
            let new_count = Arc::clone(&new_count);
            bus.subscribe(EventKind::New, move |_| *new_count.lock().unwrap() += 1);
        }
        {
            let updated_count = Arc::clone(&updated_count);
            bus.subscribe(EventKind::Updated, move |_| {
                *updated_count.lock().unwrap() += 1
            });
        }

        bus.publish(&sample_event());
        assert_eq!(*new_count.lock().unwrap(), 1);
        assert_eq!(*updated_count.lock().unwrap(), 0);
    }

    #[test]
    fn unsubscribe_stops_future_delivery() {
        let bus = NotificationBus::new();
        let count = Arc::new(StdMutex::new(0usize));

        let token = {
            let count = Arc::clone(&count);
            bus.subscribe(EventKind::New, move |_| *count.lock().unwrap() += 1)
        };

        bus.publish(&sample_event());
        assert!(bus.unsubscribe(token));
        bus.publish(&sample_event());

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!bus.unsubscribe(token));
    }

    #[test]
    fn unsubscribing_inside_a_handler_does_not_affect_the_current_cycle() {
        let bus = NotificationBus::new();
        let order = Arc::new(StdMutex::new(Vec::new()));

        let self_removing_token = Arc::new(StdMutex::new(None::<Subscription>));
        {
            let bus_handle = bus.clone();
            let order = Arc::clone(&order);
            let token_cell = Arc::clone(&self_removing_token);
            let token = bus.subscribe(EventKind::New, move |_| {
                order.lock().unwrap().push("self-removing");
                if let Some(token) = *token_cell.lock().unwrap() {
                    bus_handle.unsubscribe(token);
                }
            });
            *self_removing_token.lock().unwrap() = Some(token);
        }
        {
            let order = Arc::clone(&order);
            bus.subscribe(EventKind::New, move |_| order.lock().unwrap().push("later"));
        }

        bus.publish(&sample_event());
        // The later subscriber still ran in the same cycle.
        assert_eq!(*order.lock().unwrap(), vec!["self-removing", "later"]);

        bus.publish(&sample_event());
        // Only the remaining subscriber runs afterwards.
        assert_eq!(
            *order.lock().unwrap(),
            vec!["self-removing", "later", "later"]
        );
    }

    #[test]
    fn clear_drops_every_subscriber() {
        let bus = NotificationBus::new();
        bus.subscribe(EventKind::New, |_| {});
        bus.subscribe(EventKind::Updated, |_| {});
        assert_eq!(bus.subscriber_count(EventKind::New), 1);

        bus.clear();
        assert_eq!(bus.subscriber_count(EventKind::New), 0);
        assert_eq!(bus.subscriber_count(EventKind::Updated), 0);
    }
}
