use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::types::{UpdateEnvelope, UpdateEvent};
use crate::notifications::service::NotificationService;
use crate::rules::NotificationRuleEngine;

/// Routes incoming updates through the rule engine into the notification
/// service.
///
/// Updates are handled strictly in delivery order and independently of each
/// other: a failure while decoding or processing one update is logged and
/// never interrupts processing of subsequent updates.
pub struct UpdateDispatcher {
    engine: NotificationRuleEngine,
    service: Arc<dyn NotificationService>,
}

impl UpdateDispatcher {
    pub fn new(engine: NotificationRuleEngine, service: Arc<dyn NotificationService>) -> Self {
        Self { engine, service }
    }

    /// Evaluates one typed update and posts every derived candidate.
    pub async fn dispatch(&self, update: UpdateEvent) {
        for candidate in self.engine.evaluate(&update) {
            let notification = self.service.post(candidate).await;
            debug!(id = %notification.id, "notification derived from update");
        }
    }

    /// Decodes a raw wire message and dispatches it. Undecodable messages
    /// (unknown type, malformed payload, invalid envelope) are logged at
    /// `warn` and discarded.
    pub async fn dispatch_raw(&self, payload: &str) {
        match UpdateEnvelope::from_json(payload).and_then(UpdateEnvelope::decode) {
            Ok(update) => self.dispatch(update).await,
            Err(e) => warn!(error = %e, "discarding update"),
        }
    }

    /// Drains `updates` until the channel closes, dispatching each update in
    /// delivery order.
    pub async fn run(&self, mut updates: mpsc::Receiver<UpdateEvent>) {
        while let Some(update) = updates.recv().await {
            self.dispatch(update).await;
        }
        debug!("update channel closed; dispatcher loop exiting");
    }
}
