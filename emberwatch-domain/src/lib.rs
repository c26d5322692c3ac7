//! Domain layer for the Emberwatch drone-fleet monitoring platform.
//!
//! This crate implements the platform's notification distribution core:
//! real-time updates (drone telemetry, risk-area assessments, generic
//! alerts) arrive from an external update source, are translated into
//! notification candidates by threshold rules, stored in a bounded
//! most-recent-first collection, persisted, and fanned out to subscribers as
//! change events.
//!
//! ## Components
//!
//! - [`telemetry`]: the typed update contract ([`UpdateEvent`] and payload
//!   structs), the wire envelope, and the [`UpdateDispatcher`] driving
//!   updates through the pipeline in delivery order.
//! - [`rules`]: the pure threshold [`NotificationRuleEngine`] deriving
//!   notification candidates from updates.
//! - [`notifications`]: the [`NotificationService`] owning the bounded
//!   collection, the [`NotificationBus`] fanning out `updated`/`new`
//!   events, the [`NotificationFilter`] query layer, and the persistence
//!   provider.
//! - [`ports`]: the injected key-value state capability the persistence
//!   provider is built on.
//!
//! Consumers hold an explicitly constructed service instance; there is no
//! process-global state, so isolated instances can be created for tests.

pub mod error;
pub mod notifications;
pub mod ports;
pub mod rules;
pub mod telemetry;

// Re-export common types and interfaces
pub use error::{DomainError, DomainResult};
pub use notifications::{
    DefaultNotificationService, EventKind, EventHandler, Notification, NotificationBus,
    NotificationCandidate, NotificationError, NotificationEvent, NotificationFilter,
    NotificationService, NotificationSettings, NotificationSource, NotificationStateProvider,
    FilesystemNotificationStateProvider, Severity, Subscription,
};
pub use ports::{FilesystemStateService, StateServiceAsync};
pub use rules::{NotificationRuleEngine, RuleThresholds};
pub use telemetry::{
    Alert, DispatchError, DroneStatus, DroneTelemetry, RiskAssessment, RiskTrend, UpdateDispatcher,
    UpdateEnvelope, UpdateEvent,
};

use std::sync::Arc;

/// Storage key for the persisted notification collection.
const NOTIFICATION_STATE_KEY: &str = "notifications.json";

/// Initialize the notification core with filesystem-backed persistence.
///
/// Wires the default pipeline: a [`FilesystemStateService`] rooted in the
/// application state directory, the notification state provider, the
/// notification service (restored from persisted state), and an
/// [`UpdateDispatcher`] carrying the rule engine.
///
/// # Errors
///
/// Returns a [`DomainError`] if the application state directory cannot be
/// resolved. Persistence read failures during restore are non-fatal: the
/// service starts empty and logs the failure.
pub async fn initialize(
    settings: NotificationSettings,
    thresholds: RuleThresholds,
) -> DomainResult<(Arc<DefaultNotificationService>, UpdateDispatcher)> {
    let state_service = Arc::new(FilesystemStateService::new()?);
    let state_provider = Arc::new(FilesystemNotificationStateProvider::new(
        state_service,
        NOTIFICATION_STATE_KEY.to_string(),
    ));
    let service = Arc::new(DefaultNotificationService::new(settings, state_provider).await);
    let dispatcher = UpdateDispatcher::new(NotificationRuleEngine::new(thresholds), service.clone());
    Ok((service, dispatcher))
}
