use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Severity classification of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Emergency,
    Warning,
    Info,
    Success,
}

/// Subsystem a notification originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSource {
    Drone,
    System,
    Risk,
}

/// A notification candidate prior to identity assignment.
///
/// Produced by the rule engine; the store assigns `id`, `timestamp`, and the
/// initial `read` flag when it accepts the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCandidate {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NotificationSource>,
}

/// A user-facing notification record.
///
/// `id` and `timestamp` are assigned at creation and never change; `read`
/// only ever transitions `false -> true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NotificationSource>,
}

impl Notification {
    pub fn new(candidate: NotificationCandidate, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            severity: candidate.severity,
            title: candidate.title,
            message: candidate.message,
            timestamp,
            read: false,
            drone_id: candidate.drone_id,
            action_required: candidate.action_required,
            source: candidate.source,
        }
    }

    pub fn mark_as_read(&mut self) {
        self.read = true;
    }
}

impl From<NotificationCandidate> for Notification {
    fn from(candidate: NotificationCandidate) -> Self {
        Notification::new(candidate, generate_notification_id(), Utc::now())
    }
}

/// Generates a notification id unique for the process lifetime: the current
/// timestamp in milliseconds plus a 9-character random alphanumeric suffix.
pub fn generate_notification_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!(
        "notification-{}-{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

/// Criteria for selecting notifications from a snapshot.
///
/// All supplied criteria must match (AND semantics); an omitted criterion
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub severity: Option<Severity>,
    pub read: Option<bool>,
    pub source: Option<NotificationSource>,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        if let Some(severity) = self.severity {
            if notification.severity != severity {
                return false;
            }
        }
        if let Some(read) = self.read {
            if notification.read != read {
                return false;
            }
        }
        if let Some(source) = self.source {
            if notification.source != Some(source) {
                return false;
            }
        }
        true
    }

    /// Returns the matching records in the snapshot's existing order. The
    /// snapshot itself is never mutated.
    pub fn apply(&self, snapshot: &[Notification]) -> Vec<Notification> {
        snapshot.iter().filter(|n| self.matches(n)).cloned().collect()
    }
}

/// Settings for the notification store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSettings {
    /// Maximum number of notifications kept in the store; insertion beyond
    /// this evicts the oldest record.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    50
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}
