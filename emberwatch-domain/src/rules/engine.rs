use tracing::debug;

use super::types::RuleThresholds;
use crate::notifications::types::{NotificationCandidate, NotificationSource, Severity};
use crate::telemetry::types::{Alert, DroneTelemetry, RiskAssessment, UpdateEvent};

/// Pure, stateless translation of domain updates into notification
/// candidates.
///
/// Each call is idempotent for identical input and never mutates it.
/// Repeated qualifying updates produce repeated candidates: every update is
/// a distinct real-world event, and deduplication is deliberately not
/// applied here.
#[derive(Debug, Clone, Default)]
pub struct NotificationRuleEngine {
    thresholds: RuleThresholds,
}

impl NotificationRuleEngine {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluates one update, yielding zero or more candidates. Updates that
    /// cross no threshold yield an empty result, not an error.
    pub fn evaluate(&self, update: &UpdateEvent) -> Vec<NotificationCandidate> {
        match update {
            UpdateEvent::Drone(telemetry) => self.evaluate_drone(telemetry).into_iter().collect(),
            UpdateEvent::Risk(assessment) => self.evaluate_risk(assessment).into_iter().collect(),
            UpdateEvent::Alert(alert) => vec![self.evaluate_alert(alert)],
            UpdateEvent::SystemStatus(status) => {
                debug!(status = %status, "system status update carries no notification rules");
                Vec::new()
            }
        }
    }

    /// Battery thresholds, most severe first: at most one candidate per
    /// update. A telemetry frame without a battery reading derives nothing.
    pub fn evaluate_drone(&self, telemetry: &DroneTelemetry) -> Option<NotificationCandidate> {
        let battery = telemetry.battery?;
        if battery <= self.thresholds.battery_critical {
            Some(NotificationCandidate {
                severity: Severity::Emergency,
                title: "Critical Battery Level".to_string(),
                message: format!(
                    "Drone {} battery level at {}%. Immediate action required.",
                    telemetry.name, battery
                ),
                drone_id: Some(telemetry.id.clone()),
                action_required: Some(true),
                source: Some(NotificationSource::Drone),
            })
        } else if battery <= self.thresholds.battery_low {
            Some(NotificationCandidate {
                severity: Severity::Warning,
                title: "Low Battery Warning".to_string(),
                message: format!("Drone {} battery level at {}%.", telemetry.name, battery),
                drone_id: Some(telemetry.id.clone()),
                action_required: None,
                source: Some(NotificationSource::Drone),
            })
        } else {
            None
        }
    }

    /// A risk assessment derives a candidate only at or above the critical
    /// threshold. An assessment without a risk level derives nothing.
    pub fn evaluate_risk(&self, assessment: &RiskAssessment) -> Option<NotificationCandidate> {
        let risk_level = assessment.risk_level?;
        if risk_level >= self.thresholds.risk_critical {
            Some(NotificationCandidate {
                severity: Severity::Emergency,
                title: "Critical Risk Level".to_string(),
                message: format!(
                    "Area {} risk level critical at {:.0}%.",
                    assessment.name,
                    risk_level * 100.0
                ),
                drone_id: None,
                action_required: Some(true),
                source: Some(NotificationSource::Risk),
            })
        } else {
            None
        }
    }

    /// Alerts always derive exactly one candidate carrying the alert's own
    /// severity and action flag.
    pub fn evaluate_alert(&self, alert: &Alert) -> NotificationCandidate {
        NotificationCandidate {
            severity: alert.severity,
            title: alert.title.clone(),
            message: alert.message.clone(),
            drone_id: None,
            action_required: alert.action_required,
            source: Some(NotificationSource::System),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::types::RiskTrend;

    fn telemetry(battery: Option<f32>) -> DroneTelemetry {
        DroneTelemetry {
            id: "drone-7".to_string(),
            name: "Eagle-7".to_string(),
            battery,
            position: None,
            status: None,
            current_mission: None,
            last_update: None,
        }
    }

    fn assessment(risk_level: Option<f64>) -> RiskAssessment {
        RiskAssessment {
            area_id: "area-2".to_string(),
            name: "North Ridge".to_string(),
            risk_level,
            trend: RiskTrend::Stable,
            timestamp: None,
            requires_inspection: false,
        }
    }

    #[test]
    fn battery_at_fifteen_is_an_emergency_requiring_action() {
        let engine = NotificationRuleEngine::default();
        let candidates = engine.evaluate(&UpdateEvent::Drone(telemetry(Some(15.0))));

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.severity, Severity::Emergency);
        assert_eq!(candidate.action_required, Some(true));
        assert_eq!(candidate.source, Some(NotificationSource::Drone));
        assert_eq!(candidate.drone_id.as_deref(), Some("drone-7"));
        assert_eq!(
            candidate.message,
            "Drone Eagle-7 battery level at 15%. Immediate action required."
        );
    }

    #[test]
    fn battery_at_twenty_five_is_a_warning_without_action_flag() {
        let engine = NotificationRuleEngine::default();
        let candidates = engine.evaluate(&UpdateEvent::Drone(telemetry(Some(25.0))));

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.severity, Severity::Warning);
        assert_eq!(candidate.action_required, None);
        assert_eq!(candidate.message, "Drone Eagle-7 battery level at 25%.");
    }

    #[test]
    fn battery_at_eighty_derives_nothing() {
        let engine = NotificationRuleEngine::default();
        assert!(engine.evaluate(&UpdateEvent::Drone(telemetry(Some(80.0)))).is_empty());
    }

    #[test]
    fn the_more_severe_battery_threshold_wins() {
        let engine = NotificationRuleEngine::default();
        // 20 satisfies both thresholds; emergency is checked first.
        let candidate = engine.evaluate_drone(&telemetry(Some(20.0))).unwrap();
        assert_eq!(candidate.severity, Severity::Emergency);

        let candidate = engine.evaluate_drone(&telemetry(Some(30.0))).unwrap();
        assert_eq!(candidate.severity, Severity::Warning);
    }

    #[test]
    fn missing_battery_reading_derives_nothing() {
        let engine = NotificationRuleEngine::default();
        assert!(engine.evaluate_drone(&telemetry(None)).is_none());
    }

    #[test]
    fn risk_at_eighty_five_percent_is_an_emergency_with_formatted_message() {
        let engine = NotificationRuleEngine::default();
        let candidates = engine.evaluate(&UpdateEvent::Risk(assessment(Some(0.85))));

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.severity, Severity::Emergency);
        assert_eq!(candidate.action_required, Some(true));
        assert_eq!(candidate.source, Some(NotificationSource::Risk));
        assert!(candidate.message.contains("85%"));
        assert_eq!(
            candidate.message,
            "Area North Ridge risk level critical at 85%."
        );
    }

    #[test]
    fn risk_below_threshold_derives_nothing() {
        let engine = NotificationRuleEngine::default();
        assert!(engine.evaluate_risk(&assessment(Some(0.79))).is_none());
    }

    #[test]
    fn risk_exactly_at_threshold_qualifies() {
        let engine = NotificationRuleEngine::default();
        assert!(engine.evaluate_risk(&assessment(Some(0.8))).is_some());
    }

    #[test]
    fn missing_risk_level_derives_nothing() {
        let engine = NotificationRuleEngine::default();
        assert!(engine.evaluate_risk(&assessment(None)).is_none());
    }

    #[test]
    fn alerts_carry_their_own_severity_and_action_flag() {
        let engine = NotificationRuleEngine::default();
        let alert = Alert {
            severity: Severity::Success,
            title: "Mission Complete".to_string(),
            message: "Sector sweep finished.".to_string(),
            action_required: Some(false),
        };

        let candidate = engine.evaluate_alert(&alert);
        assert_eq!(candidate.severity, Severity::Success);
        assert_eq!(candidate.title, "Mission Complete");
        assert_eq!(candidate.action_required, Some(false));
        assert_eq!(candidate.source, Some(NotificationSource::System));
    }

    #[test]
    fn system_status_updates_derive_nothing() {
        let engine = NotificationRuleEngine::default();
        let candidates =
            engine.evaluate(&UpdateEvent::SystemStatus("all systems nominal".to_string()));
        assert!(candidates.is_empty());
    }

    #[test]
    fn custom_thresholds_shift_the_boundaries() {
        let engine = NotificationRuleEngine::new(RuleThresholds {
            battery_critical: 10.0,
            battery_low: 50.0,
            risk_critical: 0.5,
        });

        assert_eq!(
            engine.evaluate_drone(&telemetry(Some(15.0))).unwrap().severity,
            Severity::Warning
        );
        assert!(engine.evaluate_risk(&assessment(Some(0.6))).is_some());
    }
}
