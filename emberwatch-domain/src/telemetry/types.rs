use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DispatchError;
use crate::notifications::types::Severity;

/// Operational status reported by a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Active,
    Returning,
    Charging,
    Emergency,
}

/// Direction a risk area's level is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Telemetry frame for a single drone.
///
/// Threshold-bearing fields are optional: a frame missing its battery
/// reading simply derives no notification rather than failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneTelemetry {
    pub id: String,
    pub name: String,
    /// Battery charge, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<f32>,
    /// Longitude/latitude pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DroneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

/// Risk assessment for a monitored area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub area_id: String,
    pub name: String,
    /// Risk level, 0.0-1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<f64>,
    #[serde(default)]
    pub trend: RiskTrend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requires_inspection: bool,
}

/// A generic alert raised by the platform itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<bool>,
}

/// A typed update delivered by the update source, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    Drone(DroneTelemetry),
    Risk(RiskAssessment),
    Alert(Alert),
    /// Opaque status string; not processed by the notification core.
    SystemStatus(String),
}

/// Raw wire envelope carrying one update:
/// `{ "type": "...", "data": ..., "timestamp": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl UpdateEnvelope {
    /// Parses a raw JSON message into an envelope.
    pub fn from_json(payload: &str) -> Result<Self, DispatchError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Maps the envelope to its typed update.
    ///
    /// An unrecognized discriminator yields
    /// [`DispatchError::UnknownUpdateType`]; a payload that does not match
    /// the declared type yields [`DispatchError::MalformedPayload`].
    pub fn decode(self) -> Result<UpdateEvent, DispatchError> {
        let malformed = |kind: &str| {
            let kind = kind.to_string();
            move |source| DispatchError::MalformedPayload { kind, source }
        };
        match self.kind.as_str() {
            "DRONE_UPDATE" => serde_json::from_value(self.data)
                .map(UpdateEvent::Drone)
                .map_err(malformed("DRONE_UPDATE")),
            "RISK_UPDATE" => serde_json::from_value(self.data)
                .map(UpdateEvent::Risk)
                .map_err(malformed("RISK_UPDATE")),
            "ALERT" => serde_json::from_value(self.data)
                .map(UpdateEvent::Alert)
                .map_err(malformed("ALERT")),
            "SYSTEM_STATUS" => serde_json::from_value(self.data)
                .map(UpdateEvent::SystemStatus)
                .map_err(malformed("SYSTEM_STATUS")),
            _ => Err(DispatchError::UnknownUpdateType(self.kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drone_update_envelope_decodes_with_wire_names() {
        let payload = r#"{
            "type": "DRONE_UPDATE",
            "data": {
                "id": "drone-1",
                "name": "Eagle-1",
                "battery": 17,
                "position": [-120.5, 39.2],
                "status": "active",
                "currentMission": "ridge-sweep",
                "lastUpdate": "2025-09-14T10:22:31Z"
            },
            "timestamp": "2025-09-14T10:22:31Z"
        }"#;

        let envelope = UpdateEnvelope::from_json(payload).unwrap();
        assert_eq!(envelope.kind, "DRONE_UPDATE");

        match envelope.decode().unwrap() {
            UpdateEvent::Drone(telemetry) => {
                assert_eq!(telemetry.id, "drone-1");
                assert_eq!(telemetry.battery, Some(17.0));
                assert_eq!(telemetry.status, Some(DroneStatus::Active));
                assert_eq!(telemetry.current_mission.as_deref(), Some("ridge-sweep"));
            }
            other => panic!("Unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn risk_update_envelope_decodes() {
        let payload = r#"{
            "type": "RISK_UPDATE",
            "data": {
                "areaId": "area-9",
                "name": "South Basin",
                "riskLevel": 0.85,
                "trend": "increasing",
                "requiresInspection": true
            }
        }"#;

        match UpdateEnvelope::from_json(payload).unwrap().decode().unwrap() {
            UpdateEvent::Risk(assessment) => {
                assert_eq!(assessment.area_id, "area-9");
                assert_eq!(assessment.risk_level, Some(0.85));
                assert_eq!(assessment.trend, RiskTrend::Increasing);
                assert!(assessment.requires_inspection);
            }
            other => panic!("Unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn alert_envelope_decodes_severity() {
        let payload = r#"{
            "type": "ALERT",
            "data": {
                "severity": "warning",
                "title": "Wind Shift",
                "message": "Wind direction changed in sector 4."
            }
        }"#;

        match UpdateEnvelope::from_json(payload).unwrap().decode().unwrap() {
            UpdateEvent::Alert(alert) => {
                assert_eq!(alert.severity, Severity::Warning);
                assert_eq!(alert.action_required, None);
            }
            other => panic!("Unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn system_status_envelope_decodes_opaque_string() {
        let payload = r#"{ "type": "SYSTEM_STATUS", "data": "degraded" }"#;
        match UpdateEnvelope::from_json(payload).unwrap().decode().unwrap() {
            UpdateEvent::SystemStatus(status) => assert_eq!(status, "degraded"),
            other => panic!("Unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn unknown_discriminator_is_reported_as_such() {
        let payload = r#"{ "type": "TELEPATHY_UPDATE", "data": {} }"#;
        let result = UpdateEnvelope::from_json(payload).unwrap().decode();
        match result.err().expect("expected an unknown-type error") {
            DispatchError::UnknownUpdateType(kind) => assert_eq!(kind, "TELEPATHY_UPDATE"),
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn mismatched_payload_is_reported_as_malformed() {
        let payload = r#"{ "type": "DRONE_UPDATE", "data": { "battery": 12 } }"#;
        let result = UpdateEnvelope::from_json(payload).unwrap().decode();
        match result.err().expect("expected a malformed-payload error") {
            DispatchError::MalformedPayload { kind, .. } => assert_eq!(kind, "DRONE_UPDATE"),
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn invalid_json_is_reported_as_invalid_envelope() {
        let result = UpdateEnvelope::from_json("not json");
        assert!(matches!(result, Err(DispatchError::InvalidEnvelope(_))));
    }

    #[test]
    fn telemetry_without_battery_still_decodes() {
        let payload = r#"{
            "type": "DRONE_UPDATE",
            "data": { "id": "drone-2", "name": "Eagle-2" }
        }"#;
        match UpdateEnvelope::from_json(payload).unwrap().decode().unwrap() {
            UpdateEvent::Drone(telemetry) => assert_eq!(telemetry.battery, None),
            other => panic!("Unexpected variant: {:?}", other),
        }
    }
}
