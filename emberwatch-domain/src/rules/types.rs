use serde::Deserialize;

/// Threshold configuration for the rule engine.
///
/// Deserializable so deployments can tune thresholds from configuration;
/// the defaults match the platform's operational values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleThresholds {
    /// Battery percentage at or below which a drone update is an emergency.
    #[serde(default = "default_battery_critical")]
    pub battery_critical: f32,
    /// Battery percentage at or below which a drone update is a warning.
    #[serde(default = "default_battery_low")]
    pub battery_low: f32,
    /// Risk level (0.0-1.0) at or above which a risk update is an emergency.
    #[serde(default = "default_risk_critical")]
    pub risk_critical: f64,
}

fn default_battery_critical() -> f32 {
    20.0
}

fn default_battery_low() -> f32 {
    30.0
}

fn default_risk_critical() -> f64 {
    0.8
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            battery_critical: default_battery_critical(),
            battery_low: default_battery_low(),
            risk_critical: default_risk_critical(),
        }
    }
}
