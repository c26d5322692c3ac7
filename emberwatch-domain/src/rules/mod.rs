//! Threshold rules deriving notifications from incoming updates.

pub mod engine;
pub mod types;

pub use engine::NotificationRuleEngine;
pub use types::RuleThresholds;
