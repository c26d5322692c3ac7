//! Typed update contract of the external update source, and the dispatcher
//! that drives updates through the notification pipeline.

pub mod dispatcher;
pub mod errors;
pub mod types;

pub use dispatcher::UpdateDispatcher;
pub use errors::DispatchError;
pub use types::{Alert, DroneStatus, DroneTelemetry, RiskAssessment, RiskTrend, UpdateEnvelope, UpdateEvent};
