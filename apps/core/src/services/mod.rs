//! Contracts of the external collaborators the detector talks to, plus the
//! default implementations used when the host application injects none.

pub mod safety;
pub mod telemetry;
pub mod traits;

pub use safety::{NoopSafetyChecker, SafetyCheck, SafetyFlag, SafetySeverity};
pub use telemetry::{TelemetryRecord, TracingTelemetrySink};
pub use traits::{IntentReranker, SafetyChecker, TelemetrySink};
