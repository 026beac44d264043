use crate::brain::context::ConversationContextFull;
use crate::brain::escalation::EscalationRequest;
use crate::brain::intent::DetectedIntent;
use crate::error::AppError;
use async_trait::async_trait;

use super::safety::SafetyCheck;
use super::telemetry::TelemetryRecord;

/// Defines the interface of the content-safety filter.
///
/// Errors are absorbed by the detector: a failing checker yields an empty flag
/// list, never a failed detection.
pub trait SafetyChecker: Send + Sync {
    fn check_input(
        &self,
        message: &str,
        context: &ConversationContextFull,
    ) -> Result<SafetyCheck, AppError>;
}

/// Defines the interface of the generative model that re-ranks ambiguous
/// messages.
///
/// The detector bounds every call with a timeout and keeps the rules-only
/// ranking on error, timeout or an empty answer.
#[async_trait]
pub trait IntentReranker: Send + Sync {
    async fn rerank(&self, request: EscalationRequest) -> Result<Vec<DetectedIntent>, AppError>;
}

/// Receives one timing record per detection.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, record: &TelemetryRecord);
}
