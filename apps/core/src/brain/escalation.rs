//! LLM Escalation Gate.
//!
//! Policy only: decides whether an ambiguous message is worth a generative
//! re-ranking and builds the payload for it. The model call itself belongs to
//! an [`IntentReranker`](crate::services::IntentReranker).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::{ConversationContextFull, TimeOfDay, WeightTrend};
use super::intent::DetectedIntent;
use crate::config::DetectorConfig;

/// Subset of the conversation context forwarded to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationContext {
    pub time_of_day: TimeOfDay,
    pub hours_since_last_meal: f32,
    pub weight_trend: WeightTrend,
    pub has_stress_eating_pattern: bool,
    pub day_in_phase: u32,
    pub total_days_in_program: u32,
}

impl From<&ConversationContextFull> for EscalationContext {
    fn from(ctx: &ConversationContextFull) -> Self {
        Self {
            time_of_day: ctx.time_of_day(),
            hours_since_last_meal: ctx.hours_since_last_meal(),
            weight_trend: ctx.weight_trend(),
            has_stress_eating_pattern: ctx.has_stress_eating_pattern(),
            day_in_phase: ctx.day_in_phase(),
            total_days_in_program: ctx.total_days_in_program(),
        }
    }
}

/// Payload handed to the re-ranking model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationRequest {
    pub request_id: Uuid,
    pub message: String,
    pub context: EscalationContext,
    /// Rules-only ranking, for the model to confirm or replace
    pub candidates: Vec<DetectedIntent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    /// Top candidate already at or above the threshold
    ConfidentEnough,
    NotPremium,
    QuotaExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EscalationDecision {
    Escalate(EscalationRequest),
    Declined(DeclineReason),
}

impl EscalationDecision {
    pub fn should_escalate(&self) -> bool {
        matches!(self, EscalationDecision::Escalate(_))
    }
}

/// Escalate only when `top.confidence < threshold`, the user is premium and
/// today's calls are under the quota.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationGate {
    confidence_threshold: f32,
    daily_quota: u32,
}

impl Default for EscalationGate {
    fn default() -> Self {
        Self::from_config(&DetectorConfig::default())
    }
}

impl EscalationGate {
    pub fn new(confidence_threshold: f32, daily_quota: u32) -> Self {
        Self {
            confidence_threshold,
            daily_quota,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.escalation_confidence_threshold, config.daily_llm_quota)
    }

    /// The bare boolean policy.
    pub fn should_escalate(
        &self,
        top: &DetectedIntent,
        is_premium: bool,
        llm_calls_today: u32,
    ) -> bool {
        self.check(top, is_premium, llm_calls_today).is_ok()
    }

    fn check(
        &self,
        top: &DetectedIntent,
        is_premium: bool,
        llm_calls_today: u32,
    ) -> Result<(), DeclineReason> {
        if top.confidence >= self.confidence_threshold {
            return Err(DeclineReason::ConfidentEnough);
        }
        if !is_premium {
            return Err(DeclineReason::NotPremium);
        }
        if llm_calls_today >= self.daily_quota {
            return Err(DeclineReason::QuotaExhausted);
        }
        Ok(())
    }

    /// Full decision, with the request payload when escalation is allowed.
    pub fn evaluate(
        &self,
        message: &str,
        context: &ConversationContextFull,
        candidates: &[DetectedIntent],
        is_premium: bool,
        llm_calls_today: u32,
    ) -> EscalationDecision {
        let top = candidates
            .first()
            .copied()
            .unwrap_or_else(DetectedIntent::empty_slot);

        match self.check(&top, is_premium, llm_calls_today) {
            Ok(()) => EscalationDecision::Escalate(EscalationRequest {
                request_id: Uuid::new_v4(),
                message: message.to_string(),
                context: EscalationContext::from(context),
                candidates: candidates.to_vec(),
            }),
            Err(reason) => EscalationDecision::Declined(reason),
        }
    }
}
