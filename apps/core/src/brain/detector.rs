//! Intent Detector - Main orchestrator of the pipeline.
//!
//! Fixed linear sequence per message:
//! 1. Safety check (external collaborator, failure -> no flags)
//! 2. Entity extraction
//! 3. Sentiment
//! 4. Rule classification
//! 5. Context boost
//! 6. Urgency from the boosted primary
//! 7. Escalation gate, and on the async path an optional re-ranking
//! 8. Padding to three slots, assembly, telemetry
//!
//! Nothing in this sequence returns an error to the caller.

use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::booster::ContextBooster;
use super::classifier::RuleClassifier;
use super::context::ConversationContextFull;
use super::entities::{EntityExtractor, ExtractedEntity};
use super::escalation::{DeclineReason, EscalationDecision, EscalationGate};
use super::intent::{add_or_boost, sort_by_confidence, DetectedIntent, Intent};
use super::patterns::PatternBank;
use super::result::{pad_top_intents, IntentDetectionResult};
use super::sentiment::{Sentiment, SentimentAnalyzer};
use super::urgency::{Urgency, UrgencyCalculator};
use crate::config::DetectorConfig;
use crate::services::{
    IntentReranker, NoopSafetyChecker, SafetyChecker, SafetyFlag, TelemetryRecord, TelemetrySink,
    TracingTelemetrySink,
};

/// What happened at the escalation step of an async detection.
#[derive(Debug, Clone, PartialEq)]
pub enum EscalationStatus {
    /// The gate declined
    NotRequested(DeclineReason),
    /// The gate allowed it but no re-ranker is configured
    Unavailable,
    /// The re-ranking replaced the rules-only ranking
    Applied,
    /// The re-ranker errored or answered nothing usable
    Failed(String),
    TimedOut,
}

/// Result of [`IntentDetector::detect_intent_with_escalation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub result: IntentDetectionResult,
    pub escalation: EscalationStatus,
}

impl Detection {
    /// Whether the gate asked for a re-ranking.
    pub fn escalation_requested(&self) -> bool {
        !matches!(self.escalation, EscalationStatus::NotRequested(_))
    }

    /// Whether a re-ranking call actually went out; the caller charges its
    /// daily quota on this.
    pub fn llm_called(&self) -> bool {
        matches!(
            self.escalation,
            EscalationStatus::Applied | EscalationStatus::Failed(_) | EscalationStatus::TimedOut
        )
    }
}

/// Deterministic part of a detection (steps 1-6).
struct RulesOutcome {
    safety_flags: Vec<SafetyFlag>,
    entities: Vec<ExtractedEntity>,
    sentiment: Sentiment,
    candidates: Vec<DetectedIntent>,
    urgency: Urgency,
}

/// Stateless detector, built once at startup and shared by reference.
pub struct IntentDetector {
    config: DetectorConfig,
    classifier: RuleClassifier,
    extractor: EntityExtractor,
    sentiment: SentimentAnalyzer,
    booster: ContextBooster,
    urgency: UrgencyCalculator,
    gate: EscalationGate,
    safety: Arc<dyn SafetyChecker>,
    telemetry: Arc<dyn TelemetrySink>,
    reranker: Option<Arc<dyn IntentReranker>>,
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl IntentDetector {
    /// Create a detector with the built-in pattern bank, no safety flags,
    /// tracing telemetry and no re-ranker.
    pub fn new(config: DetectorConfig) -> Self {
        let bank = Arc::new(PatternBank::default());
        Self {
            classifier: RuleClassifier::new(Arc::clone(&bank)),
            extractor: EntityExtractor::new(bank),
            sentiment: SentimentAnalyzer::new(),
            booster: ContextBooster::new(),
            urgency: UrgencyCalculator::new(),
            gate: EscalationGate::from_config(&config),
            safety: Arc::new(NoopSafetyChecker),
            telemetry: Arc::new(TracingTelemetrySink),
            reranker: None,
            config,
        }
    }

    pub fn with_pattern_bank(mut self, bank: Arc<PatternBank>) -> Self {
        self.classifier = RuleClassifier::new(Arc::clone(&bank));
        self.extractor = EntityExtractor::new(bank);
        self
    }

    pub fn with_safety_checker(mut self, safety: Arc<dyn SafetyChecker>) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_telemetry_sink(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_reranker(mut self, reranker: Arc<dyn IntentReranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn gate(&self) -> &EscalationGate {
        &self.gate
    }

    /// Rules-only detection.
    ///
    /// The escalation policy is still checked (and logged) but no request is
    /// built and no model is called; hosts that want the re-ranking use
    /// [`detect_intent_with_escalation`](Self::detect_intent_with_escalation).
    pub fn detect_intent(
        &self,
        message: &str,
        context: &ConversationContextFull,
        is_premium: bool,
        llm_calls_today: u32,
    ) -> IntentDetectionResult {
        let start = Instant::now();
        let outcome = self.run_rules(message, context);

        let top = outcome
            .candidates
            .first()
            .copied()
            .unwrap_or_else(DetectedIntent::empty_slot);
        if self.gate.should_escalate(&top, is_premium, llm_calls_today) {
            debug!("escalation allowed; synchronous path keeps the rules-only ranking");
        }

        let candidates = outcome.candidates.clone();
        let result = Self::assemble(outcome, &candidates);
        self.emit_telemetry(start, &result);
        result
    }

    /// Detection with the optional re-ranking step.
    ///
    /// The re-ranker is called only when the gate allows it, under the
    /// configured timeout. On timeout, error or an empty answer the
    /// rules-only result is returned unchanged.
    pub async fn detect_intent_with_escalation(
        &self,
        message: &str,
        context: &ConversationContextFull,
        is_premium: bool,
        llm_calls_today: u32,
    ) -> Detection {
        let start = Instant::now();
        let outcome = self.run_rules(message, context);

        let decision = self.gate.evaluate(
            message,
            context,
            &outcome.candidates,
            is_premium,
            llm_calls_today,
        );

        let (candidates, escalation) = match decision {
            EscalationDecision::Declined(reason) => {
                debug!(?reason, "escalation declined");
                (outcome.candidates.clone(), EscalationStatus::NotRequested(reason))
            }
            EscalationDecision::Escalate(request) => match &self.reranker {
                None => {
                    debug!("escalation allowed but no re-ranker configured");
                    (outcome.candidates.clone(), EscalationStatus::Unavailable)
                }
                Some(reranker) => {
                    let request_id = request.request_id;
                    match timeout(self.config.escalation_timeout(), reranker.rerank(request)).await
                    {
                        Ok(Ok(ranking)) => {
                            let ranking = sanitize_ranking(ranking);
                            if ranking.is_empty() {
                                warn!(%request_id, "re-ranker returned no usable intents");
                                (
                                    outcome.candidates.clone(),
                                    EscalationStatus::Failed("empty ranking".to_string()),
                                )
                            } else {
                                info!(
                                    %request_id,
                                    primary = %ranking[0].intent,
                                    "re-ranking applied"
                                );
                                (ranking, EscalationStatus::Applied)
                            }
                        }
                        Ok(Err(e)) => {
                            warn!(%request_id, "re-ranker failed: {}", e);
                            (outcome.candidates.clone(), EscalationStatus::Failed(e.to_string()))
                        }
                        Err(_) => {
                            warn!(
                                %request_id,
                                timeout_ms = self.config.escalation_timeout_ms,
                                "re-ranker timed out"
                            );
                            (outcome.candidates.clone(), EscalationStatus::TimedOut)
                        }
                    }
                }
            },
        };

        let result = Self::assemble(outcome, &candidates);
        self.emit_telemetry(start, &result);
        Detection { result, escalation }
    }

    fn run_rules(&self, message: &str, context: &ConversationContextFull) -> RulesOutcome {
        let safety_flags = match self.safety.check_input(message, context) {
            Ok(check) => check.flags,
            Err(e) => {
                warn!("safety check failed, continuing without flags: {}", e);
                Vec::new()
            }
        };

        let entities = self.extractor.extract(message);
        let sentiment = self.sentiment.analyze(message);
        let classified = self.classifier.classify(message);
        let candidates = self.booster.boost(&classified, &entities, context);

        let primary = candidates
            .first()
            .map(|c| c.intent)
            .unwrap_or(Intent::Unknown);
        let urgency = self.urgency.calculate(primary, sentiment, context);

        RulesOutcome {
            safety_flags,
            entities,
            sentiment,
            candidates,
            urgency,
        }
    }

    fn assemble(outcome: RulesOutcome, candidates: &[DetectedIntent]) -> IntentDetectionResult {
        IntentDetectionResult {
            top_intents: pad_top_intents(candidates),
            entities: outcome.entities,
            sentiment: outcome.sentiment,
            urgency: outcome.urgency,
            safety_flags: outcome.safety_flags,
        }
    }

    fn emit_telemetry(&self, start: Instant, result: &IntentDetectionResult) {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.telemetry
            .record(&TelemetryRecord::new(elapsed_ms, result.primary().intent));
    }
}

/// Clamps, deduplicates (max wins) and sorts an external ranking. Non-finite
/// confidences are dropped.
fn sanitize_ranking(ranking: Vec<DetectedIntent>) -> Vec<DetectedIntent> {
    let mut cleaned = Vec::with_capacity(ranking.len());
    for candidate in ranking {
        if candidate.confidence.is_finite() {
            add_or_boost(&mut cleaned, candidate.intent, candidate.confidence);
        }
    }
    sort_by_confidence(&mut cleaned);
    cleaned
}
