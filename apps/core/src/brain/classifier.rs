//! Rule-based intent classification.
//!
//! Each intent rule is tried once per message: the first matching pattern
//! yields the rule's base confidence and the remaining patterns are skipped.
//! No ML model required - pure Rust regex matching.

use std::sync::Arc;

use super::intent::{add_or_boost, sort_by_confidence, DetectedIntent, Intent};
use super::patterns::PatternBank;

/// Confidence of the fallback candidate when no rule matched.
pub const UNKNOWN_CONFIDENCE: f32 = 0.3;

/// Intent classifier over a pattern bank
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    bank: Arc<PatternBank>,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(Arc::new(PatternBank::default()))
    }
}

impl RuleClassifier {
    pub fn new(bank: Arc<PatternBank>) -> Self {
        Self { bank }
    }

    /// Classify a message into candidates sorted by descending confidence.
    ///
    /// Never returns an empty list: without any match the single candidate is
    /// `{UNKNOWN, 0.3}`.
    pub fn classify(&self, text: &str) -> Vec<DetectedIntent> {
        let mut candidates = Vec::new();

        for rule in self.bank.intents() {
            if rule.patterns.iter().any(|p| p.is_match(text)) {
                add_or_boost(&mut candidates, rule.intent, rule.confidence);
            }
        }

        if candidates.is_empty() {
            return vec![DetectedIntent::new(Intent::Unknown, UNKNOWN_CONFIDENCE)];
        }

        sort_by_confidence(&mut candidates);
        candidates
    }
}
