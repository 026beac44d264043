//! Output structure of intent detection.

use serde::{Deserialize, Serialize};

use super::entities::ExtractedEntity;
use super::intent::DetectedIntent;
use super::sentiment::Sentiment;
use super::urgency::Urgency;
use crate::services::SafetyFlag;

/// Number of ranked slots in every result.
pub const TOP_INTENTS: usize = 3;

/// Complete result of one detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDetectionResult {
    /// Descending by confidence, padded with `{UNKNOWN, 0}`
    pub top_intents: [DetectedIntent; TOP_INTENTS],

    pub entities: Vec<ExtractedEntity>,

    pub sentiment: Sentiment,

    pub urgency: Urgency,

    /// Passed through from the safety checker
    pub safety_flags: Vec<SafetyFlag>,
}

/// Keeps the first three candidates of a sorted list, padding the rest.
pub fn pad_top_intents(candidates: &[DetectedIntent]) -> [DetectedIntent; TOP_INTENTS] {
    let mut slots = [DetectedIntent::empty_slot(); TOP_INTENTS];
    for (slot, candidate) in slots.iter_mut().zip(candidates) {
        *slot = *candidate;
    }
    slots
}

impl IntentDetectionResult {
    pub fn primary(&self) -> &DetectedIntent {
        &self.top_intents[0]
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {} ({:.0}%), Entities: {}, Sentiment: {:?}, Urgency: {:?}, Flags: {}",
            self.primary().intent,
            self.primary().confidence * 100.0,
            self.entities.len(),
            self.sentiment,
            self.urgency,
            self.safety_flags.len()
        )
    }
}
