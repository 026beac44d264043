//! Intent vocabulary shared by every stage of the pipeline.
//!
//! A candidate list (`Vec<DetectedIntent>`) never holds the same intent twice:
//! every insertion goes through [`add_or_boost`], which keeps the highest
//! confidence seen.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Communicative purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Reports being hungry
    Hunger,
    /// Reports a craving (sugar, salty, snacking urge)
    Craving,
    /// Reports tiredness
    Fatigue,
    /// Reports an energy dip
    LowEnergy,
    Stress,
    Anxiety,
    Frustration,
    /// Shares a success
    Celebration,
    /// Asks how the program is going
    ProgressCheck,
    /// Asks why the coach recommended something
    ExplainDecision,
    NutritionQuestion,
    MealSuggestion,
    /// Reports something eaten
    LogMeal,
    ChallengeStart,
    /// Weight no longer moving
    Plateau,
    /// Doubts the program works
    Doubt,
    Overwhelm,
    Greeting,
    Help,
    /// Feedback about the app itself
    Feedback,
    Thirst,
    /// Unknown/Default
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire label of the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Hunger => "HUNGER",
            Intent::Craving => "CRAVING",
            Intent::Fatigue => "FATIGUE",
            Intent::LowEnergy => "LOW_ENERGY",
            Intent::Stress => "STRESS",
            Intent::Anxiety => "ANXIETY",
            Intent::Frustration => "FRUSTRATION",
            Intent::Celebration => "CELEBRATION",
            Intent::ProgressCheck => "PROGRESS_CHECK",
            Intent::ExplainDecision => "EXPLAIN_DECISION",
            Intent::NutritionQuestion => "NUTRITION_QUESTION",
            Intent::MealSuggestion => "MEAL_SUGGESTION",
            Intent::LogMeal => "LOG_MEAL",
            Intent::ChallengeStart => "CHALLENGE_START",
            Intent::Plateau => "PLATEAU",
            Intent::Doubt => "DOUBT",
            Intent::Overwhelm => "OVERWHELM",
            Intent::Greeting => "GREETING",
            Intent::Help => "HELP",
            Intent::Feedback => "FEEDBACK",
            Intent::Thirst => "THIRST",
            Intent::Unknown => "UNKNOWN",
        }
    }
}

/// An intent together with the confidence the pipeline assigns to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedIntent {
    pub intent: Intent,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl DetectedIntent {
    pub fn new(intent: Intent, confidence: f32) -> Self {
        Self {
            intent,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The `{UNKNOWN, 0}` slot used to pad the top-3 list.
    pub fn empty_slot() -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
        }
    }
}

/// Raises `intent` to at least `confidence`, appending it if absent.
pub fn add_or_boost(candidates: &mut Vec<DetectedIntent>, intent: Intent, confidence: f32) {
    let confidence = confidence.clamp(0.0, 1.0);
    match candidates.iter_mut().find(|c| c.intent == intent) {
        Some(existing) => existing.confidence = existing.confidence.max(confidence),
        None => candidates.push(DetectedIntent { intent, confidence }),
    }
}

/// Stable descending sort: equal confidences keep their insertion order.
pub fn sort_by_confidence(candidates: &mut [DetectedIntent]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_or_boost_keeps_max() {
        let mut candidates = vec![DetectedIntent::new(Intent::Hunger, 0.7)];

        add_or_boost(&mut candidates, Intent::Hunger, 0.5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].confidence, 0.7);

        add_or_boost(&mut candidates, Intent::Hunger, 0.9);
        assert_eq!(candidates[0].confidence, 0.9);

        add_or_boost(&mut candidates, Intent::LogMeal, 0.5);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut candidates = vec![
            DetectedIntent::new(Intent::Stress, 0.5),
            DetectedIntent::new(Intent::Hunger, 0.8),
            DetectedIntent::new(Intent::Craving, 0.5),
        ];
        sort_by_confidence(&mut candidates);

        assert_eq!(candidates[0].intent, Intent::Hunger);
        assert_eq!(candidates[1].intent, Intent::Stress);
        assert_eq!(candidates[2].intent, Intent::Craving);
    }

    #[test]
    fn test_labels_match_serde() {
        let json = serde_json::to_string(&Intent::LowEnergy).unwrap();
        assert_eq!(json, format!("\"{}\"", Intent::LowEnergy.label()));
        assert_eq!(Intent::ProgressCheck.to_string(), "PROGRESS_CHECK");
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(DetectedIntent::new(Intent::Help, 1.4).confidence, 1.0);
        assert_eq!(DetectedIntent::new(Intent::Help, -0.2).confidence, 0.0);
    }
}
