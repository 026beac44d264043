//! Context Booster / Reclassifier.
//!
//! A fixed, ordered table of conditional rules. Every rule is checked exactly
//! once against the primary candidate the classifier produced, never against a
//! primary promoted by an earlier rule. That single pass is what keeps the
//! STRESS -> CRAVING and CRAVING-at-night -> STRESS rules from feeding each
//! other.

use tracing::debug;

use super::context::{ConversationContextFull, TimeOfDay, WeightTrend};
use super::entities::ExtractedEntity;
use super::intent::{add_or_boost, sort_by_confidence, DetectedIntent, Intent};
use super::patterns::EntityType;

/// What a rule does to the candidate list once its condition holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoostAction {
    /// Raise (or add) an intent to at least the given confidence.
    Raise(Intent, f32),
    /// Lower the original primary by `by`, never below `floor`.
    Dampen { by: f32, floor: f32 },
}

/// Inputs a rule condition may look at.
pub struct BoostInput<'a> {
    pub primary: Intent,
    pub entities: &'a [ExtractedEntity],
    pub context: &'a ConversationContextFull,
}

pub struct BoostRule {
    pub name: &'static str,
    pub applies: fn(&BoostInput<'_>) -> bool,
    pub actions: &'static [BoostAction],
}

const MEAL_INTENTS: [Intent; 4] = [
    Intent::Hunger,
    Intent::Craving,
    Intent::MealSuggestion,
    Intent::LogMeal,
];

/// Rule table, evaluated in order.
pub static BOOST_RULES: &[BoostRule] = &[
    BoostRule {
        name: "fatigue_after_long_fast",
        applies: |i| i.primary == Intent::Fatigue && i.context.hours_since_last_meal() > 4.0,
        actions: &[
            BoostAction::Raise(Intent::Hunger, 0.65),
            BoostAction::Dampen { by: 0.1, floor: 0.5 },
        ],
    },
    BoostRule {
        name: "morning_low_energy",
        applies: |i| {
            i.primary == Intent::LowEnergy && i.context.time_of_day() == TimeOfDay::Morning
        },
        actions: &[BoostAction::Raise(Intent::Hunger, 0.6)],
    },
    BoostRule {
        name: "stress_eating_history",
        applies: |i| i.primary == Intent::Stress && i.context.has_stress_eating_pattern(),
        actions: &[BoostAction::Raise(Intent::Craving, 0.55)],
    },
    BoostRule {
        name: "stable_weight_mid_phase",
        applies: |i| {
            i.primary == Intent::ProgressCheck
                && i.context.weight_trend() == WeightTrend::Stable
                && i.context.day_in_phase() > 7
        },
        actions: &[BoostAction::Raise(Intent::Plateau, 0.5)],
    },
    BoostRule {
        name: "night_craving",
        applies: |i| i.primary == Intent::Craving && i.context.time_of_day() == TimeOfDay::Night,
        actions: &[BoostAction::Raise(Intent::Stress, 0.4)],
    },
    BoostRule {
        name: "onboarding_doubt",
        applies: |i| i.primary == Intent::Doubt && i.context.total_days_in_program() < 7,
        actions: &[BoostAction::Dampen { by: 0.15, floor: 0.6 }],
    },
    BoostRule {
        name: "food_mention",
        applies: |i| {
            i.entities.iter().any(|e| e.entity_type == EntityType::Food)
                && !MEAL_INTENTS.contains(&i.primary)
        },
        actions: &[BoostAction::Raise(Intent::LogMeal, 0.5)],
    },
];

/// Applies [`BOOST_RULES`] to a classifier output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBooster;

impl ContextBooster {
    pub fn new() -> Self {
        Self
    }

    /// Returns a new, re-sorted candidate list; the input is left untouched.
    pub fn boost(
        &self,
        candidates: &[DetectedIntent],
        entities: &[ExtractedEntity],
        context: &ConversationContextFull,
    ) -> Vec<DetectedIntent> {
        let mut boosted = candidates.to_vec();
        let Some(primary) = candidates.first().map(|c| c.intent) else {
            return boosted;
        };

        let input = BoostInput {
            primary,
            entities,
            context,
        };

        for rule in BOOST_RULES {
            if !(rule.applies)(&input) {
                continue;
            }
            debug!(rule = rule.name, primary = %primary, "context rule fired");

            for action in rule.actions {
                match *action {
                    BoostAction::Raise(intent, confidence) => {
                        add_or_boost(&mut boosted, intent, confidence);
                    }
                    BoostAction::Dampen { by, floor } => {
                        if let Some(entry) = boosted.iter_mut().find(|c| c.intent == primary) {
                            entry.confidence = floor.max(entry.confidence - by);
                        }
                    }
                }
            }
        }

        sort_by_confidence(&mut boosted);
        boosted
    }
}
