//! Conversation context supplied by the caller.
//!
//! Read-only for the pipeline. Every field has a neutral default so a partial
//! JSON payload deserializes instead of failing: numbers default to 0 and
//! enums to their `Unknown` variant.

use serde::{Deserialize, Serialize};

/// Time-of-day bucket of the user's local clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TimeOfDay {
    /// Buckets a local hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            22..=23 | 0..=4 => TimeOfDay::Night,
            _ => TimeOfDay::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTrend {
    Losing,
    Stable,
    Gaining,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemporalContext {
    pub hours_since_last_meal: f32,
    pub time_of_day: TimeOfDay,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WellnessContext {
    pub weight_trend: WeightTrend,
    /// Self-reported mood, 0-10
    pub mood_score: f32,
    pub sleep_hours: f32,
}

/// A recorded link between a stress trigger and eating behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StressEatingCorrelation {
    pub trigger: String,
    /// Correlation strength (0.0 - 1.0)
    pub strength: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehavioralContext {
    pub stress_eating_correlations: Vec<StressEatingCorrelation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramContext {
    pub current_phase: Option<String>,
    pub day_in_phase: u32,
    pub total_days_in_program: u32,
}

/// Everything the pipeline may read about the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationContextFull {
    pub temporal: TemporalContext,
    pub wellness: WellnessContext,
    pub behavioral: BehavioralContext,
    pub program: ProgramContext,
}

impl ConversationContextFull {
    /// Hours since the last logged meal; negative or NaN input reads as 0.
    pub fn hours_since_last_meal(&self) -> f32 {
        let hours = self.temporal.hours_since_last_meal;
        if hours.is_finite() && hours > 0.0 {
            hours
        } else {
            0.0
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.temporal.time_of_day
    }

    pub fn weight_trend(&self) -> WeightTrend {
        self.wellness.weight_trend
    }

    pub fn has_stress_eating_pattern(&self) -> bool {
        !self.behavioral.stress_eating_correlations.is_empty()
    }

    pub fn day_in_phase(&self) -> u32 {
        self.program.day_in_phase
    }

    pub fn total_days_in_program(&self) -> u32 {
        self.program.total_days_in_program
    }

    pub fn with_hours_since_last_meal(mut self, hours: f32) -> Self {
        self.temporal.hours_since_last_meal = hours;
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.temporal.time_of_day = time_of_day;
        self
    }

    pub fn with_weight_trend(mut self, trend: WeightTrend) -> Self {
        self.wellness.weight_trend = trend;
        self
    }

    pub fn with_stress_eating(mut self, trigger: &str, strength: f32) -> Self {
        self.behavioral
            .stress_eating_correlations
            .push(StressEatingCorrelation {
                trigger: trigger.to_string(),
                strength,
            });
        self
    }

    pub fn with_program_days(mut self, day_in_phase: u32, total_days: u32) -> Self {
        self.program.day_in_phase = day_in_phase;
        self.program.total_days_in_program = total_days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_neutral_defaults() {
        let ctx: ConversationContextFull =
            serde_json::from_str(r#"{"temporal": {"timeOfDay": "morning"}}"#).unwrap();

        assert_eq!(ctx.time_of_day(), TimeOfDay::Morning);
        assert_eq!(ctx.hours_since_last_meal(), 0.0);
        assert_eq!(ctx.weight_trend(), WeightTrend::Unknown);
        assert_eq!(ctx.total_days_in_program(), 0);
        assert!(!ctx.has_stress_eating_pattern());
    }

    #[test]
    fn test_unrecognized_enum_value_is_unknown() {
        let ctx: ConversationContextFull = serde_json::from_str(
            r#"{"temporal": {"timeOfDay": "dawn"}, "wellness": {"weightTrend": "wobbly"}}"#,
        )
        .unwrap();

        assert_eq!(ctx.time_of_day(), TimeOfDay::Unknown);
        assert_eq!(ctx.weight_trend(), WeightTrend::Unknown);
    }

    #[test]
    fn test_empty_object() {
        let ctx: ConversationContextFull = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx, ConversationContextFull::default());
    }

    #[test]
    fn test_invalid_hours_read_as_zero() {
        let ctx = ConversationContextFull::default().with_hours_since_last_meal(f32::NAN);
        assert_eq!(ctx.hours_since_last_meal(), 0.0);

        let ctx = ConversationContextFull::default().with_hours_since_last_meal(-3.0);
        assert_eq!(ctx.hours_since_last_meal(), 0.0);
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(7), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(13), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(30), TimeOfDay::Unknown);
    }
}
