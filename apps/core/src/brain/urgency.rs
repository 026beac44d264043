//! Urgency triage from the post-boost primary intent.

use serde::{Deserialize, Serialize};

use super::context::ConversationContextFull;
use super::intent::Intent;
use super::sentiment::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Decision table; the first matching row wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrgencyCalculator;

impl UrgencyCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        primary: Intent,
        sentiment: Sentiment,
        context: &ConversationContextFull,
    ) -> Urgency {
        let negative = sentiment == Sentiment::Negative;

        match primary {
            Intent::Stress | Intent::Anxiety | Intent::Overwhelm => {
                if negative {
                    Urgency::High
                } else {
                    Urgency::Medium
                }
            }
            Intent::Hunger if context.hours_since_last_meal() > 6.0 => Urgency::High,
            Intent::Fatigue | Intent::LowEnergy => Urgency::Medium,
            Intent::Celebration | Intent::Greeting | Intent::Feedback => Urgency::Low,
            _ if negative => Urgency::Medium,
            _ => Urgency::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ConversationContextFull {
        ConversationContextFull::default()
    }

    #[test]
    fn test_distress_intents() {
        let calc = UrgencyCalculator::new();
        for intent in [Intent::Stress, Intent::Anxiety, Intent::Overwhelm] {
            assert_eq!(calc.calculate(intent, Sentiment::Negative, &ctx()), Urgency::High);
            assert_eq!(calc.calculate(intent, Sentiment::Neutral, &ctx()), Urgency::Medium);
            assert_eq!(calc.calculate(intent, Sentiment::Positive, &ctx()), Urgency::Medium);
        }
    }

    #[test]
    fn test_hunger_after_long_fast() {
        let calc = UrgencyCalculator::new();
        let long_fast = ctx().with_hours_since_last_meal(7.0);
        assert_eq!(calc.calculate(Intent::Hunger, Sentiment::Neutral, &long_fast), Urgency::High);

        let short_fast = ctx().with_hours_since_last_meal(6.0);
        assert_eq!(calc.calculate(Intent::Hunger, Sentiment::Neutral, &short_fast), Urgency::Low);
        assert_eq!(
            calc.calculate(Intent::Hunger, Sentiment::Negative, &short_fast),
            Urgency::Medium
        );
    }

    #[test]
    fn test_energy_intents_medium() {
        let calc = UrgencyCalculator::new();
        assert_eq!(calc.calculate(Intent::Fatigue, Sentiment::Positive, &ctx()), Urgency::Medium);
        assert_eq!(calc.calculate(Intent::LowEnergy, Sentiment::Neutral, &ctx()), Urgency::Medium);
    }

    #[test]
    fn test_light_intents_low_even_when_negative() {
        let calc = UrgencyCalculator::new();
        for intent in [Intent::Celebration, Intent::Greeting, Intent::Feedback] {
            assert_eq!(calc.calculate(intent, Sentiment::Negative, &ctx()), Urgency::Low);
        }
    }

    #[test]
    fn test_fallback_row() {
        let calc = UrgencyCalculator::new();
        assert_eq!(calc.calculate(Intent::Unknown, Sentiment::Neutral, &ctx()), Urgency::Low);
        assert_eq!(calc.calculate(Intent::Plateau, Sentiment::Negative, &ctx()), Urgency::Medium);
    }
}
