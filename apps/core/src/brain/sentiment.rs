//! Keyword-polarity sentiment scoring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

// NOTE: expect() is acceptable here: static patterns, checked by the tests below.
static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(contente?s?|heureux|heureuse|bien|super|génial|top|cool|fière?|ravie?|merci|j['’]adore|bravo|réussi|motivée?|happy|great|good|awesome|love|proud|thanks)\b",
    )
    .expect("Invalid regex: positive keywords")
});

static NEGATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(triste|fatigu[ée]e?s?|[ée]puis[ée]e?s?|stress(?:[ée]e?s?)?|angoiss[ée]e?s?|anxieux|anxieuse|nulle?|marre|déprimée?s?|frustrée?s?|énervée?s?|déçue?|mal|horrible|difficile|dur|sad|tired|bad|awful|hate|stressed|angry|worried|terrible)\b",
    )
    .expect("Invalid regex: negative keywords")
});

/// Counts positive and negative keyword hits; the larger count wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> Sentiment {
        let positive = POSITIVE_PATTERN.find_iter(text).count();
        let negative = NEGATIVE_PATTERN.find_iter(text).count();

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze("Trop contente, j'ai réussi !"), Sentiment::Positive);
        assert_eq!(analyzer.analyze("Great day, thanks"), Sentiment::Positive);
    }

    #[test]
    fn test_negative() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze("je suis fatigué"), Sentiment::Negative);
        assert_eq!(analyzer.analyze("J'en ai MARRE, c'est horrible"), Sentiment::Negative);
    }

    #[test]
    fn test_neutral_on_tie_and_empty() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze(""), Sentiment::Neutral);
        assert_eq!(analyzer.analyze("j'ai faim"), Sentiment::Neutral);
        assert_eq!(analyzer.analyze("content mais fatigué"), Sentiment::Neutral);
    }

    #[test]
    fn test_counts_every_occurrence() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(
            analyzer.analyze("super super super, un peu stressé"),
            Sentiment::Positive
        );
    }
}
