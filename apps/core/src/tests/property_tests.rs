//! Property Tests
//!
//! Invariants that hold for every message: generated Unicode strings,
//! vocabulary-heavy phrases and generated contexts, plus a fixed corpus of
//! regression messages.

use crate::brain::{
    ConversationContextFull, DetectedIntent, IntentDetectionResult, IntentDetector, TimeOfDay,
    WeightTrend, TOP_INTENTS,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::thread;

const CORPUS: &[&str] = &[
    "",
    "   ",
    "j'ai faim",
    "je n'ai pas faim",
    "je suis fatigué",
    "pizza",
    "Bonjour ! J'ai mangé 200g de poulet et une salade ce midi",
    "je suis stressée au travail, envie de chocolat ce soir",
    "Pourquoi tu me proposes ce repas ?",
    "je stagne depuis 2 semaines, mes progrès sont nuls",
    "coup de barre à 16h, je grignote des biscuits",
    "I'm starving and so tired, what should I eat?",
    "je doute que ça marche",
    "commencer un défi !",
    "😀😀 émojis et accents: déjà-vu, naïve, œufs",
    "FAIM FAIM FAIM",
];

/// Words that trigger intent and entity rules, so generated phrases exercise
/// the boost table rather than only the UNKNOWN fallback.
const VOCABULARY: &[&str] = &[
    "j'ai", "faim", "pas", "soif", "fatigué", "stressée", "envie", "de", "chocolat", "pizza",
    "poulet", "200g", "ce", "soir", "16h", "mangé", "progrès", "plateau", "doute", "bonjour",
    "merci", "aide", "défi", "c'est", "trop", "bon", "perdre", "du", "poids", "triste", "œufs",
    "coup", "barre", "Hungry", "tired", "ÉPUISÉE", "😀", "’", "  ",
];

fn message_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "\\PC{0,80}",
        prop::collection::vec(prop::sample::select(VOCABULARY), 0..10)
            .prop_map(|words| words.join(" ")),
    ]
}

fn hours_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        Just(f32::NAN),
        Just(f32::NEG_INFINITY),
        Just(f32::INFINITY),
        -48.0f32..48.0,
        any::<f32>(),
    ]
}

fn context_strategy() -> impl Strategy<Value = ConversationContextFull> {
    (
        hours_strategy(),
        prop::sample::select(vec![
            TimeOfDay::Morning,
            TimeOfDay::Afternoon,
            TimeOfDay::Evening,
            TimeOfDay::Night,
            TimeOfDay::Unknown,
        ]),
        prop::sample::select(vec![
            WeightTrend::Losing,
            WeightTrend::Stable,
            WeightTrend::Gaining,
            WeightTrend::Unknown,
        ]),
        any::<bool>(),
        0u32..40,
        0u32..40,
    )
        .prop_map(|(hours, time_of_day, trend, stress_eating, day, total)| {
            let ctx = ConversationContextFull::default()
                .with_hours_since_last_meal(hours)
                .with_time_of_day(time_of_day)
                .with_weight_trend(trend)
                .with_program_days(day, total);
            if stress_eating {
                ctx.with_stress_eating("travail", 0.7)
            } else {
                ctx
            }
        })
}

fn check_slots(result: &IntentDetectionResult) -> Result<(), TestCaseError> {
    prop_assert_eq!(result.top_intents.len(), TOP_INTENTS);
    for pair in result.top_intents.windows(2) {
        prop_assert!(
            pair[0].confidence >= pair[1].confidence,
            "unsorted: {:?}",
            result.top_intents
        );
    }
    for slot in &result.top_intents {
        prop_assert!((0.0..=1.0).contains(&slot.confidence));
    }

    let real: Vec<_> = result
        .top_intents
        .iter()
        .filter(|slot| **slot != DetectedIntent::empty_slot())
        .collect();
    let distinct: HashSet<_> = real.iter().map(|slot| slot.intent).collect();
    prop_assert_eq!(distinct.len(), real.len(), "duplicate intent: {:?}", result.top_intents);
    Ok(())
}

fn check_entities(message: &str, result: &IntentDetectionResult) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for entity in &result.entities {
        prop_assert!(
            seen.insert((entity.entity_type, entity.value.to_lowercase())),
            "duplicate entity {:?}",
            entity
        );
        let (start, end) = entity.position;
        prop_assert!(start < end && end <= message.len());
        prop_assert_eq!(&message[start..end], entity.value.as_str());
    }
    Ok(())
}

proptest! {
    #[test]
    fn always_three_descending_distinct_slots(
        message in message_strategy(),
        ctx in context_strategy(),
    ) {
        let result = IntentDetector::default().detect_intent(&message, &ctx, false, 0);
        check_slots(&result)?;
    }

    #[test]
    fn entity_spans_match_message(message in message_strategy()) {
        let result = IntentDetector::default().detect_intent(
            &message,
            &ConversationContextFull::default(),
            false,
            0,
        );
        check_entities(&message, &result)?;
    }

    #[test]
    fn detection_is_deterministic(
        message in message_strategy(),
        ctx in context_strategy(),
        premium in any::<bool>(),
        calls in 0u32..30,
    ) {
        let detector = IntentDetector::default();
        let first = detector.detect_intent(&message, &ctx, premium, calls);
        let second = detector.detect_intent(&message, &ctx, premium, calls);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_corpus_regressions() {
    let detector = IntentDetector::default();
    let contexts = [
        ConversationContextFull::default(),
        ConversationContextFull::default()
            .with_hours_since_last_meal(7.0)
            .with_time_of_day(TimeOfDay::Morning),
        ConversationContextFull::default()
            .with_time_of_day(TimeOfDay::Night)
            .with_stress_eating("travail", 0.8),
        ConversationContextFull::default().with_hours_since_last_meal(f32::NAN),
    ];

    for ctx in &contexts {
        for message in CORPUS {
            let result = detector.detect_intent(message, ctx, false, 0);
            check_slots(&result).unwrap();
            check_entities(message, &result).unwrap();
        }
    }
}

#[test]
fn test_shared_detector_across_threads() {
    let detector = IntentDetector::default();
    let ctx = ConversationContextFull::default();
    let expected: Vec<_> = CORPUS
        .iter()
        .map(|m| detector.detect_intent(m, &ctx, false, 0))
        .collect();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (message, want) in CORPUS.iter().zip(&expected) {
                    assert_eq!(&detector.detect_intent(message, &ctx, false, 0), want);
                }
            });
        }
    });
}
