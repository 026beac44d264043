//! Config Tests
//!
//! Environment overrides and pattern bank files.

use crate::brain::{
    ConversationContextFull, DetectedIntent, EntityType, Intent, IntentDetector, PatternBank,
};
use crate::config::{
    DetectorConfig, ENV_DAILY_LLM_QUOTA, ENV_ESCALATION_THRESHOLD, ENV_ESCALATION_TIMEOUT_MS,
};
use crate::error::AppError;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_from_env_defaults() {
    temp_env::with_vars_unset(
        [ENV_ESCALATION_THRESHOLD, ENV_DAILY_LLM_QUOTA, ENV_ESCALATION_TIMEOUT_MS],
        || {
            let config = DetectorConfig::from_env().unwrap();
            assert_eq!(config, DetectorConfig::default());
        },
    );
}

#[test]
fn test_from_env_overrides() {
    temp_env::with_vars(
        [
            (ENV_ESCALATION_THRESHOLD, Some("0.5")),
            (ENV_DAILY_LLM_QUOTA, Some("5")),
            (ENV_ESCALATION_TIMEOUT_MS, Some(" 1500 ")),
        ],
        || {
            let config = DetectorConfig::from_env().unwrap();
            assert_eq!(config.escalation_confidence_threshold, 0.5);
            assert_eq!(config.daily_llm_quota, 5);
            assert_eq!(config.escalation_timeout(), Duration::from_millis(1500));

            let detector = IntentDetector::new(config);
            assert!(detector
                .gate()
                .should_escalate(&DetectedIntent::new(Intent::Unknown, 0.3), true, 4));
            assert!(!detector
                .gate()
                .should_escalate(&DetectedIntent::new(Intent::Unknown, 0.3), true, 5));
        },
    );
}

#[test]
fn test_from_env_invalid_values() {
    temp_env::with_var(ENV_DAILY_LLM_QUOTA, Some("lots"), || {
        assert!(matches!(DetectorConfig::from_env(), Err(AppError::Config(_))));
    });
    temp_env::with_var(ENV_ESCALATION_THRESHOLD, Some("2.0"), || {
        assert!(matches!(DetectorConfig::from_env(), Err(AppError::Config(_))));
    });
}

#[test]
fn test_pattern_bank_file_rejects_unknown_intent() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "intents": [
                {{"intent": "HYDRATION_REMINDER", "patterns": ["\\bboire\\b"], "confidence": 0.7}},
                {{"intent": "THIRST", "patterns": ["\\bboire\\b"], "confidence": 0.8}}
            ],
            "entities": [
                {{"type": "food", "patterns": ["\\bthé\\b"], "normalizer": "food"}}
            ]
        }}"#
    )
    .unwrap();

    let result = PatternBank::from_file(file.path());
    // unknown intent names are rejected rather than silently dropped
    assert!(result.is_err());
}

#[test]
fn test_pattern_bank_file_drives_detector() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "intents": [
                {{"intent": "THIRST", "patterns": ["\\bboire\\b"], "confidence": 0.8}}
            ],
            "entities": [
                {{"type": "food", "patterns": ["\\bthé\\b"], "normalizer": "food"}}
            ]
        }}"#
    )
    .unwrap();

    let bank = PatternBank::from_file(file.path()).unwrap();
    let detector = IntentDetector::default().with_pattern_bank(Arc::new(bank));
    let result = detector.detect_intent(
        "je veux boire un thé",
        &ConversationContextFull::default(),
        false,
        0,
    );

    assert_eq!(result.primary(), &DetectedIntent::new(Intent::Thirst, 0.8));
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].entity_type, EntityType::Food);
    assert_eq!(result.entities[0].value, "thé");
}

#[test]
fn test_missing_pattern_file() {
    let result = PatternBank::from_file("/nonexistent/patterns.json");
    assert!(matches!(result, Err(AppError::Io(_)) | Err(AppError::Config(_))));
}
