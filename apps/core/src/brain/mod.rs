//! # Brain Module
//!
//! Fast, deterministic intent detection for the wellness coach.
//! Analyzes a user message with its conversation context BEFORE any
//! generative model is involved.
//!
//! ## Components
//! - `patterns`: Pattern Rule Bank (intent and entity regex tables)
//! - `classifier`: Rule-based intent classification
//! - `entities`: Entity extraction
//! - `sentiment`: Keyword-polarity sentiment
//! - `context`: Conversation context supplied by the caller
//! - `booster`: Context boost / reclassification rules
//! - `urgency`: Urgency decision table
//! - `escalation`: LLM escalation gate
//! - `result`: Output data structure
//! - `detector`: Main orchestrator

pub mod booster;
pub mod classifier;
pub mod context;
pub mod detector;
pub mod entities;
pub mod escalation;
pub mod intent;
pub mod patterns;
pub mod result;
pub mod sentiment;
pub mod urgency;

pub use booster::{BoostAction, BoostRule, ContextBooster, BOOST_RULES};
pub use classifier::{RuleClassifier, UNKNOWN_CONFIDENCE};
pub use context::{
    BehavioralContext, ConversationContextFull, ProgramContext, StressEatingCorrelation,
    TemporalContext, TimeOfDay, WeightTrend, WellnessContext,
};
pub use detector::{Detection, EscalationStatus, IntentDetector};
pub use entities::{EntityExtractor, ExtractedEntity};
pub use escalation::{
    DeclineReason, EscalationContext, EscalationDecision, EscalationGate, EscalationRequest,
};
pub use intent::{DetectedIntent, Intent};
pub use patterns::{EntityRule, EntityType, IntentRule, Normalizer, PatternBank, PatternBankSpec};
pub use result::{IntentDetectionResult, TOP_INTENTS};
pub use sentiment::{Sentiment, SentimentAnalyzer};
pub use urgency::{Urgency, UrgencyCalculator};
