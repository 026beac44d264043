//! Conversational intent detection for the wellness coach.
//!
//! Turns a free-text message plus conversation context into ranked intents,
//! entities, sentiment, urgency and safety flags, and decides whether an
//! ambiguous message deserves a generative re-ranking.

pub mod brain;
pub mod config;
pub mod error;
pub mod quota;
pub mod services;

pub use brain::{
    ConversationContextFull, DetectedIntent, Detection, IntentDetectionResult, IntentDetector,
    Intent,
};
pub use config::DetectorConfig;
pub use error::AppError;
pub use quota::LlmQuota;

#[cfg(test)]
mod tests;
