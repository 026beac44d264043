//! Detector configuration.
//!
//! Defaults match the production policy; every value can be overridden from
//! the environment (a `.env` file is honored) or from JSON.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

pub const ENV_ESCALATION_THRESHOLD: &str = "INTENT_ESCALATION_THRESHOLD";
pub const ENV_DAILY_LLM_QUOTA: &str = "INTENT_DAILY_LLM_QUOTA";
pub const ENV_ESCALATION_TIMEOUT_MS: &str = "INTENT_ESCALATION_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DetectorConfig {
    /// Below this top confidence a premium user may be escalated
    #[validate(range(min = 0.0, max = 1.0))]
    pub escalation_confidence_threshold: f32,

    /// Re-ranking calls allowed per user per day
    pub daily_llm_quota: u32,

    /// Upper bound on one re-ranking call
    #[validate(range(min = 1, max = 60_000))]
    pub escalation_timeout_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            escalation_confidence_threshold: 0.6,
            daily_llm_quota: 20,
            escalation_timeout_ms: 3_000,
        }
    }
}

fn read_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", name, raw))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Config(format!("{}: {}", name, e))),
    }
}

impl DetectorConfig {
    /// Loads the defaults, overridden by `INTENT_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(threshold) = read_var(ENV_ESCALATION_THRESHOLD)? {
            config.escalation_confidence_threshold = threshold;
        }
        if let Some(quota) = read_var(ENV_DAILY_LLM_QUOTA)? {
            config.daily_llm_quota = quota;
        }
        if let Some(timeout_ms) = read_var(ENV_ESCALATION_TIMEOUT_MS)? {
            config.escalation_timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn escalation_timeout(&self) -> Duration {
        Duration::from_millis(self.escalation_timeout_ms)
    }
}
