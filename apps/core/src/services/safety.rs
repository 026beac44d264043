//! Safety-check data exchanged with the content filter.

use serde::{Deserialize, Serialize};

use super::traits::SafetyChecker;
use crate::brain::context::ConversationContextFull;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetySeverity {
    Info,
    Warning,
    Critical,
}

/// A concern raised by the safety filter, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFlag {
    /// Filter-defined code, e.g. `"eating_disorder_risk"`
    pub code: String,
    pub severity: SafetySeverity,
}

impl SafetyFlag {
    pub fn new(code: impl Into<String>, severity: SafetySeverity) -> Self {
        Self {
            code: code.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    pub flags: Vec<SafetyFlag>,
}

/// Checker that never raises a flag, for hosts without a safety service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSafetyChecker;

impl SafetyChecker for NoopSafetyChecker {
    fn check_input(
        &self,
        _message: &str,
        _context: &ConversationContextFull,
    ) -> Result<SafetyCheck, AppError> {
        Ok(SafetyCheck::default())
    }
}
