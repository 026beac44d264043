use std::io;
use thiserror::Error;

/// Crate-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents configuration errors (bad environment value, unreadable file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., a confidence outside [0, 1]).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents a pattern that failed to compile into a regex.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Represents a failure reported by an external collaborator
    /// (safety checker, re-ranking model).
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Pattern(s) => AppError::Pattern(s.clone()),
            AppError::Collaborator(s) => AppError::Collaborator(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}
