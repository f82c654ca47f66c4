//! Grading and normalization error types.
//!
//! Grading only fails on structurally invalid input. Missing or malformed
//! individual answers are ordinary data and never surface here.

use thiserror::Error;

/// Errors raised by the grading engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// The question set is missing, not a list, or empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while normalizing raw quiz payloads into canonical questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The payload was expected to be a JSON array.
    #[error("{what} must be an array, got {found}")]
    NotAList { what: &'static str, found: String },

    /// A required field is absent or has the wrong type.
    #[error("question {index}: missing or invalid field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// The question type tag is not recognised.
    #[error("question {index}: unknown question type `{tag}`")]
    UnknownType { index: usize, tag: String },

    /// A correct answer is neither a letter nor an option index.
    #[error("question {index}: invalid correct answer {value}")]
    InvalidCorrectAnswer { index: usize, value: String },
}

impl From<NormalizeError> for GradingError {
    fn from(err: NormalizeError) -> Self {
        GradingError::InvalidInput(err.to_string())
    }
}
