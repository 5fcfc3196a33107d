//! Error types for MindWell.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MindWellError {
    #[error("Assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Precondition violations raised by the assessment scorer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("expected {expected} answers, got {got}")]
    AnswerCount { expected: usize, got: usize },

    #[error("question {question}: weight {weight} is not one of the offered options")]
    InvalidWeight { question: u8, weight: u8 },
}

pub type Result<T> = std::result::Result<T, MindWellError>;
