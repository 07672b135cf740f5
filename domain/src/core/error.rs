//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("Invalid expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("test-data[{index}] '{question}': {source}")]
    InvalidCalibrationItem {
        index: usize,
        question: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Invalid calibration data: {0}")]
    InvalidCalibrationData(String),

    #[error("Invalid model answer list: {0}")]
    InvalidAnswerList(String),
}

#[cfg(test)]
impl DomainError {
    /// Check if this error came from evaluating an arithmetic expression
    pub(crate) fn is_expression_error(&self) -> bool {
        match self {
            DomainError::InvalidExpression { .. } | DomainError::DivisionByZero(_) => true,
            DomainError::InvalidCalibrationItem { source, .. } => source.is_expression_error(),
            _ => false,
        }
    }
}
