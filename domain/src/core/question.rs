//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question fetched from an exercise service (Value Object)
///
/// Extracted once from an HTTP response and never mutated afterwards.
/// The content is kept exactly as extracted; only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        Ok(Self { content })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("When did the Battle of Grunwald take place?").unwrap();
        assert_eq!(q.content(), "When did the Battle of Grunwald take place?");
    }

    #[test]
    fn test_question_keeps_surrounding_whitespace() {
        let q = Question::new(" Year? ").unwrap();
        assert_eq!(q.content(), " Year? ");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert_eq!(Question::new(""), Err(DomainError::EmptyQuestion));
        assert_eq!(Question::new("  \n "), Err(DomainError::EmptyQuestion));
    }

    #[test]
    fn test_question_deserialize_rejects_empty() {
        let result: Result<Question, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
