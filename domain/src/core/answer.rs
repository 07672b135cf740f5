//! Answer value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// An answer produced by one completion call (Value Object)
///
/// Forwarded to the submission call exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Answer {
    content: String,
}

impl Answer {
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyAnswer);
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Answer {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Answer::new(s)
    }
}

impl From<Answer> for String {
    fn from(a: Answer) -> Self {
        a.content
    }
}
