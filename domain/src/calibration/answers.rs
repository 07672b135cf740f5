//! Parsing the model's answers to the open test questions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{"q": ..., "a": ...}` pair returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeAnswer {
    pub q: String,
    #[serde(default)]
    pub a: Value,
}

impl ProbeAnswer {
    pub fn new(q: impl Into<String>, a: impl Into<Value>) -> Self {
        Self {
            q: q.into(),
            a: a.into(),
        }
    }
}

/// Parse the model output into answer pairs.
///
/// Accepts a bare JSON array, the same array wrapped in a Markdown code
/// fence, or an object whose first array-valued field holds the pairs.
pub fn parse_answer_list(text: &str) -> Result<Vec<ProbeAnswer>, DomainError> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DomainError::InvalidAnswerList(format!("{}: {}", e, body)))?;

    let list = match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| DomainError::InvalidAnswerList("object holds no array".to_string()))?,
        other => {
            return Err(DomainError::InvalidAnswerList(format!(
                "expected a list, got {}",
                other
            )));
        }
    };

    list.into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| DomainError::InvalidAnswerList(e.to_string()))
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the first newline
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
