//! Login flow exercise (E01).
//!
//! A login form guarded by a dynamic "are you human" question. The question
//! is scraped from the page, answered by the model, and posted back with the
//! credentials. The secret page that follows may carry `{{...}}` flags.

use crate::core::{answer::Answer, question::Question};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Label the login page puts in front of the question text
pub const QUESTION_LABEL: &str = "Question:";

/// HTML id of the element holding the question
pub const QUESTION_ELEMENT_ID: &str = "human-question";

static FLAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(.*?)\}\}").expect("flag pattern is a valid regex")
});

/// Remove the leading `Question:` label from the scraped element text.
///
/// Text without the label is returned trimmed but otherwise unchanged.
pub fn strip_question_label(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.get(..QUESTION_LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(QUESTION_LABEL) => {
            trimmed[QUESTION_LABEL.len()..].trim_start()
        }
        _ => trimmed,
    }
}

/// Every `{{...}}` segment of a page, in order of appearance
pub fn extract_flags(page: &str) -> Vec<String> {
    FLAG_PATTERN
        .captures_iter(page)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Credentials for the login form
#[derive(Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// URL-encoded body of the login POST
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub answer: &'a str,
}

impl<'a> LoginForm<'a> {
    pub fn new(credentials: &'a LoginCredentials, answer: &'a Answer) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
            answer: answer.content(),
        }
    }
}

/// Page returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPage {
    /// Final URL after redirects
    pub url: String,
    pub body: String,
}

/// Result of a full login run
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub question: Question,
    pub answer: Answer,
    pub page_url: String,
    pub saved_page: Option<PathBuf>,
    pub flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_question_label() {
        assert_eq!(
            strip_question_label("Question:Rok lądowania na Księżycu?"),
            "Rok lądowania na Księżycu?"
        );
        assert_eq!(
            strip_question_label("  Question:\n  When was the Battle of Grunwald?  "),
            "When was the Battle of Grunwald?"
        );
    }

    #[test]
    fn test_strip_question_label_absent() {
        assert_eq!(strip_question_label("What year?"), "What year?");
        assert_eq!(strip_question_label("Q?"), "Q?");
    }

    #[test]
    fn test_strip_question_label_multibyte_prefix() {
        // A multibyte character straddling the label length must not panic
        assert_eq!(strip_question_label("Pytanie: źródło"), "Pytanie: źródło");
        assert_eq!(strip_question_label("żżżżż?"), "żżżżż?");
    }

    #[test]
    fn test_extract_flags() {
        let page = "<p>{{FLG:FIRST}}</p><div>nothing</div><span>{{FLG:SECOND}}</span>";
        assert_eq!(extract_flags(page), vec!["FLG:FIRST", "FLG:SECOND"]);
    }

    #[test]
    fn test_extract_flags_non_greedy_and_empty() {
        assert_eq!(extract_flags("{{a}} and {{b}}"), vec!["a", "b"]);
        assert!(extract_flags("no flags {here}").is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = LoginCredentials::new("tester", "574e112a");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("tester"));
        assert!(!debug.contains("574e112a"));
    }

    #[test]
    fn test_login_form_fields() {
        let creds = LoginCredentials::new("tester", "secret");
        let answer = Answer::new("1969").unwrap();
        let form = LoginForm::new(&creds, &answer);
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["username"], "tester");
        assert_eq!(value["password"], "secret");
        assert_eq!(value["answer"], "1969");
    }
}
