//! Completion API and HTTP client configuration (`[openai]`, `[http]`)

use super::{ConfigValidationError, require};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the API; `/v1/responses` is appended.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Result<String, ConfigValidationError> {
        require(&self.api_key, &self.api_key_env, "openai.api_key")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP settings for the exercise services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl FileHttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_api_key() {
        let config = FileOpenAiConfig {
            api_key: Some("sk-file".to_string()),
            api_key_env: "COURSE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "sk-file");
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let config = FileOpenAiConfig {
            api_key_env: "COURSE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_key(),
            Err(ConfigValidationError::Missing {
                key: "openai.api_key".to_string(),
                env: "COURSE_TEST_NO_SUCH_KEY".to_string(),
            })
        );
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(FileOpenAiConfig::default().timeout(), Duration::from_secs(30));
        assert_eq!(FileHttpConfig::default().timeout(), Duration::from_secs(10));
    }
}
