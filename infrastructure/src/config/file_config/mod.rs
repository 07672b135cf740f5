//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Secrets are never required in the file: each section names the
//! environment variable that supplies them (`*_env` keys), and an explicit
//! value in the file wins over the variable.

mod exercises;
mod logging;
mod openai;

pub use exercises::{FileCalibrationConfig, FileChatConfig, FileLoginConfig, FileVerifyConfig};
pub use logging::FileLoggingConfig;
pub use openai::{FileHttpConfig, FileOpenAiConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{key} is not set (set it in the config file or export {env})")]
    Missing { key: String, env: String },

    #[error("{key} cannot be 0")]
    ZeroTimeout { key: String },
}

impl ConfigValidationError {
    pub(crate) fn missing(key: &str, env: &str) -> Self {
        ConfigValidationError::Missing {
            key: key.to_string(),
            env: env.to_string(),
        }
    }
}

/// An explicit value wins; otherwise read the named environment variable.
/// Blank values count as unset.
pub(crate) fn value_or_env(value: &Option<String>, env: &str) -> Option<String> {
    value
        .clone()
        .or_else(|| std::env::var(env).ok())
        .filter(|v| !v.trim().is_empty())
}

/// Like [`value_or_env`], failing with the key and variable names.
pub(crate) fn require(
    value: &Option<String>,
    env: &str,
    key: &str,
) -> Result<String, ConfigValidationError> {
    value_or_env(value, env).ok_or_else(|| ConfigValidationError::missing(key, env))
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion API settings
    pub openai: FileOpenAiConfig,
    /// Exercise service HTTP settings
    pub http: FileHttpConfig,
    /// E01 login exercise
    pub login: FileLoginConfig,
    /// E02 robot verification
    pub verify: FileVerifyConfig,
    /// E03 calibration file
    pub calibration: FileCalibrationConfig,
    /// E04 chat service
    pub chat: FileChatConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check the settings every command needs.
    ///
    /// Exercise-specific values (URLs, credentials) are checked by the
    /// section accessors when the exercise runs.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.openai.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                key: "openai.timeout_secs".to_string(),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                key: "http.timeout_secs".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[openai]
api_key_env = "MY_OPENAI_KEY"
base_url = "http://localhost:8080"
timeout_secs = 5

[login]
url = "https://login.example/"
username = "tester"
page_dir = "out/pages"
model = "gpt-4o-mini"

[verify]
endpoint = "https://verify.example/verify"

[calibration]
hub_url = "https://hub.example"
report_url = "https://hub.example/report"

[chat]
bind = "0.0.0.0:8080"
system_prompt = "Answer in Polish."
temperature = 0.5

[logging]
dir = "/tmp/course-logs"
file = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(config.openai.timeout_secs, 5);
        assert_eq!(config.login.username.as_deref(), Some("tester"));
        assert_eq!(config.login.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.verify.endpoint.as_deref(), Some("https://verify.example/verify"));
        assert_eq!(config.chat.bind, "0.0.0.0:8080");
        assert_eq!(config.chat.temperature, Some(0.5));
        assert!(!config.logging.file);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[chat]\nbind = \"127.0.0.1:9000\"\n").unwrap();
        assert_eq!(config.chat.bind, "127.0.0.1:9000");
        // Defaults should apply
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.logging.file);
    }

    #[test]
    fn test_validate_default_config() {
        assert_eq!(FileConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.http.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ZeroTimeout { key }) if key == "http.timeout_secs"
        ));
    }

    #[test]
    fn test_value_or_env_prefers_explicit_value() {
        let value = Some("from-file".to_string());
        assert_eq!(
            value_or_env(&value, "COURSE_TEST_UNSET_VARIABLE").as_deref(),
            Some("from-file")
        );
        assert_eq!(value_or_env(&Some("  ".to_string()), "COURSE_TEST_UNSET_VARIABLE"), None);
    }

    #[test]
    fn test_require_names_key_and_variable() {
        let err = require(&None, "COURSE_TEST_UNSET_VARIABLE", "login.url").unwrap_err();
        assert_eq!(
            err.to_string(),
            "login.url is not set (set it in the config file or export COURSE_TEST_UNSET_VARIABLE)"
        );
    }
}
