//! Per-exercise configuration (`[login]`, `[verify]`, `[calibration]`, `[chat]`)
//!
//! Every exercise accepts a `model` override; everything else mirrors the
//! inputs the exercise needs. Service URLs and secrets fall back to the
//! environment variables named by the `*_env` keys.

use super::{ConfigValidationError, require, value_or_env};
use course_application::LlmParams;
use course_domain::{LoginCredentials, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn with_model(params: LlmParams, model: &Option<String>) -> LlmParams {
    match model {
        Some(name) if !name.trim().is_empty() => params.with_model(Model::from(name.as_str())),
        _ => params,
    }
}

/// E01 login exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoginConfig {
    pub url: Option<String>,
    pub url_env: String,
    pub username: Option<String>,
    pub username_env: String,
    /// Direct password (not recommended, use the env var instead).
    pub password: Option<String>,
    pub password_env: String,
    /// Directory where the page reached after login is saved
    pub page_dir: PathBuf,
    pub model: Option<String>,
}

impl Default for FileLoginConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_env: "LOGIN_URL_s01e01".to_string(),
            username: None,
            username_env: "USERNAME_s01e01".to_string(),
            password: None,
            password_env: "PASSWORD_s01e01".to_string(),
            page_dir: PathBuf::from("pages"),
            model: None,
        }
    }
}

impl FileLoginConfig {
    pub fn resolve_url(&self) -> Result<String, ConfigValidationError> {
        require(&self.url, &self.url_env, "login.url")
    }

    pub fn resolve_credentials(&self) -> Result<LoginCredentials, ConfigValidationError> {
        let username = require(&self.username, &self.username_env, "login.username")?;
        let password = require(&self.password, &self.password_env, "login.password")?;
        Ok(LoginCredentials::new(username, password))
    }

    pub fn llm_params(&self) -> LlmParams {
        with_model(LlmParams::login(), &self.model)
    }
}

/// E02 robot verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVerifyConfig {
    pub endpoint: Option<String>,
    pub endpoint_env: String,
    pub model: Option<String>,
}

impl Default for FileVerifyConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            endpoint_env: "ENDPOINT_s01e02".to_string(),
            model: None,
        }
    }
}

impl FileVerifyConfig {
    pub fn resolve_endpoint(&self) -> Result<String, ConfigValidationError> {
        require(&self.endpoint, &self.endpoint_env, "verify.endpoint")
    }

    pub fn llm_params(&self) -> LlmParams {
        with_model(LlmParams::verify(), &self.model)
    }
}

/// E03 calibration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCalibrationConfig {
    pub hub_url: Option<String>,
    pub hub_url_env: String,
    /// Key used in the download URL and the report
    pub api_key: Option<String>,
    pub api_key_env: String,
    /// Report endpoint; `{hub_url}/report` when unset
    pub report_url: Option<String>,
    pub report_url_env: String,
    /// Directory where the downloaded file is kept
    pub download_dir: PathBuf,
    pub model: Option<String>,
}

impl Default for FileCalibrationConfig {
    fn default() -> Self {
        Self {
            hub_url: None,
            hub_url_env: "AGENT_HQ".to_string(),
            api_key: None,
            api_key_env: "MY_POLIGON_KEY".to_string(),
            report_url: None,
            report_url_env: "REPORT_ENDPOINT".to_string(),
            download_dir: PathBuf::from("downloads"),
            model: None,
        }
    }
}

impl FileCalibrationConfig {
    pub fn resolve_hub_url(&self) -> Result<String, ConfigValidationError> {
        require(&self.hub_url, &self.hub_url_env, "calibration.hub_url")
    }

    pub fn resolve_api_key(&self) -> Result<String, ConfigValidationError> {
        require(&self.api_key, &self.api_key_env, "calibration.api_key")
    }

    /// `None` means the hub's default report endpoint
    pub fn resolve_report_url(&self) -> Option<String> {
        value_or_env(&self.report_url, &self.report_url_env)
    }

    pub fn llm_params(&self) -> LlmParams {
        with_model(LlmParams::calibration(), &self.model)
    }
}

/// E04 chat service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Listen address
    pub bind: String,
    /// System prompt prepended to every conversation
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// JSONL file receiving the request traces
    pub trace_file: PathBuf,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            system_prompt: None,
            model: None,
            temperature: None,
            max_output_tokens: None,
            trace_file: PathBuf::from("traces/chat.jsonl"),
        }
    }
}

impl FileChatConfig {
    pub fn llm_params(&self) -> LlmParams {
        let mut params = with_model(LlmParams::chat(), &self.model);
        if let Some(t) = self.temperature {
            params = params.with_temperature(Some(t));
        }
        if let Some(max) = self.max_output_tokens {
            params = params.with_max_output_tokens(Some(max));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_resolves_from_file_values() {
        let config = FileLoginConfig {
            url: Some("https://login.example/".to_string()),
            username: Some("tester".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_url().unwrap(), "https://login.example/");
        let credentials = config.resolve_credentials().unwrap();
        assert_eq!(credentials.username, "tester");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_login_missing_password() {
        let config = FileLoginConfig {
            username: Some("tester".to_string()),
            password_env: "COURSE_TEST_NO_SUCH_PASSWORD".to_string(),
            ..Default::default()
        };
        let err = config.resolve_credentials().unwrap_err();
        assert!(matches!(err, ConfigValidationError::Missing { key, .. } if key == "login.password"));
    }

    #[test]
    fn test_model_override() {
        let config = FileVerifyConfig {
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        assert_eq!(config.llm_params().model, Model::Gpt4o);
        assert_eq!(FileVerifyConfig::default().llm_params().model, Model::Gpt4);
    }

    #[test]
    fn test_chat_params_keep_presets_unless_set() {
        let params = FileChatConfig::default().llm_params();
        assert_eq!(params, LlmParams::chat());

        let tuned = FileChatConfig {
            temperature: Some(0.7),
            max_output_tokens: Some(256),
            ..Default::default()
        }
        .llm_params();
        assert_eq!(tuned.temperature, Some(0.7));
        assert_eq!(tuned.max_output_tokens, Some(256));
    }

    #[test]
    fn test_calibration_report_url_optional() {
        let config = FileCalibrationConfig {
            report_url_env: "COURSE_TEST_NO_SUCH_REPORT".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_report_url(), None);
    }
}
