//! Completion parameters per exercise.
//!
//! [`LlmParams`] groups the model and sampling settings a use case turns into
//! a [`CompletionRequest`]. Each exercise has its own defaults; the
//! presentation layer overrides them from configuration or CLI flags.

use course_domain::{CompletionRequest, Message, Model, ResponseFormat};
use serde::{Deserialize, Serialize};

/// Model and sampling parameters for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmParams {
    pub model: Model,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Ask the API to keep the response for later inspection.
    pub store: bool,
    pub format: ResponseFormat,
}

impl Default for LlmParams {
    fn default() -> Self {
        Self {
            model: Model::Gpt41Nano,
            temperature: None,
            max_output_tokens: None,
            store: false,
            format: ResponseFormat::Text,
        }
    }
}

impl LlmParams {
    /// Login question: a single year, stored
    pub fn login() -> Self {
        Self {
            model: Model::Gpt41Nano,
            temperature: Some(1.0),
            max_output_tokens: Some(50),
            store: true,
            format: ResponseFormat::Text,
        }
    }

    /// Robot verification: short English answers
    pub fn verify() -> Self {
        Self {
            model: Model::Gpt4,
            temperature: Some(1.0),
            max_output_tokens: Some(50),
            store: false,
            format: ResponseFormat::Text,
        }
    }

    /// Calibration questions: a JSON list of `{q, a}` pairs
    pub fn calibration() -> Self {
        Self {
            model: Model::Gpt41Nano,
            temperature: Some(1.0),
            max_output_tokens: Some(100),
            store: false,
            format: ResponseFormat::Text,
        }
    }

    /// Chat service: deterministic, long answers allowed
    pub fn chat() -> Self {
        Self {
            model: Model::Gpt41Nano,
            temperature: Some(0.0),
            max_output_tokens: Some(4096),
            store: false,
            format: ResponseFormat::Text,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: Option<u32>) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Build the request for the given messages.
    ///
    /// Temperature is dropped for models that reject it.
    pub fn request(&self, messages: impl IntoIterator<Item = Message>) -> CompletionRequest {
        let mut request = CompletionRequest::new(self.model.clone())
            .with_messages(messages)
            .with_store(self.store)
            .with_format(self.format);
        if let Some(t) = self.temperature.filter(|_| self.model.supports_temperature()) {
            request = request.with_temperature(t);
        }
        if let Some(max) = self.max_output_tokens {
            request = request.with_max_output_tokens(max);
        }
        request
    }

    /// System prompt plus one user message
    pub fn system_and_user(&self, system: &str, user: &str) -> CompletionRequest {
        self.request([Message::system(system), Message::user(user)])
    }
}
