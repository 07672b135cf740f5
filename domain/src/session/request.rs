//! Completion request value object

use super::entities::Message;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Output format requested from the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Text,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
        }
    }
}

/// A single completion call: model, messages and sampling parameters.
///
/// Built once per exercise step and handed to the gateway unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub store: bool,
    pub format: ResponseFormat,
}

impl CompletionRequest {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            messages: Vec::new(),
            temperature: None,
            max_output_tokens: None,
            store: false,
            format: ResponseFormat::Text,
        }
    }

    /// Shorthand for the common system + user pair
    pub fn system_and_user(
        model: Model,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self::new(model)
            .with_message(Message::system(system_prompt))
            .with_message(Message::user(user_message))
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// The last user message, if any
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == super::entities::Role::User)
            .map(|m| m.content.as_str())
    }
}
