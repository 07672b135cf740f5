//! Wire types of the Responses API (`/v1/responses`).
//!
//! Private to the gateway; callers only see domain types.

use course_domain::{CompletionRequest, TokenUsage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    store: bool,
    text: TextOptions,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a CompletionRequest> for ResponsesRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: request.model.as_str(),
            input: request
                .messages
                .iter()
                .map(|m| InputMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            store: request.store,
            text: TextOptions {
                format: TextFormat {
                    kind: request.format.as_str(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsesResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<UsageData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsageData {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<UsageData> for TokenUsage {
    fn from(u: UsageData) -> Self {
        TokenUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

impl ResponsesResponse {
    /// Concatenation of every `output_text` part of every `message` item
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_domain::{Model, ResponseFormat};

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest::system_and_user(Model::Gpt41Nano, "sys", "q")
            .with_temperature(1.0)
            .with_max_output_tokens(50)
            .with_store(true)
            .with_format(ResponseFormat::Text);
        let body = serde_json::to_value(ResponsesRequest::from(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4.1-nano");
        assert_eq!(body["input"][0]["role"], "system");
        assert_eq!(body["input"][1]["content"], "q");
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["max_output_tokens"], 50);
        assert_eq!(body["store"], true);
        assert_eq!(body["text"]["format"]["type"], "text");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let request = CompletionRequest::system_and_user(Model::from("o3-mini"), "sys", "q");
        let body = serde_json::to_value(ResponsesRequest::from(&request)).unwrap();
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_output_tokens").is_none());
    }

    #[test]
    fn test_output_text_joins_message_parts() {
        let response: ResponsesResponse = serde_json::from_str(
            r#"{
                "model": "gpt-4.1-nano",
                "output": [
                    {"type": "reasoning", "content": [{"type": "output_text", "text": "skip"}]},
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "14"},
                        {"type": "refusal", "refusal": "no"},
                        {"type": "output_text", "text": "10"}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.output_text(), "1410");
    }
}
