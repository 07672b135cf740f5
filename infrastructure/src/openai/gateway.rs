//! LLM Gateway implementation for the OpenAI Responses API

use super::wire::{ErrorEnvelope, ResponsesRequest, ResponsesResponse};
use async_trait::async_trait;
use course_application::ports::llm_gateway::{GatewayError, LlmGateway};
use course_domain::{CompletionRequest, LlmResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// LLM Gateway talking to `POST {base_url}/v1/responses`.
///
/// Constructed once at startup; `reqwest::Client` is cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenAiGateway {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiGateway {
    /// Build a gateway with its own HTTP client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/responses", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn respond(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError> {
        let body = ResponsesRequest::from(request);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            temperature = ?request.temperature,
            "Sending completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&body)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "Full completion request payload");
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.endpoint, error = %e, "Completion request failed (transport)");
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            error!(status = status.as_u16(), "Completion API error: {}", message);
            return Err(GatewayError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ResponsesResponse =
            serde_json::from_str(&text).map_err(|e| GatewayError::DecodeError(e.to_string()))?;

        let answer = parsed.output_text();
        if answer.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        debug!(bytes = answer.len(), "Received completion");

        let mut response = LlmResponse::new(answer);
        if let Some(model) = parsed.model {
            response = response.with_model(model);
        }
        if let Some(usage) = parsed.usage {
            response = response.with_usage(usage.into());
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_domain::Model;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(server: &MockServer) -> OpenAiGateway {
        OpenAiGateway::new("sk-test", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::system_and_user(Model::Gpt41Nano, "You are a historian.", "Grunwald?")
    }

    #[tokio::test]
    async fn test_respond_extracts_output_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4.1-nano",
                "input": [
                    {"role": "system", "content": "You are a historian."},
                    {"role": "user", "content": "Grunwald?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-4.1-nano-2025-04-14",
                "output": [{
                    "type": "message",
                    "content": [{"type": "output_text", "text": "1410"}]
                }],
                "usage": {"input_tokens": 20, "output_tokens": 2, "total_tokens": 22}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = gateway(&server).respond(&request()).await.unwrap();

        assert_eq!(response.text, "1410");
        assert_eq!(response.model.as_deref(), Some("gpt-4.1-nano-2025-04-14"));
        assert_eq!(response.usage.unwrap().total_tokens, 22);
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).respond(&request()).await.unwrap_err();

        assert!(err.is_unauthorized());
        match err {
            GatewayError::ApiError { message, .. } => {
                assert_eq!(message, "Incorrect API key provided")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = gateway(&server).respond(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_no_text_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output": []})))
            .mount(&server)
            .await;

        let err = gateway(&server).respond(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let gateway =
            OpenAiGateway::new("sk", "http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = gateway.respond(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway =
            OpenAiGateway::new("sk", "https://api.openai.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.endpoint, "https://api.openai.com/v1/responses");
    }
}
