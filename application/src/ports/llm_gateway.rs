//! LLM Gateway port
//!
//! Defines the interface for communicating with the completion API.

use async_trait::async_trait;
use course_domain::{CompletionRequest, LlmResponse};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the API rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::ApiError { status: 401, .. })
    }
}

/// Gateway for LLM communication
///
/// One call, one response: the exercises never hold a session open.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a completion request and return the extracted answer text
    async fn respond(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError>;
}
