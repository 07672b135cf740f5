//! Run Chat use case (E04).
//!
//! Answers one chat request with a single completion and records the
//! exchange as `trace` / `span` / `generation` / `trace_end` events.

use crate::config::LlmParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::trace_sink::{NoTraceSink, TraceEvent, TraceSink};
use crate::use_cases::shared::traced_completion;
use course_domain::chat::{ANONYMOUS_USER, trace_input_preview, without_system};
use course_domain::{ChatReply, ChatRequest, Message, PromptTemplate};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur while answering a chat request.
#[derive(Error, Debug)]
pub enum RunChatError {
    #[error("Conversation has no user or assistant messages")]
    EmptyConversation,

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),
}

/// Use case for the chat service.
///
/// Shared between request handlers; holds no per-request state.
pub struct RunChatUseCase {
    gateway: Arc<dyn LlmGateway>,
    trace_sink: Arc<dyn TraceSink>,
    system_prompt: String,
    params: LlmParams,
}

impl RunChatUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            trace_sink: Arc::new(NoTraceSink),
            system_prompt: PromptTemplate::chat_system().to_string(),
            params: LlmParams::chat(),
        }
    }

    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = sink;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_params(mut self, params: LlmParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatReply, RunChatError> {
        let conversation = without_system(&request.messages);
        if conversation.is_empty() {
            return Err(RunChatError::EmptyConversation);
        }

        let trace_id = uuid::Uuid::new_v4().to_string();
        let session_id = request
            .session_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let user_id = request
            .user_id
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());
        debug!(
            trace_id = %trace_id,
            session_id = %session_id,
            messages = conversation.len(),
            "Chat request received"
        );

        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace",
            json!({
                "name": "chat",
                "session_id": session_id,
                "user_id": user_id,
                "input": trace_input_preview(&conversation),
            }),
        ));
        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "span",
            json!({ "name": "chat-completion", "input": conversation }),
        ));

        let messages =
            std::iter::once(Message::system(&self.system_prompt)).chain(conversation.iter().cloned());
        let completion = self.params.request(messages);

        let response = match traced_completion(
            self.gateway.as_ref(),
            self.trace_sink.as_ref(),
            &trace_id,
            "chat-completion",
            &completion,
        )
        .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(trace_id = %trace_id, "Chat completion failed: {}", e);
                self.trace_sink.record(TraceEvent::new(
                    &trace_id,
                    "trace_end",
                    json!({ "input": conversation, "error": e.to_string() }),
                ));
                return Err(e.into());
            }
        };

        self.trace_sink.record(TraceEvent::new(
            &trace_id,
            "trace_end",
            json!({ "input": conversation, "output": response.text }),
        ));
        info!(trace_id = %trace_id, session_id = %session_id, "Chat request answered");

        Ok(ChatReply {
            response: response.text,
            session_id,
            trace_id,
        })
    }
}
