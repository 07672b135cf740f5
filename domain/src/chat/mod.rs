//! Traced chat exercise (E04).
//!
//! A chat endpoint that answers a conversation with one completion and
//! records a trace of the exchange. Client-supplied system messages are
//! never forwarded; the service prepends its own.

use crate::session::entities::Message;
use crate::util::preview_chars;
use serde::{Deserialize, Serialize};

/// Characters of the last message kept as the trace's input preview
pub const TRACE_INPUT_PREVIEW: usize = 45;

/// User id recorded when the client does not send one
pub const ANONYMOUS_USER: &str = "anonymous";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of a successful chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    pub trace_id: String,
}

/// Drop every system message, keeping order
pub fn without_system(messages: &[Message]) -> Vec<Message> {
    messages.iter().filter(|m| !m.is_system()).cloned().collect()
}

/// Preview of the last message, as recorded on the trace
pub fn trace_input_preview(messages: &[Message]) -> String {
    messages
        .last()
        .map(|m| preview_chars(&m.content, TRACE_INPUT_PREVIEW).to_string())
        .unwrap_or_default()
}
