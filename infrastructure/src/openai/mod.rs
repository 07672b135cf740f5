//! OpenAI Responses API adapter
//!
//! Implements the [`LlmGateway`](course_application::LlmGateway) port over
//! `reqwest`. Wire types stay private to this module.

mod gateway;
mod wire;

pub use gateway::{DEFAULT_BASE_URL, OpenAiGateway};
