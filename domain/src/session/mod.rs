//! Completion exchange domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`request::CompletionRequest`]: everything one completion call needs
//! - [`response::LlmResponse`]: the extracted answer text plus token usage

pub mod entities;
pub mod request;
pub mod response;
