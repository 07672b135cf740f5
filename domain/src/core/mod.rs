//! Core domain concepts shared across all exercises.
//!
//! - [`model::Model`]: completion model identifiers
//! - [`question::Question`]: a question fetched from an exercise service
//! - [`answer::Answer`]: the model's answer, forwarded verbatim
//! - [`error::DomainError`]: domain-level errors

pub mod answer;
pub mod error;
pub mod model;
pub mod question;
