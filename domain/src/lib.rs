//! Domain layer for course-agents
//!
//! This crate contains the value objects, exercise payloads and pure
//! helpers (parsing, arithmetic, flag extraction) shared by every exercise.
//! It has no dependencies on HTTP, configuration or presentation concerns.
//!
//! # Exercises
//!
//! | Module | Exercise | Flow |
//! |--------|----------|------|
//! | [`login`] | E01 | scrape question → answer → form login → read `{{flags}}` |
//! | [`verify`] | E02 | `READY` handshake → answer → reply with the same `msgID` |
//! | [`calibration`] | E03 | download file → repair arithmetic → answer open questions → report |
//! | [`chat`] | E04 | traced chat completion behind an HTTP endpoint |

pub mod calibration;
pub mod chat;
pub mod core;
pub mod login;
pub mod prompt;
pub mod session;
pub mod util;
pub mod verify;

// Re-export commonly used types
pub use calibration::{
    CalibrationOutcome,
    answers::{ProbeAnswer, parse_answer_list},
    document::{CalibrationDocument, CalibrationItem, Correction, RepairReport, TestProbe},
    expression::evaluate,
    report::{CalibrationReport, find_flag},
};
pub use chat::{ChatReply, ChatRequest};
pub use core::{answer::Answer, error::DomainError, model::Model, question::Question};
pub use login::{LoginCredentials, LoginForm, LoginOutcome, SecretPage};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{Message, Role},
    request::{CompletionRequest, ResponseFormat},
    response::{LlmResponse, TokenUsage},
};
pub use verify::{VerifyMessage, VerifyOutcome};
