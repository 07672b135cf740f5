//! Application layer for course-agents
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::LlmParams;
pub use ports::{
    exercise_service::{CalibrationHub, LoginPortal, PageArchive, ServiceError, VerifyChannel},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{ExerciseStep, NoProgress, ProgressNotifier},
    trace_sink::{NoTraceSink, TraceEvent, TraceSink},
};
pub use use_cases::run_calibration::{
    RunCalibrationError, RunCalibrationInput, RunCalibrationUseCase,
};
pub use use_cases::run_chat::{RunChatError, RunChatUseCase};
pub use use_cases::run_login::{RunLoginError, RunLoginInput, RunLoginUseCase};
pub use use_cases::run_verify::{RunVerifyError, RunVerifyInput, RunVerifyUseCase};
