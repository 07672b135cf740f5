//! Infrastructure layer for course-agents
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod openai;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use http::{
    DEFAULT_SERVICE_TIMEOUT, HtmlLoginPortal, HttpCalibrationHub, JsonVerifyChannel, build_client,
};
pub use logging::JsonlTraceSink;
pub use openai::OpenAiGateway;
pub use storage::FsPageArchive;
