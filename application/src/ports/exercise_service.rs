//! Exercise service ports
//!
//! Each exercise talks to one external service besides the completion API.
//! These traits describe those services at the level the use cases need:
//! raw question text in, submission result out.

use async_trait::async_trait;
use course_domain::{Answer, CalibrationReport, LoginCredentials, SecretPage, VerifyMessage};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by exercise service adapters
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Element '{0}' not found in page")]
    MissingElement(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// The HTTP status, when the service answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Login page guarded by a dynamic question (E01)
#[async_trait]
pub trait LoginPortal: Send + Sync {
    /// Raw text of the question element, label included
    async fn fetch_question_text(&self) -> Result<String, ServiceError>;

    /// Post the login form and return the page it leads to
    async fn submit(
        &self,
        credentials: &LoginCredentials,
        answer: &Answer,
    ) -> Result<SecretPage, ServiceError>;
}

/// Where the secret page is kept for later inspection (E01)
#[async_trait]
pub trait PageArchive: Send + Sync {
    async fn save(&self, page: &SecretPage) -> Result<PathBuf, ServiceError>;
}

/// Robot verification endpoint (E02)
#[async_trait]
pub trait VerifyChannel: Send + Sync {
    /// Send one message and return the endpoint's reply
    async fn exchange(&self, message: &VerifyMessage) -> Result<VerifyMessage, ServiceError>;
}

/// Hub serving the calibration file and receiving reports (E03)
#[async_trait]
pub trait CalibrationHub: Send + Sync {
    /// Raw text of the calibration file for the given key
    async fn download(&self, api_key: &str) -> Result<String, ServiceError>;

    /// Post the report and return the hub's JSON reply
    async fn submit_report(
        &self,
        report: &CalibrationReport,
    ) -> Result<serde_json::Value, ServiceError>;
}
