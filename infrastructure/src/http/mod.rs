//! HTTP adapters for the exercise services
//!
//! | Adapter | Port | Exercise |
//! |---------|------|----------|
//! | [`HtmlLoginPortal`] | `LoginPortal` | E01 |
//! | [`JsonVerifyChannel`] | `VerifyChannel` | E02 |
//! | [`HttpCalibrationHub`] | `CalibrationHub` | E03 |
//!
//! Every adapter treats a non-2xx status as [`ServiceError::Status`] and
//! never retries.

mod calibration_hub;
pub mod html;
mod login_portal;
mod verify_channel;

pub use calibration_hub::HttpCalibrationHub;
pub use login_portal::HtmlLoginPortal;
pub use verify_channel::JsonVerifyChannel;

use course_application::ServiceError;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Default timeout for exercise service calls
pub const DEFAULT_SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("course-agents/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by the exercise adapters.
pub fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ServiceError::Transport {
            url: String::new(),
            message: format!("failed to build HTTP client: {e}"),
        })
}

/// Send a request and reject non-2xx answers.
pub(crate) async fn send_checked(url: &str, request: RequestBuilder) -> Result<Response, ServiceError> {
    let response = request.send().await.map_err(|e| ServiceError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Read the whole body as text.
pub(crate) async fn read_text(url: &str, response: Response) -> Result<String, ServiceError> {
    response.text().await.map_err(|e| ServiceError::Transport {
        url: url.to_string(),
        message: format!("failed to read response body: {e}"),
    })
}

/// Read the body and decode it as JSON.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    url: &str,
    response: Response,
) -> Result<T, ServiceError> {
    let text = read_text(url, response).await?;
    serde_json::from_str(&text).map_err(|e| ServiceError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
