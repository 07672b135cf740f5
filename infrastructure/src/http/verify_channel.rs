//! Robot verification endpoint adapter (E02)

use super::{read_json, send_checked};
use async_trait::async_trait;
use course_application::{ServiceError, VerifyChannel};
use course_domain::VerifyMessage;
use reqwest::Client;
use tracing::debug;

/// Endpoint exchanging `{text, msgID}` JSON messages.
pub struct JsonVerifyChannel {
    client: Client,
    endpoint: String,
}

impl JsonVerifyChannel {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl VerifyChannel for JsonVerifyChannel {
    async fn exchange(&self, message: &VerifyMessage) -> Result<VerifyMessage, ServiceError> {
        debug!(msg_id = message.msg_id, "Sending verification message");
        let response =
            send_checked(&self.endpoint, self.client.post(&self.endpoint).json(message)).await?;
        let reply: VerifyMessage = read_json(&self.endpoint, response).await?;
        debug!(msg_id = reply.msg_id, "Verification reply received");
        Ok(reply)
    }
}
