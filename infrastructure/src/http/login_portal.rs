//! Login page adapter (E01)

use super::html::element_text_by_id;
use super::{read_text, send_checked};
use async_trait::async_trait;
use course_application::{LoginPortal, ServiceError};
use course_domain::login::QUESTION_ELEMENT_ID;
use course_domain::{Answer, LoginCredentials, LoginForm, SecretPage};
use reqwest::Client;
use tracing::debug;

/// Login page served as HTML, submitted as a urlencoded form to the same URL.
pub struct HtmlLoginPortal {
    client: Client,
    url: String,
}

impl HtmlLoginPortal {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LoginPortal for HtmlLoginPortal {
    async fn fetch_question_text(&self) -> Result<String, ServiceError> {
        let response = send_checked(&self.url, self.client.get(&self.url)).await?;
        let html = read_text(&self.url, response).await?;
        debug!(bytes = html.len(), "Login page fetched");

        element_text_by_id(&html, QUESTION_ELEMENT_ID)
            .ok_or_else(|| ServiceError::MissingElement(QUESTION_ELEMENT_ID.to_string()))
    }

    async fn submit(
        &self,
        credentials: &LoginCredentials,
        answer: &Answer,
    ) -> Result<SecretPage, ServiceError> {
        let form = LoginForm::new(credentials, answer);
        let response = send_checked(&self.url, self.client.post(&self.url).form(&form)).await?;

        let url = response.url().to_string();
        let body = read_text(&self.url, response).await?;
        debug!(url = %url, bytes = body.len(), "Login response received");
        Ok(SecretPage { url, body })
    }
}
