//! Calibration hub adapter (E03)

use super::{read_json, read_text, send_checked};
use async_trait::async_trait;
use course_application::{CalibrationHub, ServiceError};
use course_domain::CalibrationReport;
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// File name of the downloaded copy
const DOWNLOAD_FILE_NAME: &str = "json.txt";

/// Hub serving `{hub_url}/data/{key}/json.txt` and accepting reports.
pub struct HttpCalibrationHub {
    client: Client,
    hub_url: String,
    report_url: String,
    download_dir: Option<PathBuf>,
}

impl HttpCalibrationHub {
    /// The report URL defaults to `{hub_url}/report`.
    pub fn new(client: Client, hub_url: impl Into<String>) -> Self {
        let hub_url = hub_url.into().trim_end_matches('/').to_string();
        Self {
            report_url: format!("{hub_url}/report"),
            client,
            hub_url,
            download_dir: None,
        }
    }

    pub fn with_report_url(mut self, url: impl Into<String>) -> Self {
        self.report_url = url.into();
        self
    }

    /// Keep a copy of every downloaded file in `dir`.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    fn data_url(&self, api_key: &str) -> String {
        format!("{}/data/{}/{}", self.hub_url, api_key, DOWNLOAD_FILE_NAME)
    }
}

#[async_trait]
impl CalibrationHub for HttpCalibrationHub {
    async fn download(&self, api_key: &str) -> Result<String, ServiceError> {
        let url = self.data_url(api_key);
        let response = send_checked(&url, self.client.get(&url)).await?;
        let raw = read_text(&url, response).await?;

        if let Some(dir) = &self.download_dir {
            tokio::fs::create_dir_all(dir).await?;
            let path = dir.join(DOWNLOAD_FILE_NAME);
            tokio::fs::write(&path, &raw).await?;
            info!("File downloaded successfully and saved to {}", path.display());
        }
        Ok(raw)
    }

    async fn submit_report(&self, report: &CalibrationReport) -> Result<Value, ServiceError> {
        debug!(url = %self.report_url, "Sending calibration report");
        let response =
            send_checked(&self.report_url, self.client.post(&self.report_url).json(report))
                .await?;
        read_json(&self.report_url, response).await
    }
}
