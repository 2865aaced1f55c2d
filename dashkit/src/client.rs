// dashkit/src/client.rs
//
// Remote analysis client: multipart upload to {base_url}/dashboard
//

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::errors::{DashError, Result};
use crate::types::DashboardReport;
use crate::upload::{SelectedFile, CSV_MIME};

pub const FILE_FIELD: &str = "file";

/// Anything that can turn an uploaded CSV into a dashboard report.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<DashboardReport>;
}

/// Single best-effort attempt per call: no retry, no timeout override, no cancellation.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn upload(&self, file: &SelectedFile) -> Result<DashboardReport> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(CSV_MIME)?;
        let form = Form::new().part(FILE_FIELD, part);

        debug!(endpoint = %self.endpoint, bytes = file.len(), "POST dashboard upload");
        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match server_message(&body) {
                Some(message) => message,
                None => status.canonical_reason().unwrap_or_default().to_string(),
            };
            return Err(DashError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| DashError::TransportError(format!("Malformed dashboard response: {}", e)))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<DashboardReport> {
        self.upload(file).await
    }
}

/// Prefers the `{"detail": "..."}` message the analysis service sends with 4xx responses.
fn server_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return Some(parsed.detail);
    }

    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
