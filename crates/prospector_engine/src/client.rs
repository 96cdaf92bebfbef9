use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::types::{ErrorBody, ScrapeResponseBody};
use crate::{FailureKind, ScrapeHit, ScrapeRequestBody, SubmitError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline; expiry settles the submission as `Timeout`.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Seam over the remote scrape service so the engine can be driven against
/// a fake backend in tests.
#[async_trait::async_trait]
pub trait ScrapeApi: Send + Sync {
    /// One-shot reachability probe: 2xx means reachable, anything else
    /// (including transport errors) means not.
    async fn health(&self) -> bool;

    /// Dispatch the submission and await the full response. Cancellation is
    /// cooperative: when `cancel` fires first, the transport call is dropped
    /// and no partial result is returned.
    async fn submit(
        &self,
        request: &ScrapeRequestBody,
        cancel: CancellationToken,
    ) -> Result<Vec<ScrapeHit>, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, SubmitError> {
        let base = Url::parse(&self.settings.base_url)
            .map_err(|err| SubmitError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
        base.join(path)
            .map_err(|err| SubmitError::new(FailureKind::InvalidBaseUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ScrapeApi for ReqwestBackend {
    async fn health(&self) -> bool {
        let Ok(url) = self.endpoint("/health") else {
            return false;
        };
        let Ok(client) = self.build_client() else {
            return false;
        };
        match client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn submit(
        &self,
        request: &ScrapeRequestBody,
        cancel: CancellationToken,
    ) -> Result<Vec<ScrapeHit>, SubmitError> {
        let url = self.endpoint("/api/scrape")?;
        let client = self.build_client()?;

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(SubmitError::new(FailureKind::Cancelled, "cancelled by user"));
            }
            sent = client.post(url).json(request).send() => {
                sent.map_err(map_reqwest_error)?
            }
        };

        let status = response.status();
        if !status.is_success() {
            // The backend puts a human-readable message in the error body;
            // fall back to the status line when it is absent or unreadable.
            let fallback = status.to_string();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(fallback);
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(SubmitError::new(FailureKind::Cancelled, "cancelled by user"));
            }
            decoded = response.json::<ScrapeResponseBody>() => {
                decoded.map_err(|err| {
                    if err.is_timeout() {
                        SubmitError::new(FailureKind::Timeout, err.to_string())
                    } else {
                        SubmitError::new(FailureKind::MalformedResponse, err.to_string())
                    }
                })?
            }
        };

        Ok(body.data)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
