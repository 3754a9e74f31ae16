use std::time::Duration;

use async_trait::async_trait;

use super::types::{RemoteScorer, ScoreRequest, ScoreResponse};
use super::ClassifierError;

/// HTTP client for the remote triage scoring endpoint.
pub struct HttpScorer {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpScorer {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifierError {
        if e.is_timeout() {
            ClassifierError::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_connect() {
            ClassifierError::Connection(self.url.clone())
        } else {
            ClassifierError::HttpClient(e.to_string())
        }
    }
}

#[async_trait]
impl RemoteScorer for HttpScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, ClassifierError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body).map_err(|e| ClassifierError::InvalidResponse(e.to_string()))
    }
}
