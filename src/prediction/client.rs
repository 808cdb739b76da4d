//! HTTP client for the prediction service
//!
//! Posts the form snapshot as JSON and decodes either a `risk_level` or an
//! `error` field from the reply.

use super::error::SubmissionError;
use super::traits::PredictionClientTrait;
use crate::state::FormSnapshot;
use async_trait::async_trait;
use serde::Deserialize;

/// Default prediction endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    risk_level: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// Client for the prediction service
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PredictionClientTrait for PredictionClient {
    async fn predict(&self, snapshot: &FormSnapshot) -> Result<String, SubmissionError> {
        let response = self.http.post(&self.endpoint).json(snapshot).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.bytes().await?;
        decode_risk_level(&body)
    }
}

/// Extract `risk_level` from a success body
fn decode_risk_level(body: &[u8]) -> Result<String, SubmissionError> {
    serde_json::from_slice::<PredictionResponse>(body)
        .map(|r| r.risk_level)
        .map_err(|e| SubmissionError::MalformedBody(e.to_string()))
}

/// Extract the `error` field from a failure body, if it has one
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorResponse>(body)
        .unwrap_or_default()
        .error
}
