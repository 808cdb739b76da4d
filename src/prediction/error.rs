//! Errors returned by the prediction service client

use thiserror::Error;

/// Shown when the service gives no usable error message
pub const FALLBACK_MESSAGE: &str = "Error fetching prediction. Ensure the backend is running.";

/// Why a prediction request did not produce a risk level
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Connection refused, DNS failure, or the request never completed
    #[error("request to prediction service failed: {0}")]
    Network(String),
    /// Non-2xx status; `message` is the body's `error` field when present
    #[error("prediction service returned {status}")]
    Rejected { status: u16, message: Option<String> },
    /// 2xx response without a readable `risk_level`
    #[error("malformed prediction response: {0}")]
    MalformedBody(String),
}

impl SubmissionError {
    /// Message to show the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmissionError::MalformedBody(err.to_string())
        } else {
            SubmissionError::Network(err.to_string())
        }
    }
}
