//! Trait abstraction for the prediction client to enable mocking in tests

use super::error::SubmissionError;
use crate::state::FormSnapshot;
use async_trait::async_trait;

/// Trait for prediction service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionClientTrait: Send + Sync {
    /// Send one form snapshot and return the predicted risk level
    async fn predict(&self, snapshot: &FormSnapshot) -> Result<String, SubmissionError>;
}
