//! Prediction service client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::{PredictionClient, DEFAULT_ENDPOINT};
pub use error::SubmissionError;
pub use traits::PredictionClientTrait;

#[cfg(test)]
pub use error::FALLBACK_MESSAGE;
#[cfg(test)]
pub use traits::MockPredictionClientTrait;
