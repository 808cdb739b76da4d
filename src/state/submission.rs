//! Submission lifecycle
//!
//! One request at a time: `submit` hands out a request only from a settled
//! state and only while the form has no pending validation message. The
//! outcome of that request is applied with `settle`, matched by ticket.

use super::forms::{FormSnapshot, FormState, ValidationError};
use crate::prediction::{PredictionClientTrait, SubmissionError};

/// Observable state of the most recent submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Risk level of the last successful submission
    pub fn risk_level(&self) -> Option<&str> {
        match self {
            Self::Succeeded(risk) => Some(risk),
            _ => None,
        }
    }

    /// Message of the last failed submission
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// A request the controller has accepted and that must now be sent
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub ticket: SubmissionTicket,
    pub snapshot: FormSnapshot,
}

/// Settled result of a request
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub ticket: SubmissionTicket,
    pub result: Result<String, SubmissionError>,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    in_flight: Option<SubmissionTicket>,
    issued: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Accept a submission if nothing is in flight and the form is valid.
    ///
    /// Returns None (and changes nothing) when rejected.
    pub fn submit(
        &mut self,
        form: &FormState,
        validation_error: Option<&ValidationError>,
    ) -> Option<SubmissionRequest> {
        if self.state.is_pending() {
            tracing::debug!("Submission rejected: a request is already in flight");
            return None;
        }
        if let Some(error) = validation_error {
            tracing::debug!("Submission rejected: {error}");
            return None;
        }

        self.issued += 1;
        let ticket = SubmissionTicket(self.issued);
        self.in_flight = Some(ticket);
        self.state = SubmissionState::Pending;
        tracing::info!("Submission {} accepted", self.issued);

        Some(SubmissionRequest {
            ticket,
            snapshot: form.snapshot(),
        })
    }

    /// Apply a request's outcome. Outcomes for anything but the in-flight
    /// ticket are dropped; returns whether the state changed.
    pub fn settle(&mut self, outcome: SubmissionOutcome) -> bool {
        if self.in_flight != Some(outcome.ticket) {
            tracing::warn!("Dropping outcome for stale submission {:?}", outcome.ticket);
            return false;
        }
        self.in_flight = None;

        self.state = match outcome.result {
            Ok(risk_level) => {
                tracing::info!("Prediction received: {risk_level}");
                SubmissionState::Succeeded(risk_level)
            }
            Err(err) => {
                tracing::warn!("Prediction failed: {err}");
                SubmissionState::Failed(err.user_message())
            }
        };
        true
    }
}

/// Send an accepted request and wrap the reply as an outcome
pub async fn execute(
    client: &dyn PredictionClientTrait,
    request: SubmissionRequest,
) -> SubmissionOutcome {
    let result = client.predict(&request.snapshot).await;
    SubmissionOutcome {
        ticket: request.ticket,
        result,
    }
}
