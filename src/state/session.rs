//! Session-scoped form state owned by the app
//!
//! Bundles the field store, the submission controller and the focused
//! field. The renderer reads it; key handling calls `update_field` and
//! `submit`.

use super::forms::{FieldStore, Form, FormField, FormState, ValidationError, FIELD_SCHEMA};
use super::submission::{SubmissionController, SubmissionOutcome, SubmissionRequest, SubmissionState};

#[derive(Debug, Default)]
pub struct FormSession {
    store: FieldStore,
    submission: SubmissionController,
    active_field_index: usize,
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            store: FieldStore::new(),
            submission: SubmissionController::new(),
            active_field_index: 0,
        }
    }

    pub fn form_state(&self) -> &FormState {
        self.store.form()
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.store.validation_error()
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// Whether a submit would currently be accepted
    pub fn can_submit(&self) -> bool {
        !self.submission_state().is_pending() && self.validation_error().is_none()
    }

    pub fn update_field(&mut self, key: &str, raw_value: &str) {
        self.store.update_field(key, raw_value);
    }

    pub fn submit(&mut self) -> Option<SubmissionRequest> {
        self.submission
            .submit(self.store.form(), self.store.validation_error())
    }

    pub fn settle(&mut self, outcome: SubmissionOutcome) -> bool {
        self.submission.settle(outcome)
    }

    /// Field that currently has focus
    pub fn active(&self) -> &FormField {
        &self.store.form().fields()[self.active_field_index]
    }
}

impl Form for FormSession {
    fn field_count(&self) -> usize {
        FIELD_SCHEMA.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(FIELD_SCHEMA.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{MockPredictionClientTrait, SubmissionError, FALLBACK_MESSAGE};
    use crate::state::submission::execute;

    fn fill_valid(session: &mut FormSession) {
        session.update_field("diet_score", "7");
        session.update_field("physical_activity", "5");
        session.update_field("symptom_score", "3");
        session.update_field("age", "40");
    }

    fn client_returning(
        result: fn() -> Result<String, SubmissionError>,
    ) -> MockPredictionClientTrait {
        let mut client = MockPredictionClientTrait::new();
        client.expect_predict().returning(move |_| result());
        client
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_field() {
            let session = FormSession::new();
            assert_eq!(session.active().key(), "age");
        }

        #[test]
        fn test_next_field_wraps() {
            let mut session = FormSession::new();
            for _ in 0..FIELD_SCHEMA.len() {
                session.next_field();
            }
            assert_eq!(session.active_field(), 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut session = FormSession::new();
            session.prev_field();
            assert_eq!(session.active().key(), "mri_abnormality");
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut session = FormSession::new();
            session.set_active_field(100);
            assert_eq!(session.active_field(), FIELD_SCHEMA.len() - 1);
        }
    }

    mod scenarios {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_submission_succeeds() {
            let mut session = FormSession::new();
            fill_valid(&mut session);

            let client = client_returning(|| Ok("Low".to_string()));
            let request = session.submit().expect("accepted");
            assert_eq!(session.submission_state(), &SubmissionState::Pending);

            let outcome = execute(&client, request).await;
            assert!(session.settle(outcome));
            assert_eq!(
                session.submission_state(),
                &SubmissionState::Succeeded("Low".to_string())
            );
        }

        #[test]
        fn test_out_of_range_score_blocks_submission() {
            let mut session = FormSession::new();
            fill_valid(&mut session);
            session.update_field("diet_score", "15");

            assert_eq!(session.form_state().value("diet_score"), Some("7"));
            assert_eq!(
                session.validation_error().map(ValidationError::message),
                Some("diet score must be between 1 and 10")
            );
            assert!(!session.can_submit());
            assert!(session.submit().is_none());
            assert_eq!(session.submission_state(), &SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_network_failure_reports_fallback() {
            let mut session = FormSession::new();
            fill_valid(&mut session);

            let client =
                client_returning(|| Err(SubmissionError::Network("connection refused".into())));
            let request = session.submit().expect("accepted");
            session.settle(execute(&client, request).await);

            assert_eq!(
                session.submission_state(),
                &SubmissionState::Failed(FALLBACK_MESSAGE.to_string())
            );
            assert_eq!(
                FALLBACK_MESSAGE,
                "Error fetching prediction. Ensure the backend is running."
            );
        }

        #[tokio::test]
        async fn test_resubmit_after_success_discards_result() {
            let mut session = FormSession::new();
            fill_valid(&mut session);

            let client = client_returning(|| Ok("Low".to_string()));
            let request = session.submit().expect("accepted");
            session.settle(execute(&client, request).await);

            session.update_field("symptom_score", "9");
            session.update_field("smoking", "Smoker");
            let request = session.submit().expect("accepted again");

            assert_eq!(session.submission_state(), &SubmissionState::Pending);
            assert!(session.submission_state().risk_level().is_none());
            let body = serde_json::to_value(&request.snapshot).unwrap();
            assert_eq!(body["symptom_score"], serde_json::json!(9));
            assert_eq!(body["smoking"], serde_json::json!("Smoker"));
        }
    }

    mod in_flight {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_edits_while_pending_do_not_touch_snapshot() {
            let mut session = FormSession::new();
            fill_valid(&mut session);
            let request = session.submit().expect("accepted");

            session.update_field("age", "55");
            assert_eq!(session.form_state().value("age"), Some("55"));
            let body = serde_json::to_value(&request.snapshot).unwrap();
            assert_eq!(body["age"], serde_json::json!(40));
        }

        #[test]
        fn test_second_submit_while_pending_rejected() {
            let mut session = FormSession::new();
            fill_valid(&mut session);
            assert!(session.submit().is_some());
            assert!(!session.can_submit());
            assert!(session.submit().is_none());
        }

        #[test]
        fn test_validation_error_raised_while_pending() {
            let mut session = FormSession::new();
            fill_valid(&mut session);
            session.submit().expect("accepted");
            session.update_field("physical_activity", "12");
            assert!(session.validation_error().is_some());
            assert_eq!(session.submission_state(), &SubmissionState::Pending);
        }
    }
}
