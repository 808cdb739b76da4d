//! Application state and core logic

use crate::config::TuiConfig;
use crate::prediction::{PredictionClient, PredictionClientTrait};
use crate::state::{execute, Form, FormSession, SubmissionOutcome, SubmissionRequest};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Window in which a second Ctrl+C quits
const DOUBLE_CTRL_C_WINDOW: Duration = Duration::from_millis(500);

/// Main application struct
pub struct App {
    /// Form values, validation and submission state
    pub session: FormSession,
    /// Prediction service client shared with in-flight requests
    client: Arc<dyn PredictionClientTrait>,
    /// Where requests are sent (shown in the header)
    pub endpoint: String,
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Transient hint shown in the status bar
    pub status_message: Option<String>,
    /// Frame counter driving the progress spinner
    pub tick: usize,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance using the user's configuration
    pub fn new() -> Result<Self> {
        let config = TuiConfig::load_or_default();
        let endpoint = config.resolve_endpoint();
        tracing::info!("Using prediction endpoint {endpoint}");
        let client = PredictionClient::new(endpoint.clone());
        Ok(Self::with_client(Arc::new(client), endpoint))
    }

    /// Create an App around an existing client
    pub fn with_client(client: Arc<dyn PredictionClientTrait>, endpoint: String) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            session: FormSession::new(),
            client,
            endpoint,
            outcome_tx,
            outcome_rx,
            status_message: None,
            tick: 0,
            quit: false,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance animation state by one frame
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Apply any request outcomes that arrived since the last frame
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.session.settle(outcome);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.session.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.session.prev_field(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char('s') if crate::platform::is_submit_modifier(key.modifiers) => {
                self.submit_form()
            }
            KeyCode::Left => self.adjust_active_field(false),
            KeyCode::Right => self.adjust_active_field(true),
            KeyCode::Char(' ') if !self.session.active().kind().is_numeric() => {
                self.adjust_active_field(true)
            }
            KeyCode::Char(c) => {
                let field = self.session.active();
                if let Some(next) = field.with_char(c) {
                    self.edit_active_field(next);
                }
            }
            KeyCode::Backspace => {
                if let Some(next) = self.session.active().without_last_char() {
                    self.edit_active_field(next);
                }
            }
            _ => {}
        }
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(prev) if now.duration_since(prev) <= DOUBLE_CTRL_C_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Step a numeric field or cycle an enum field
    fn adjust_active_field(&mut self, forward: bool) {
        let field = self.session.active();
        let next = if field.kind().is_numeric() {
            field.stepped(if forward { 1 } else { -1 })
        } else {
            field.cycled(forward)
        };
        if let Some(next) = next {
            self.edit_active_field(next);
        }
    }

    fn edit_active_field(&mut self, value: String) {
        let key = self.session.active().key();
        self.session.update_field(key, &value);
        self.status_message = None;
    }

    /// Submit the form if every numeric field is filled in
    pub fn submit_form(&mut self) {
        if let Some(empty) = self.session.form_state().first_empty_numeric() {
            self.status_message = Some(format!("Please fill in {}", empty.descriptor.label()));
            return;
        }

        match self.session.submit() {
            Some(request) => {
                self.status_message = None;
                self.dispatch(request);
            }
            None => tracing::debug!("Submit ignored"),
        }
    }

    /// Send the request on a background task; its outcome is picked up by
    /// `poll_outcomes`
    fn dispatch(&self, request: SubmissionRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = execute(client.as_ref(), request).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("App closed before prediction settled");
            }
        });
    }
}
