//! Prediction form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{Form, SubmissionState, FIELD_SCHEMA};
use crate::ui::components::{render_button, spinner_frame, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of a single field box
const FIELD_HEIGHT: u16 = 3;
/// Fields per row
const COLUMNS: usize = 2;

/// Draw the prediction form, its button and the last result
pub fn draw_prediction_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Health Risk Prediction ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = FIELD_SCHEMA.len().div_ceil(COLUMNS) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows * FIELD_HEIGHT), // Fields
            Constraint::Length(1),                   // Validation message
            Constraint::Length(BUTTON_HEIGHT),       // Predict button
            Constraint::Min(0),                      // Result
        ])
        .split(inner);

    draw_fields(frame, chunks[0], app);

    if let Some(error) = app.session.validation_error() {
        let message = Paragraph::new(Span::styled(
            error.message(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(message, chunks[1]);
    }

    render_button(
        frame,
        chunks[2],
        &button_label(app.session.submission_state(), app.tick),
        app.session.can_submit(),
    );

    if let Some(line) = result_line(app.session.submission_state()) {
        let result = Paragraph::new(vec![Line::from(""), line]).wrap(Wrap { trim: true });
        frame.render_widget(result, chunks[3]);
    }
}

/// Lay the fields out in a grid, row by row
fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let fields = app.session.form_state().fields();
    let active = app.session.active_field();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .chunks(COLUMNS)
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (row, row_fields) in fields.chunks(COLUMNS).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .split(row_areas[row]);

        for (col, field) in row_fields.iter().enumerate() {
            let index = row * COLUMNS + col;
            draw_field(frame, cells[col], field, index == active);
        }
    }
}

/// Button text; a spinner replaces it while a request is in flight
fn button_label(state: &SubmissionState, tick: usize) -> String {
    if state.is_pending() {
        format!("{} Predicting...", spinner_frame(tick))
    } else {
        "Predict".to_string()
    }
}

/// Outcome of the last settled submission
fn result_line(state: &SubmissionState) -> Option<Line<'_>> {
    if let Some(risk) = state.risk_level() {
        return Some(Line::from(vec![
            Span::raw("Predicted Risk Level: "),
            Span::styled(
                risk,
                Style::default()
                    .fg(risk_color(risk))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    state
        .error_message()
        .map(|message| Line::from(Span::styled(message, Style::default().fg(Color::Red))))
}

/// Risk levels are opaque; only the familiar ones get a color
fn risk_color(risk: &str) -> Color {
    match risk {
        "High" => Color::Red,
        "Low" => Color::Green,
        _ => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_button_label_idle_and_pending() {
        assert_eq!(button_label(&SubmissionState::Idle, 0), "Predict");
        assert_eq!(
            button_label(&SubmissionState::Pending, 0),
            "⠋ Predicting..."
        );
        assert_eq!(
            button_label(&SubmissionState::Succeeded("Low".into()), 3),
            "Predict"
        );
    }

    #[test]
    fn test_result_line_success() {
        let state = SubmissionState::Succeeded("Low".to_string());
        let line = result_line(&state).unwrap();
        assert_eq!(line_text(&line), "Predicted Risk Level: Low");
    }

    #[test]
    fn test_result_line_failure() {
        let state = SubmissionState::Failed("Missing feature: age".to_string());
        let line = result_line(&state).unwrap();
        assert_eq!(line_text(&line), "Missing feature: age");
    }

    #[test]
    fn test_no_result_while_idle_or_pending() {
        assert!(result_line(&SubmissionState::Idle).is_none());
        assert!(result_line(&SubmissionState::Pending).is_none());
    }

    #[test]
    fn test_risk_color() {
        assert_eq!(risk_color("High"), Color::Red);
        assert_eq!(risk_color("Low"), Color::Green);
        assert_eq!(risk_color("Medium"), Color::Yellow);
    }
}
