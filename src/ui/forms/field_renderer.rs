//! Field rendering utilities for forms

use crate::state::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Placeholder for an empty, unfocused numeric field
fn placeholder(field: &FormField) -> String {
    match field.kind() {
        FieldKind::NumericBounded { min, max } => format!("({min}-{max})"),
        _ => "(empty)".to_string(),
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let (display_str, value_style) = if display_value.is_empty() && !is_active {
        (placeholder(field), Style::default().fg(Color::DarkGray))
    } else {
        (display_value, style)
    };

    // Only text-entry fields show a cursor
    let cursor = if is_active && field.kind().is_numeric() {
        "▌"
    } else {
        ""
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.descriptor.label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), area);
}
