//! Terminal UI rendering.

pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Span,
};

use crate::app::{App, InputField};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Task list
            Constraint::Length(3), // Create form
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    task_list::render(frame, chunks[0], app);
    task_form::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);
}

/// Renders an input field as spans, with a block cursor when active.
pub(crate) fn input_spans(input: &InputField, active: bool) -> Vec<Span<'static>> {
    if !active {
        return vec![Span::styled(input.value.clone(), theme::normal())];
    }

    let chars: Vec<char> = input.value.chars().collect();
    let before: String = chars[..input.cursor.min(chars.len())].iter().collect();
    let (under, after) = if input.cursor < chars.len() {
        (
            chars[input.cursor].to_string(),
            chars[input.cursor + 1..].iter().collect::<String>(),
        )
    } else {
        (" ".to_string(), String::new())
    };

    vec![
        Span::styled(before, theme::normal()),
        Span::styled(under, theme::input_cursor()),
        Span::styled(after, theme::normal()),
    ]
}
