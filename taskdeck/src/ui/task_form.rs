//! Create form rendering: one text field and one date field.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::{input_spans, theme};
use crate::app::{App, PanelFocus};

/// Render the create form panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    render_field(
        frame,
        chunks[0],
        "New task",
        input_spans(&app.form_text, app.focus == PanelFocus::FormText),
        app.focus == PanelFocus::FormText,
    );
    render_field(
        frame,
        chunks[1],
        "Due (YYYY-MM-DD)",
        input_spans(&app.form_date, app.focus == PanelFocus::FormDate),
        app.focus == PanelFocus::FormDate,
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    spans: Vec<ratatui::text::Span<'static>>,
    focused: bool,
) {
    let block = Block::default()
        .title(ratatui::text::Span::styled(
            title.to_string(),
            theme::panel_title(theme::FORM_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
