//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use taskdeck_proto::query::SortOrder;

use super::theme;
use crate::app::{App, PanelFocus, RowMode};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(notice) = &app.notice {
        Line::from(Span::styled(format!(" {notice}"), theme::notice()))
    } else {
        let filter = app
            .filter
            .map_or_else(|| "all".to_string(), |status| status.to_string());
        let arrow = match app.order {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        };

        let help_text = match (&app.row_mode, app.focus) {
            (RowMode::Editing(_), _) => "Enter: save | Tab: text/date | Esc: cancel",
            (RowMode::SelectingStatus { .. }, _) => "↑↓: choose status | Enter: apply | Esc: cancel",
            (RowMode::Viewing, PanelFocus::List) => {
                "a: new | e: edit | s: status | d: delete | f: filter | o: sort | r: refresh | q: quit"
            }
            (RowMode::Viewing, _) => "Enter: create | Tab: next field | Esc: back to list",
        };

        Line::from(vec![
            Span::styled("TaskDeck v0.1.0", theme::bold()),
            Span::raw(" | "),
            Span::raw(format!("filter: {filter}")),
            Span::raw(" | "),
            Span::raw(format!("created {arrow}")),
            Span::raw(" | "),
            Span::raw(format!("{} tasks", app.tasks.len())),
            Span::raw(" | "),
            Span::styled(help_text, theme::dimmed()),
        ])
    };

    let paragraph = Paragraph::new(line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
