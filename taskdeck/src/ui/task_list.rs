//! Task list rendering.
//!
//! The list is rebuilt from [`App::tasks`] on every frame; the selected
//! row swaps its static display for inline inputs while editing, or for
//! the status selector while one is open.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::Task;

use super::{input_spans, theme};
use crate::app::{App, EditField, EditState, PanelFocus, RowMode};

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.tasks.is_empty() {
        // Empty result still renders a row, never a bare panel.
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks to display.",
            theme::dimmed(),
        )))]
    } else {
        app.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let is_selected = i == app.selected;
                match (&app.row_mode, is_selected) {
                    (RowMode::Editing(edit), true) => edit_row(task, edit),
                    (RowMode::SelectingStatus { choice }, true) => status_row(task, *choice),
                    _ => view_row(task, is_selected),
                }
            })
            .collect()
    };

    let title = app.filter.map_or_else(
        || "Tasks — all".to_string(),
        |status| format!("Tasks — {status}"),
    );
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::LIST_TITLE)))
        .borders(Borders::ALL)
        .border_style(if app.focus == PanelFocus::List {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(List::new(items).block(block), area);
}

/// Static display of one task row.
fn view_row(task: &Task, selected: bool) -> ListItem<'static> {
    let text_style = if selected {
        theme::selected()
    } else {
        theme::normal()
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("#{:<4} ", task.id), theme::dimmed()),
        Span::styled(task.text.clone(), text_style),
        Span::styled(
            format!("  created {}  due {}  ", task.created_date, task.expected_date),
            theme::dimmed(),
        ),
        status_cell(task.status),
    ]))
}

/// Selected row in edit mode: inline inputs for text and date.
fn edit_row(task: &Task, edit: &EditState) -> ListItem<'static> {
    let mut spans = vec![Span::styled(format!("#{:<4} ", task.id), theme::dimmed())];
    spans.extend(input_spans(&edit.text, edit.field == EditField::Text));
    spans.push(Span::styled("  due ", theme::dimmed()));
    spans.extend(input_spans(&edit.date, edit.field == EditField::Date));
    spans.push(Span::styled("  [editing]", theme::highlighted()));
    ListItem::new(Line::from(spans))
}

/// Selected row with the status selector open.
fn status_row(task: &Task, choice: TaskStatus) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(format!("#{:<4} ", task.id), theme::dimmed()),
        Span::styled(task.text.clone(), theme::normal()),
        Span::raw("  "),
    ];
    for status in TaskStatus::ALL {
        let style = if status == choice {
            theme::selected()
        } else {
            theme::dimmed()
        };
        spans.push(Span::styled(format!(" {status} "), style));
    }
    ListItem::new(Line::from(spans))
}

/// Colored status cell of a row.
fn status_cell(status: TaskStatus) -> Span<'static> {
    Span::styled(
        format!("[{status}]"),
        theme::normal().fg(theme::status_color(status)),
    )
}
