//! Application state and event handling for the task list controller.
//!
//! `App` is plain state over injected input: keystrokes go in through
//! [`App::handle_key_event`] (returning a [`NetCommand`] when the action
//! needs the network) and network results come back through
//! [`App::apply_event`]. Nothing here touches the terminal, so the whole
//! controller is drivable from tests.
//!
//! The visible list is always the latest applied server snapshot. Every
//! mutation schedules a full refresh (performed by the worker only on
//! success), and every refresh carries a sequencing token. A response
//! is applied only if its token matches the most recently issued one,
//! so out-of-order completions of rapid filter/sort changes are
//! harmless.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::query::SortOrder;
use taskdeck_proto::status::TaskStatus;
use taskdeck_proto::task::Task;

use crate::net::{MutationKind, NetCommand, NetEvent, RefreshSpec};
use crate::tasks::{validate_create, validate_update};

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The task list (default).
    List,
    /// The create form's text field.
    FormText,
    /// The create form's date field.
    FormDate,
}

/// A single-line text input with a character-indexed cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Current contents.
    pub value: String,
    /// Cursor position as a character index.
    pub cursor: usize,
}

impl InputField {
    /// Creates an input pre-filled with `value`, cursor at the end.
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            cursor: value.chars().count(),
            value: value.to_string(),
        }
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    /// Moves the cursor left.
    pub const fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor past the last character.
    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Clears contents and resets the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Byte offset of the cursor's character index.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.value.len())
    }
}

/// Which edit field has the cursor while a row is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// The task text.
    Text,
    /// The expected date.
    Date,
}

/// Editable fields exposed while a row is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    /// Edited task text.
    pub text: InputField,
    /// Edited expected date (YYYY-MM-DD).
    pub date: InputField,
    /// Which edit field has the cursor.
    pub field: EditField,
}

/// Interaction state of the selected row.
///
/// `Viewing -> Editing -> Viewing` is the edit cycle; the transition back
/// commits only after validation succeeds and the server confirms. The
/// status selector is its own state with no edit gate: applying it
/// issues the update immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    /// Static display.
    Viewing,
    /// Inline edit of text and expected date.
    Editing(EditState),
    /// Picking a new status for immediate application.
    SelectingStatus {
        /// Provisional status shown in the selector.
        choice: TaskStatus,
    },
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Last applied server snapshot, in server order.
    pub tasks: Vec<Task>,
    /// Selected row index into `tasks`.
    pub selected: usize,
    /// Interaction state of the selected row.
    pub row_mode: RowMode,
    /// Which panel receives keystrokes.
    pub focus: PanelFocus,
    /// Create form: task text.
    pub form_text: InputField,
    /// Create form: expected date (YYYY-MM-DD).
    pub form_date: InputField,
    /// Active status filter; `None` shows every status.
    pub filter: Option<TaskStatus>,
    /// Sort order for the creation-date sort.
    pub order: SortOrder,
    /// One-line notice shown in the status bar, cleared on the next
    /// keystroke.
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Token of the most recently issued refresh.
    refresh_seq: u64,
}

impl App {
    /// Creates an empty controller with default filter and sort.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            selected: 0,
            row_mode: RowMode::Viewing,
            focus: PanelFocus::List,
            form_text: InputField::default(),
            form_date: InputField::default(),
            filter: None,
            order: SortOrder::Ascending,
            notice: None,
            should_quit: false,
            refresh_seq: 0,
        }
    }

    /// The refresh command to issue on startup.
    pub fn initial_refresh(&mut self) -> NetCommand {
        NetCommand::Refresh(self.next_refresh_spec())
    }

    /// The currently selected task, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Allocates the next sequencing token with the current filter/sort.
    fn next_refresh_spec(&mut self) -> RefreshSpec {
        self.refresh_seq += 1;
        RefreshSpec {
            seq: self.refresh_seq,
            filter: self.filter,
            order: self.order,
        }
    }

    /// Handles a key event; returns a command when the action needs the
    /// network.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<NetCommand> {
        // Any keystroke dismisses the previous notice.
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // Row modes capture the keyboard until committed or cancelled.
        match self.row_mode {
            RowMode::Editing(_) => return self.handle_edit_key(key),
            RowMode::SelectingStatus { .. } => return self.handle_status_key(key),
            RowMode::Viewing => {}
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                None
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                None
            }
            _ => match self.focus {
                PanelFocus::List => self.handle_list_key(key),
                PanelFocus::FormText | PanelFocus::FormDate => self.handle_form_key(key),
            },
        }
    }

    /// Applies a network event to the controller state.
    pub fn apply_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::TasksLoaded { seq, tasks } => {
                if seq == self.refresh_seq {
                    self.tasks = tasks;
                    if self.selected >= self.tasks.len() {
                        self.selected = self.tasks.len().saturating_sub(1);
                    }
                    // The list was rebuilt from server state; any open row
                    // interaction refers to rows that no longer exist.
                    self.row_mode = RowMode::Viewing;
                } else {
                    tracing::debug!(
                        seq,
                        latest = self.refresh_seq,
                        "discarding stale task list response"
                    );
                }
            }
            NetEvent::RefreshFailed { seq } => {
                // Logged by the worker; the current list stays on screen.
                tracing::debug!(seq, "refresh failed, keeping current list");
            }
            NetEvent::MutationDone { action } => match action {
                MutationKind::Create => {
                    self.form_text.clear();
                    self.form_date.clear();
                }
                MutationKind::Update => {
                    if matches!(self.row_mode, RowMode::Editing(_)) {
                        self.row_mode = RowMode::Viewing;
                    }
                }
                MutationKind::Delete => {}
            },
            NetEvent::MutationFailed { action, error } => {
                // Form and edit state are left untouched so the user can
                // retry the same input.
                self.notice = Some(format!("{action} failed: {error}"));
            }
        }
    }

    // --- list (browse) keys ---

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected < self.tasks.len().saturating_sub(1) {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('a') => {
                self.focus = PanelFocus::FormText;
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                self.begin_edit();
                None
            }
            KeyCode::Char('s') => {
                self.begin_status_select();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('f') => {
                self.filter = cycle_filter(self.filter);
                Some(NetCommand::Refresh(self.next_refresh_spec()))
            }
            KeyCode::Char('o') => {
                self.order = self.order.toggled();
                Some(NetCommand::Refresh(self.next_refresh_spec()))
            }
            KeyCode::Char('r') => Some(NetCommand::Refresh(self.next_refresh_spec())),
            _ => None,
        }
    }

    fn begin_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.row_mode = RowMode::Editing(EditState {
                text: InputField::with_value(&task.text),
                date: InputField::with_value(&task.expected_date.to_string()),
                field: EditField::Text,
            });
        }
    }

    fn begin_status_select(&mut self) {
        if let Some(task) = self.selected_task() {
            self.row_mode = RowMode::SelectingStatus {
                choice: task.status,
            };
        }
    }

    fn delete_selected(&mut self) -> Option<NetCommand> {
        let id = self.selected_task()?.id;
        Some(NetCommand::Delete {
            id,
            refresh: self.next_refresh_spec(),
        })
    }

    // --- edit mode keys ---

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        let RowMode::Editing(edit) = &mut self.row_mode else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                // Cancel: discard the edits, back to static display.
                self.row_mode = RowMode::Viewing;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                edit.field = match edit.field {
                    EditField::Text => EditField::Date,
                    EditField::Date => EditField::Text,
                };
                None
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Char(c) => {
                active_edit_input(edit).insert(c);
                None
            }
            KeyCode::Backspace => {
                active_edit_input(edit).delete_back();
                None
            }
            KeyCode::Left => {
                active_edit_input(edit).move_left();
                None
            }
            KeyCode::Right => {
                active_edit_input(edit).move_right();
                None
            }
            KeyCode::Home => {
                active_edit_input(edit).home();
                None
            }
            KeyCode::End => {
                active_edit_input(edit).end();
                None
            }
            _ => None,
        }
    }

    /// Validates the edit inputs and issues the update.
    ///
    /// On validation failure the row stays in edit mode with the inputs
    /// intact. On success the row stays in edit mode too; the worker's
    /// `MutationDone` flips it back once the server has accepted the PUT.
    fn commit_edit(&mut self) -> Option<NetCommand> {
        let task = self.selected_task()?.clone();
        let (text, date) = match &self.row_mode {
            RowMode::Editing(edit) => (edit.text.value.clone(), edit.date.value.clone()),
            _ => return None,
        };
        match validate_update(&task, &text, &date, task.status.code()) {
            Ok(updated) => Some(NetCommand::Update {
                task: updated,
                refresh: self.next_refresh_spec(),
            }),
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    // --- status selector keys ---

    fn handle_status_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        let RowMode::SelectingStatus { choice } = &mut self.row_mode else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                self.row_mode = RowMode::Viewing;
                None
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k' | 'h') => {
                *choice = choice.prev();
                None
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j' | 'l') => {
                *choice = choice.next();
                None
            }
            KeyCode::Enter => self.apply_status(),
            _ => None,
        }
    }

    /// Applies the selected status immediately: text and dates travel
    /// unchanged, only the status differs.
    fn apply_status(&mut self) -> Option<NetCommand> {
        let choice = match self.row_mode {
            RowMode::SelectingStatus { choice } => choice,
            _ => return None,
        };
        self.row_mode = RowMode::Viewing;
        let task = self.selected_task()?.clone();
        if choice == task.status {
            return None;
        }
        match validate_update(
            &task,
            &task.text,
            &task.expected_date.to_string(),
            choice.code(),
        ) {
            Ok(updated) => Some(NetCommand::Update {
                task: updated,
                refresh: self.next_refresh_spec(),
            }),
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    // --- create form keys ---

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Esc => {
                self.focus = PanelFocus::List;
                None
            }
            KeyCode::Enter => self.submit_create(),
            KeyCode::Char(c) => {
                self.active_form_input().insert(c);
                None
            }
            KeyCode::Backspace => {
                self.active_form_input().delete_back();
                None
            }
            KeyCode::Left => {
                self.active_form_input().move_left();
                None
            }
            KeyCode::Right => {
                self.active_form_input().move_right();
                None
            }
            KeyCode::Home => {
                self.active_form_input().home();
                None
            }
            KeyCode::End => {
                self.active_form_input().end();
                None
            }
            _ => None,
        }
    }

    /// Validates the create form and issues the POST.
    ///
    /// The form is cleared only when the worker confirms the create; on
    /// validation or network failure the inputs stay as typed.
    fn submit_create(&mut self) -> Option<NetCommand> {
        match validate_create(&self.form_text.value, &self.form_date.value) {
            Ok(task) => Some(NetCommand::Create {
                task,
                refresh: self.next_refresh_spec(),
            }),
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    fn active_form_input(&mut self) -> &mut InputField {
        match self.focus {
            PanelFocus::FormDate => &mut self.form_date,
            _ => &mut self.form_text,
        }
    }

    // --- focus cycling ---

    /// Cycle focus forward: List -> FormText -> FormDate -> List.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::List => PanelFocus::FormText,
            PanelFocus::FormText => PanelFocus::FormDate,
            PanelFocus::FormDate => PanelFocus::List,
        };
    }

    /// Cycle focus backward: List -> FormDate -> FormText -> List.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::List => PanelFocus::FormDate,
            PanelFocus::FormDate => PanelFocus::FormText,
            PanelFocus::FormText => PanelFocus::List,
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn active_edit_input(edit: &mut EditState) -> &mut InputField {
    match edit.field {
        EditField::Text => &mut edit.text,
        EditField::Date => &mut edit.date,
    }
}

/// Advances the status filter: all -> each status in code order -> all.
fn cycle_filter(current: Option<TaskStatus>) -> Option<TaskStatus> {
    match current {
        None => Some(TaskStatus::InProgress),
        Some(TaskStatus::Returned) => None,
        Some(status) => Some(status.next()),
    }
}
