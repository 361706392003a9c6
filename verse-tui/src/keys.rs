//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    NewItem,
    EditItem,
    DeleteItem,
    OpenSearch,
    Refresh,
    /// `Enter` outside text entry: open the selection or confirm a dialog.
    Confirm,
    /// `y`: confirm a pending delete only.
    Yes,
    Cancel,
    Insert(char),
    Backspace,
    Newline,
    Submit,
    NextField,
}

impl Action {
    /// Whether handling this action may wait on the store.
    pub fn may_call_store(&self) -> bool {
        matches!(
            self,
            Action::NextView
                | Action::PrevView
                | Action::SwitchView(_)
                | Action::Refresh
                | Action::Confirm
                | Action::Yes
                | Action::Submit
                | Action::Cancel
                | Action::NewItem
                | Action::EditItem
        )
    }
}

/// How keys are read for the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Normal,
    /// `Enter` submits.
    SingleLine,
    /// `Enter` inserts a newline; `Ctrl-s` submits.
    MultiLine,
}

pub fn map_key(event: KeyEvent, context: KeyContext) -> Option<Action> {
    match context {
        KeyContext::Normal => map_normal(event),
        KeyContext::SingleLine | KeyContext::MultiLine => map_text(event, context),
    }
}

fn map_normal(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('y') => Some(Action::Yes),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('1') => Some(Action::SwitchView(0)),
        KeyCode::Char('2') => Some(Action::SwitchView(1)),
        _ => None,
    }
}

fn map_text(event: KeyEvent, context: KeyContext) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') => Some(Action::Submit),
            KeyCode::Char('c') => Some(Action::Cancel),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Enter if context == KeyContext::MultiLine => Some(Action::Newline),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}
