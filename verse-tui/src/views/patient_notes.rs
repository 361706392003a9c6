//! One patient's details, notes and composer.

use crate::state::{App, PatientNotesViewState};
use crate::theme::ClinicTheme;
use crate::views::all_notes::note_summary;
use crate::views::dialogs::render_note_dialog;
use crate::widgets::{DetailPanel, StatusIndicator, TextInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use verse_client::screens::{NoteDialogScreen, Screen};

pub fn render<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let Some(view) = app.patient_notes.as_ref() else {
        return;
    };

    // Shown while composing and while an unsent draft remains.
    let show_composer = view.composing || !view.screen.new_note.is_empty();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(if show_composer { 6 } else { 0 }),
        ])
        .split(area);

    match StatusIndicator::for_state("Patient Notes", view.screen.sync_state(), &app.theme) {
        Some(status) => status.render(f, rows[0]),
        None => render_body(f, view, &app.theme, rows[0]),
    }

    if show_composer {
        TextInput {
            title: "New note (Ctrl-s add, Esc discard)",
            value: &view.screen.new_note,
            focused: view.composing,
            style: Style::default().fg(app.theme.border),
            focus_style: Style::default().fg(app.theme.border_focus),
        }
        .render(f, rows[1]);
    }

    render_note_dialog(f, &app.theme, view.screen.dialog(), area);
}

fn render_body(f: &mut Frame<'_>, view: &PatientNotesViewState, theme: &ClinicTheme, area: Rect) {
    let header = view.screen.patient().map(|patient| {
        DetailPanel::patient("Patient", patient, theme)
            .field("Notes", view.screen.notes().len().to_string())
    });
    let header_height = header.as_ref().map_or(0, |panel| panel.field_rows() + 2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);
    if let Some(panel) = header {
        panel.render(f, rows[0]);
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let notes = view.screen.notes();
    let items: Vec<ListItem> = notes.iter().map(|n| ListItem::new(note_summary(n))).collect();
    let mut state = ListState::default();
    if let Some(selected) = view.selected {
        state.select(notes.iter().position(|n| n.id == selected));
    }
    let title = if notes.is_empty() {
        "Notes (press n to add one)"
    } else {
        "Notes"
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(theme.primary).bg(theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(note) = view.selected_note() {
        DetailPanel::note(note, theme).render(f, chunks[1]);
    }
}
