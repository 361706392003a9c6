//! Notes across every patient.

use crate::state::App;
use crate::views::dialogs::render_note_dialog;
use crate::widgets::{DetailPanel, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use verse_client::screens::{NoteDialogScreen, Screen};
use verse_core::Note;

/// One list row: id, owner and the first line of content.
pub fn note_summary(note: &Note) -> String {
    let first_line = note.content.lines().next().unwrap_or_default();
    format!("#{} [patient {}] {}", note.id, note.patient_id, first_line)
}

pub fn render<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let view = &app.all_notes;
    if let Some(status) = StatusIndicator::for_state("All Notes", view.screen.sync_state(), &app.theme) {
        status.render(f, area);
        render_note_dialog(f, &app.theme, view.screen.dialog(), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let notes = view.screen.notes();
    let items: Vec<ListItem> = notes.iter().map(|n| ListItem::new(note_summary(n))).collect();

    let mut state = ListState::default();
    if let Some(selected) = view.selected {
        state.select(notes.iter().position(|n| n.id == selected));
    }

    let list = List::new(items)
        .block(Block::default().title("Notes").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(note) = view.selected_note() {
        DetailPanel::note(note, &app.theme).render(f, chunks[1]);
    }

    render_note_dialog(f, &app.theme, view.screen.dialog(), area);
}
