//! Patient list view.

use crate::state::App;
use crate::theme::gender_color;
use crate::views::dialogs::render_confirm;
use crate::widgets::{DetailPanel, StatusIndicator, TextInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use verse_client::screens::Screen;

pub fn render<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let view = &app.patients;
    let show_search = view.searching || !view.screen.search.is_empty();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    if show_search {
        TextInput {
            title: "Search by name",
            value: &view.screen.search,
            focused: view.searching,
            style: Style::default().fg(app.theme.border),
            focus_style: Style::default().fg(app.theme.border_focus),
        }
        .render(f, rows[0]);
    }

    if let Some(status) = StatusIndicator::for_state("Patients", view.screen.sync_state(), &app.theme) {
        status.render(f, rows[1]);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let visible = view.screen.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|patient| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", patient.name)),
                Span::styled(
                    format!("({})", patient.gender),
                    Style::default().fg(gender_color(patient.gender, &app.theme)),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = view.selected {
        state.select(visible.iter().position(|p| p.id == selected));
    }

    let title = if visible.is_empty() {
        "Patients (none)".to_string()
    } else {
        format!("Patients ({})", visible.len())
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(patient) = view.selected_patient() {
        DetailPanel::patient("Details", patient, &app.theme).render(f, chunks[1]);

        if view.pending_delete == Some(patient.id) {
            render_confirm(
                f,
                &app.theme,
                "Delete patient",
                format!("Delete {}? Their notes are kept.", patient.name),
                area,
            );
        }
    }
}
