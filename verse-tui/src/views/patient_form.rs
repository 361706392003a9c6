//! Create/edit patient form.

use crate::state::App;
use crate::widgets::{StatusIndicator, TextInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};
use verse_client::screens::{FormField, Screen, SyncState};

pub fn render<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let block = Block::default().title(form.title()).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if matches!(form.sync_state(), SyncState::Idle | SyncState::Loading) {
        if let Some(status) = StatusIndicator::for_state("Patient", form.sync_state(), &app.theme) {
            status.render(f, inner);
        }
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let gender = form
        .draft
        .gender
        .map(|g| g.to_string())
        .unwrap_or_else(|| "(choose m / f / o)".to_string());
    let fields = [
        (FormField::Name, form.draft.name.as_str(), rows[0]),
        (FormField::DateOfBirth, form.draft.date_of_birth.as_str(), rows[1]),
        (FormField::Gender, gender.as_str(), rows[2]),
    ];
    for (field, value, row) in fields {
        let title = match field {
            FormField::DateOfBirth => "Date of Birth (YYYY-MM-DD)",
            other => other.label(),
        };
        TextInput {
            title,
            value,
            focused: form.focus == field,
            style: Style::default().fg(app.theme.border),
            focus_style: Style::default().fg(app.theme.border_focus),
        }
        .render(f, row);
    }

    if form.sync_state().error().is_some() {
        if let Some(status) = StatusIndicator::for_state("Error", form.sync_state(), &app.theme) {
            status.render(f, rows[3]);
        }
    }
}
