//! View rendering dispatch.

pub mod all_notes;
pub mod dialogs;
pub mod patient_form;
pub mod patient_notes;
pub mod patients;

use crate::keys::KeyContext;
use crate::nav::{Route, View};
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view<S>(f: &mut Frame<'_>, app: &App<S>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.route() {
        Route::Patients => patients::render(f, app, layout[1]),
        Route::AllNotes => all_notes::render(f, app, layout[1]),
        Route::PatientNotes => patient_notes::render(f, app, layout[1]),
        Route::PatientForm => patient_form::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
}

fn render_header<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let mut spans = Vec::new();
    for (index, view) in View::all().iter().enumerate() {
        let style = if *view == app.active_view {
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::styled(format!(" [{}] {} ", index + 1, view.title()), style));
    }
    let sync_label = app.sync_label();
    let sync_color = match sync_label {
        "Loading" => app.theme.warning,
        "Error" => app.theme.error,
        "Ready" => app.theme.success,
        _ => app.theme.text_dim,
    };
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(sync_label, Style::default().fg(sync_color)));

    let title = format!("Verse | {}", app.title());
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default().borders(Borders::ALL).title(Span::styled(
            title,
            Style::default().fg(app.theme.primary),
        )),
    );
    f.render_widget(header, area);
}

fn key_help<S>(app: &App<S>) -> &'static str {
    match (app.route(), app.key_context()) {
        (Route::PatientForm, _) => "Tab next field • m/f/o or space gender • Enter save • Esc cancel",
        (_, KeyContext::MultiLine) => "type to edit • Enter newline • Ctrl-s save • Esc cancel",
        (_, KeyContext::SingleLine) => "type to search • Enter done • Esc clear",
        (Route::Patients, _) => {
            "j/k move • Enter open • n new • e edit • d delete • / search • Ctrl-r refresh • Tab switch • q quit"
        }
        (Route::AllNotes, _) => {
            "j/k move • Enter patient • e edit • d delete • Ctrl-r refresh • Tab switch • q quit"
        }
        (Route::PatientNotes, _) => {
            "j/k move • n new note • e edit • d delete • Ctrl-r refresh • Esc back • q quit"
        }
    }
}

fn render_footer<S>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let (text, style) = match app.current_notification() {
        Some(note) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            key_help(app).to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
