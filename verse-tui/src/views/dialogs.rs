//! Modal overlays drawn on top of a screen.

use crate::theme::ClinicTheme;
use crate::widgets::TextInput;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use verse_client::screens::NoteDialog;

/// Rectangle of the given percentages, centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_confirm(f: &mut Frame<'_>, theme: &ClinicTheme, title: &str, message: String, area: Rect) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);
    let body = Paragraph::new(format!("{message}\n\ny / Enter confirm • Esc cancel"))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        );
    f.render_widget(body, popup);
}

pub fn render_note_dialog(f: &mut Frame<'_>, theme: &ClinicTheme, dialog: &NoteDialog, area: Rect) {
    match dialog {
        NoteDialog::Closed => {}
        NoteDialog::Editing(draft) => {
            let popup = centered_rect(70, 50, area);
            f.render_widget(Clear, popup);
            let title = format!("Edit note #{} (Ctrl-s save, Esc cancel)", draft.note_id);
            TextInput {
                title: &title,
                value: &draft.content,
                focused: true,
                style: Style::default().fg(theme.border),
                focus_style: Style::default().fg(theme.border_focus),
            }
            .render(f, popup);
        }
        NoteDialog::ConfirmDelete { candidate } => render_confirm(
            f,
            theme,
            "Delete note",
            format!("Delete note #{candidate}? This cannot be undone."),
            area,
        ),
    }
}
