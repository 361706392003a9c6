//! Loading and error panels for a screen's sync state.

use crate::theme::{sync_state_color, ClinicTheme};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use verse_client::screens::SyncState;

pub struct StatusIndicator {
    pub title: String,
    pub status: String,
    pub style: Style,
}

impl StatusIndicator {
    /// Panel standing in for a snapshot that is not `Ready`.
    pub fn for_state<T>(title: &str, state: &SyncState<T>, theme: &ClinicTheme) -> Option<Self> {
        let status = match state {
            SyncState::Ready(_) => return None,
            SyncState::Idle => "Not loaded yet.".to_string(),
            SyncState::Loading => "Loading...".to_string(),
            SyncState::Error(err) => err.to_string(),
        };
        Some(Self {
            title: title.to_string(),
            status,
            style: Style::default().fg(sync_state_color(state, theme)),
        })
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.status.clone())
            .style(self.style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL),
            );
        f.render_widget(paragraph, area);
    }
}
