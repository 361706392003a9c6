//! Clinic theme and color utilities.

use crate::notifications::NotificationLevel;
use ratatui::style::Color;
use verse_client::screens::SyncState;
use verse_core::Gender;

#[derive(Debug, Clone)]
pub struct ClinicTheme {
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl ClinicTheme {
    pub fn clinic() -> Self {
        Self {
            bg_highlight: Color::Rgb(220, 235, 240),
            primary: Color::Rgb(0, 121, 140),
            secondary: Color::Rgb(46, 84, 140),
            success: Color::Rgb(46, 139, 87),
            warning: Color::Rgb(204, 140, 0),
            error: Color::Rgb(200, 40, 40),
            info: Color::Rgb(0, 121, 140),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(120, 120, 120),
            border: Color::Rgb(160, 170, 175),
            border_focus: Color::Rgb(0, 121, 140),
        }
    }
}

impl Default for ClinicTheme {
    fn default() -> Self {
        Self::clinic()
    }
}

pub fn sync_state_color<T>(state: &SyncState<T>, theme: &ClinicTheme) -> Color {
    match state {
        SyncState::Idle => theme.text_dim,
        SyncState::Loading => theme.warning,
        SyncState::Ready(_) => theme.success,
        SyncState::Error(_) => theme.error,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &ClinicTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

pub fn gender_color(gender: Gender, theme: &ClinicTheme) -> Color {
    match gender {
        Gender::Male => theme.secondary,
        Gender::Female => theme.primary,
        Gender::Other => theme.text_dim,
    }
}
