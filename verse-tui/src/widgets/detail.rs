//! Labelled record panels for patients and notes.

use crate::theme::{gender_color, ClinicTheme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use verse_core::{Note, Patient};

/// Field lines, optionally followed by a free-text body.
pub struct DetailPanel<'a> {
    title: &'a str,
    fields: Vec<(&'static str, Span<'a>)>,
    body: Option<&'a str>,
    theme: &'a ClinicTheme,
}

impl<'a> DetailPanel<'a> {
    pub fn patient(title: &'a str, patient: &'a Patient, theme: &'a ClinicTheme) -> Self {
        let gender = Span::styled(
            patient.gender.to_string(),
            Style::default().fg(gender_color(patient.gender, theme)),
        );
        Self {
            title,
            fields: vec![
                ("Patient ID", Span::raw(patient.id.to_string())),
                ("Name", Span::raw(patient.name.as_str())),
                (
                    "Date of Birth",
                    Span::raw(patient.date_of_birth.format("%Y-%m-%d").to_string()),
                ),
                ("Gender", gender),
            ],
            body: None,
            theme,
        }
    }

    /// Note metadata with the content as the body, whitespace kept as typed.
    pub fn note(note: &'a Note, theme: &'a ClinicTheme) -> Self {
        let updated = match note.updated_at {
            Some(at) => Span::raw(at.to_rfc3339()),
            None => Span::styled("never", Style::default().fg(theme.text_dim)),
        };
        Self {
            title: "Details",
            fields: vec![
                ("Note ID", Span::raw(note.id.to_string())),
                ("Patient ID", Span::raw(note.patient_id.to_string())),
                ("Created", Span::raw(note.created_at.to_rfc3339())),
                ("Updated", updated),
            ],
            body: Some(note.content.as_str()),
            theme,
        }
    }

    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((label, Span::raw(value.into())));
        self
    }

    /// Inner rows needed to show every field without the body.
    pub fn field_rows(&self) -> u16 {
        u16::try_from(self.fields.len()).unwrap_or(u16::MAX)
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label_style = Style::default()
            .fg(self.theme.secondary)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'a>> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![Span::styled(format!("{label}: "), label_style), value.clone()])
            })
            .collect();

        if let Some(body) = self.body {
            lines.push(Line::default());
            lines.extend(body.split('\n').map(|row| Line::from(Span::raw(row))));
        }
        lines
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let widget = Paragraph::new(Text::from(self.lines()))
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use verse_core::{Gender, NoteId, PatientId};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_note_body_keeps_blank_lines_and_padding() {
        let theme = ClinicTheme::clinic();
        let note = Note {
            id: NoteId::new(0),
            patient_id: PatientId::new(3),
            content: "  BP 120/80\n\nrecheck".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            updated_at: None,
        };

        let lines: Vec<String> = DetailPanel::note(&note, &theme)
            .lines()
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(lines[0], "Note ID: 0");
        assert_eq!(lines[3], "Updated: never");
        assert_eq!(lines[4..], ["", "  BP 120/80", "", "recheck"]);
    }

    #[test]
    fn test_extra_patient_field_is_appended() {
        let theme = ClinicTheme::clinic();
        let patient = Patient {
            id: PatientId::new(9),
            name: "Ada Lovelace".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            gender: Gender::Female,
        };

        let panel = DetailPanel::patient("Patient", &patient, &theme).field("Notes", "2");
        let lines: Vec<String> = panel.lines().iter().map(line_text).collect();

        assert_eq!(panel.field_rows(), 5);
        assert_eq!(lines[2], "Date of Birth: 1815-12-10");
        assert_eq!(lines[4], "Notes: 2");
    }
}
