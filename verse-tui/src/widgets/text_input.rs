//! Bordered text field with a trailing cursor when focused.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: char = '_';

pub struct TextInput<'a> {
    pub title: &'a str,
    pub value: &'a str,
    pub focused: bool,
    pub style: Style,
    pub focus_style: Style,
}

impl<'a> TextInput<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut text = self.value.to_string();
        if self.focused {
            text.push(CURSOR);
        }
        let border_style = if self.focused {
            self.focus_style
        } else {
            self.style
        };
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);
    }
}
