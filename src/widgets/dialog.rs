//! Confirmation dialog drawn over the content region.

use crate::styles::theme;
use crate::utils::center_popup;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

/// A centred yes/no dialog with a warning border.
pub struct Dialog<'a> {
    title: &'a str,
    content: &'a str,
    footer: &'a str,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            footer: "y: Yes | n/Esc: No",
        }
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = footer;
        self
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let width = (self.content.chars().count() as u16 + 8).clamp(36, 64);
        let lines = (self.content.chars().count() as u16 / width.saturating_sub(6).max(1)) + 1;
        let popup = center_popup(area, width, lines + 5);

        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.warning_style())
            .title(format!(" {} ", self.title))
            .title_style(t.title_style())
            .padding(Padding::horizontal(2))
            .style(t.background_style());

        let text = vec![
            Line::from(Span::styled(self.content, t.text_style())),
            Line::default(),
            Line::from(Span::styled(self.footer, t.muted_style())),
        ];

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .render(popup, buf);
    }
}
