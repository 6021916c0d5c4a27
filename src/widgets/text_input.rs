//! Widget for rendering a [`TextInput`] as a bordered form field.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// A bordered, titled input field.
///
/// # Example
/// ```
/// use hcp_crm::utils::TextInput;
/// use hcp_crm::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("Dr. Sarah Johnson");
/// let widget = TextInputWidget::new(&input)
///     .title("HCP name")
///     .placeholder("Who did you meet?")
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn display_text(&self) -> &str {
        let text = self.input.text();
        if text.is_empty() {
            self.placeholder.unwrap_or("")
        } else {
            text
        }
    }

    fn block(&self) -> Block<'a> {
        let t = theme();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                t.border_focused_style()
            } else {
                t.border_style()
            });
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }

    /// Horizontal scroll so the cursor stays inside `width` columns
    fn scroll_offset(&self, width: u16) -> u16 {
        let cursor = self.input.cursor() as u16;
        cursor.saturating_sub(width.saturating_sub(1))
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let block = self.block();
        let inner = block.inner(area);
        let style = if self.input.text().is_empty() {
            t.muted_style()
        } else {
            t.text_style()
        };

        Paragraph::new(self.display_text())
            .style(style)
            .scroll((0, self.scroll_offset(inner.width)))
            .block(block)
            .render(area, buf);
    }
}

/// Render a [`TextInputWidget`] and place the terminal cursor when focused.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let focused = widget.focused;
        let inner = widget.block().inner(area);
        let offset = widget.scroll_offset(inner.width);
        let cursor = widget.input.cursor() as u16;

        self.render_widget(widget, area);

        if focused && inner.width > 0 {
            let x = inner.x + cursor.saturating_sub(offset).min(inner.width - 1);
            self.set_cursor_position((x, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_when_empty() {
        let input = TextInput::new();
        let widget = TextInputWidget::new(&input).placeholder("YYYY-MM-DD");
        assert_eq!(widget.display_text(), "YYYY-MM-DD");

        let input = TextInput::with_text("2026-05-01");
        let widget = TextInputWidget::new(&input).placeholder("YYYY-MM-DD");
        assert_eq!(widget.display_text(), "2026-05-01");
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let input = TextInput::with_text("a".repeat(30));
        let widget = TextInputWidget::new(&input);
        assert_eq!(widget.scroll_offset(10), 21);

        let input = TextInput::with_text("short");
        let widget = TextInputWidget::new(&input);
        assert_eq!(widget.scroll_offset(10), 0);
    }

    #[test]
    fn test_renders_title_and_text() {
        let input = TextInput::with_text("Dr. Kim");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TextInputWidget::new(&input)
            .title("HCP")
            .render(area, &mut buf);
        let top: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        let middle: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(top.contains("HCP"));
        assert!(middle.contains("Dr. Kim"));
    }
}
