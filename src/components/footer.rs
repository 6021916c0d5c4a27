use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key hint footer shared by the shell
pub struct Footer;

impl Footer {
    /// Render key hints in the form `"Label: keys | Label: keys"`.
    ///
    /// Uses two rows: one for the border, one for the text.
    pub fn render(frame: &mut Frame, area: Rect, text: &str) {
        frame.render_widget(Self::paragraph(text), area);
    }

    fn paragraph(text: &str) -> Paragraph<'_> {
        let t = theme();
        let mut spans = Vec::new();

        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            // Split on ": " to separate keys from the label
            if let Some((keys, label)) = part.split_once(": ") {
                spans.push(Span::styled(
                    keys,
                    t.emphasis_style().add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(format!(": {}", label), t.text_style()));
            } else {
                spans.push(Span::styled(part, t.text_style()));
            }
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_footer_renders_hints() {
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        terminal
            .draw(|f| Footer::render(f, f.area(), "↑/↓: Navigate | Q: Quit"))
            .unwrap();
        let buf = terminal.backend().buffer();
        let row: String = (0..60).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("Navigate"));
        assert!(row.contains("Q: Quit"));
    }
}
