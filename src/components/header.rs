use crate::state::Page;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

/// Title bar drawn at the top of every screen
pub struct Header;

impl Header {
    /// Height of the header in rows
    pub const HEIGHT: u16 = 3;

    /// Render the page title with a one-line description on the right.
    pub fn render(frame: &mut Frame, area: Rect, page: Page, description: &str) {
        let t = theme();
        let accent = t.page_color(page);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(accent))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title = Line::from(vec![
            Span::styled(
                format!("{} ", page.icon()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(page.title(), t.title_style()),
        ]);
        let title_width = title.width() as u16 + 2;

        let [title_area, desc_area] =
            Layout::horizontal([Constraint::Length(title_width), Constraint::Min(0)]).areas(inner);
        frame.render_widget(Paragraph::new(title), title_area);
        frame.render_widget(
            Paragraph::new(description)
                .style(t.muted_style())
                .alignment(Alignment::Right),
            desc_area,
        );
    }
}
