//! Card-style menu used by the sidebar.
//!
//! Each item is a three-line card. The item under the cursor gets the
//! highlight background; the item for the page currently on screen gets a
//! left accent bar, so both are visible at once.

use crate::styles::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

/// Height of one card in rows
pub const ITEM_HEIGHT: u16 = 3;

/// A single menu item
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub icon: String,
    pub text: String,
    pub color: Color,
    /// Optional trailing info (e.g. "12")
    pub info: Option<String>,
}

impl MenuItem {
    pub fn new(icon: impl Into<String>, text: impl Into<String>, color: Color) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            color,
            info: None,
        }
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

/// Cursor and active item for the [`Menu`] widget
#[derive(Debug, Default, Clone)]
pub struct MenuState {
    selected: Option<usize>,
    active: Option<usize>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Mark the item whose page is on screen
    pub fn set_active(&mut self, index: Option<usize>) {
        self.active = index;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

/// Card menu widget
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
    focused: bool,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            focused: true,
        }
    }

    /// Dim the cursor highlight when the menu does not have keyboard focus
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Index of the card under `position`, if any
    pub fn item_at(&self, area: Rect, position: Position) -> Option<usize> {
        if !area.contains(position) {
            return None;
        }
        let index = ((position.y - area.y) / ITEM_HEIGHT) as usize;
        let fits = area.y + (index as u16 + 1) * ITEM_HEIGHT <= area.y + area.height;
        (index < self.items.len() && fits).then_some(index)
    }
}

impl StatefulWidget for Menu {
    type State = MenuState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let t = theme();

        for (i, item) in self.items.iter().enumerate() {
            let y = area.y + i as u16 * ITEM_HEIGHT;
            if y + ITEM_HEIGHT > area.y + area.height {
                break;
            }

            let is_selected = self.focused && state.selected == Some(i);
            let is_active = state.active == Some(i);

            let bg = if is_selected { t.selection_bg } else { t.background };
            let style = Style::default().fg(item.color).bg(bg);
            let bold = style.add_modifier(Modifier::BOLD);
            let bar = if is_active { "\u{258C}" } else { " " }; // ▌
            let bar_style = Style::default().fg(t.focus).bg(bg);
            let fill = |used: usize| {
                Span::styled(" ".repeat((area.width as usize).saturating_sub(used)), style)
            };

            let padding = Line::from(vec![Span::styled(bar, bar_style), fill(1)]);
            padding
                .clone()
                .render(Rect::new(area.x, y, area.width, 1), buf);

            let mut spans = vec![
                Span::styled(bar, bar_style),
                Span::styled(" ", style),
                Span::styled(format!("{} ", item.icon), bold),
                Span::styled(item.text.as_str(), if is_active { bold } else { style }),
            ];
            if let Some(ref info) = item.info {
                spans.push(Span::styled(
                    format!(" ({})", info),
                    Style::default().fg(t.muted).bg(bg),
                ));
            }
            let used = Line::from(spans.clone()).width();
            spans.push(fill(used));
            Line::from(spans).render(Rect::new(area.x, y + 1, area.width, 1), buf);

            padding.render(Rect::new(area.x, y + 2, area.width, 1), buf);
        }
    }
}
