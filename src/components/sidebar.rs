//! Navigation sidebar.
//!
//! Shows the three destinations as menu cards. It gets the current page from
//! the shell on every render and answers events with a [`SidebarAction`];
//! the shell alone decides whether the page actually changes.

use crate::keymap::Action;
use crate::state::Page;
use crate::styles::theme;
use crate::widgets::{Menu, MenuItem, MenuState};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

/// Width of the sidebar panel (and of the compact drawer)
pub const SIDEBAR_WIDTH: u16 = 30;

/// What the sidebar asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarAction {
    #[default]
    None,
    /// The user picked a page
    PageChange(Page),
    /// Hand keyboard focus to the content region without navigating
    FocusContent,
}

#[derive(Debug)]
pub struct Sidebar {
    menu_state: MenuState,
    drawer_open: bool,
    /// Where the cards were last drawn, for mouse hit testing
    menu_area: Rect,
    /// Where the compact menu bar was last drawn
    bar_area: Rect,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn new() -> Self {
        let mut menu_state = MenuState::new();
        menu_state.select(Some(Page::default().index()));
        menu_state.set_active(Some(Page::default().index()));
        Self {
            menu_state,
            drawer_open: false,
            menu_area: Rect::default(),
            bar_area: Rect::default(),
        }
    }

    /// Page under the cursor
    pub fn selected(&self) -> Page {
        self.menu_state
            .selected()
            .and_then(Page::from_index)
            .unwrap_or_default()
    }

    /// Move the cursor onto `page`
    pub fn select(&mut self, page: Page) {
        self.menu_state.select(Some(page.index()));
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Handle a keymap action while the sidebar has focus.
    pub fn handle_action(&mut self, action: Action) -> SidebarAction {
        let len = Page::ALL.len();
        let selected = self.selected().index();
        match action {
            Action::MoveUp => self.menu_state.select(Some((selected + len - 1) % len)),
            Action::MoveDown => self.menu_state.select(Some((selected + 1) % len)),
            Action::GoToTop => self.menu_state.select(Some(0)),
            Action::GoToEnd => self.menu_state.select(Some(len - 1)),
            Action::Confirm => {
                self.drawer_open = false;
                return SidebarAction::PageChange(self.selected());
            }
            Action::MoveRight => {
                self.drawer_open = false;
                return SidebarAction::FocusContent;
            }
            Action::Cancel if self.drawer_open => self.drawer_open = false,
            _ => {}
        }
        SidebarAction::None
    }

    /// Handle a mouse event anywhere in the frame.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> SidebarAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return SidebarAction::None;
        }
        let position = Position::new(mouse.column, mouse.row);

        if self.bar_area.contains(position) {
            self.toggle_drawer();
            return SidebarAction::None;
        }

        if let Some(page) = Self::card_at(self.menu_area, position) {
            self.select(page);
            self.drawer_open = false;
            return SidebarAction::PageChange(page);
        }
        SidebarAction::None
    }

    fn card_at(area: Rect, position: Position) -> Option<Page> {
        Self::menu(Page::default(), &[], false)
            .item_at(area, position)
            .and_then(Page::from_index)
    }

    fn menu(current: Page, badges: &[(Page, String)], focused: bool) -> Menu {
        let t = theme();
        let items = Page::ALL
            .iter()
            .map(|page| {
                let color = if *page == current {
                    t.page_color(*page)
                } else {
                    t.text
                };
                let item = MenuItem::new(page.icon(), page.title(), color);
                match badges.iter().find(|(p, _)| p == page) {
                    Some((_, badge)) => item.info(badge.clone()),
                    None => item,
                }
            })
            .collect();
        Menu::new(items).focused(focused)
    }

    /// Render the full sidebar panel.
    ///
    /// `badges` adds a small counter next to a page title.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        current: Page,
        focused: bool,
        badges: &[(Page, String)],
    ) {
        let t = theme();
        self.menu_state.set_active(Some(current.index()));
        self.bar_area = Rect::default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                t.border_focused_style()
            } else {
                t.border_style()
            })
            .title(" HCP CRM ")
            .title_style(t.title_style())
            .padding(Padding::vertical(1))
            .style(t.background_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.menu_area = inner;
        frame.render_stateful_widget(
            Self::menu(current, badges, focused),
            inner,
            &mut self.menu_state,
        );
    }

    /// Render the one-line menu bar used in compact layouts.
    pub fn render_bar(&mut self, frame: &mut Frame, area: Rect, current: Page, focused: bool) {
        let t = theme();
        self.bar_area = area;
        if !self.drawer_open {
            self.menu_area = Rect::default();
        }

        let marker = if self.drawer_open { "\u{2715}" } else { "\u{2630}" }; // ✕ / ☰
        let marker_style = if focused {
            t.border_focused_style().add_modifier(Modifier::BOLD)
        } else {
            t.muted_style()
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} Menu ", marker), marker_style),
            Span::styled("\u{2502} ", t.border_style()), // │
            Span::styled(
                format!("{} {}", current.icon(), current.title()),
                Style::default()
                    .fg(t.page_color(current))
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(t.background_style()),
            area,
        );
    }

    /// Render the drawer over `area` (the region below the menu bar).
    pub fn render_drawer(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        current: Page,
        badges: &[(Page, String)],
    ) {
        if !self.drawer_open {
            return;
        }
        let width = SIDEBAR_WIDTH.min(area.width);
        let height = (Page::ALL.len() as u16 * crate::widgets::menu::ITEM_HEIGHT + 4).min(area.height);
        let drawer = Rect::new(area.x, area.y, width, height);
        frame.render_widget(Clear, drawer);

        let bar_area = self.bar_area;
        self.render(frame, drawer, current, true, badges);
        self.bar_area = bar_area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_starts_on_dashboard() {
        let sidebar = Sidebar::new();
        assert_eq!(sidebar.selected(), Page::Dashboard);
        assert!(!sidebar.is_drawer_open());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.handle_action(Action::MoveUp), SidebarAction::None);
        assert_eq!(sidebar.selected(), Page::InteractionsList);
        sidebar.handle_action(Action::MoveDown);
        assert_eq!(sidebar.selected(), Page::Dashboard);
    }

    #[test]
    fn test_confirm_emits_page_change() {
        let mut sidebar = Sidebar::new();
        sidebar.handle_action(Action::MoveDown);
        assert_eq!(
            sidebar.handle_action(Action::Confirm),
            SidebarAction::PageChange(Page::LogInteraction)
        );
    }

    #[test]
    fn test_confirm_closes_drawer() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle_drawer();
        sidebar.handle_action(Action::Confirm);
        assert!(!sidebar.is_drawer_open());

        sidebar.toggle_drawer();
        sidebar.handle_action(Action::Cancel);
        assert!(!sidebar.is_drawer_open());
    }

    #[test]
    fn test_mouse_click_on_card() {
        let mut sidebar = Sidebar::new();
        sidebar.menu_area = Rect::new(1, 2, 28, 9);
        assert_eq!(
            sidebar.handle_mouse(click(5, 8)),
            SidebarAction::PageChange(Page::InteractionsList)
        );
        assert_eq!(sidebar.selected(), Page::InteractionsList);
        assert_eq!(sidebar.handle_mouse(click(50, 8)), SidebarAction::None);
    }

    #[test]
    fn test_mouse_click_on_bar_toggles_drawer() {
        let mut sidebar = Sidebar::new();
        sidebar.bar_area = Rect::new(0, 0, 80, 1);
        sidebar.handle_mouse(click(3, 0));
        assert!(sidebar.is_drawer_open());
        sidebar.handle_mouse(click(3, 0));
        assert!(!sidebar.is_drawer_open());
    }
}
