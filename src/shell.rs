//! The application shell.
//!
//! Owns the view state, the single mounted screen, the sidebar, the toast
//! queue and the store. Navigation requests from the sidebar, the global
//! page keys and the screens themselves all end up in [`AppShell::navigate`].

use crate::api::InteractionBackend;
use crate::components::{Footer, Sidebar, SidebarAction, SIDEBAR_WIDTH};
use crate::keymap::{Action, Keymap};
use crate::screens::{RenderContext, ScreenAction, ScreenContext};
use crate::state::{mount, ActiveScreen, Focus, Page, ViewState};
use crate::store::Store;
use crate::utils::{cap_width, pad};
use crate::widgets::ToastManager;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tracing::{debug, error, info};

/// Widest the content region gets
pub const MAX_CONTENT_WIDTH: u16 = 120;

/// Default terminal width below which the compact layout is used
pub const DEFAULT_COMPACT_BREAKPOINT: u16 = 100;

const FOOTER_HEIGHT: u16 = 2;

/// Layout chosen from the terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Sidebar panel on the left
    Wide,
    /// One-line menu bar on top, sidebar in a drawer
    Compact,
}

impl LayoutMode {
    pub fn for_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            LayoutMode::Compact
        } else {
            LayoutMode::Wide
        }
    }
}

pub struct AppShell {
    view: ViewState,
    screen: ActiveScreen,
    sidebar: Sidebar,
    toasts: ToastManager,
    store: Store,
    keymap: Keymap,
    backend: Option<Box<dyn InteractionBackend>>,
    focus: Focus,
    compact_breakpoint: u16,
    layout: LayoutMode,
    /// Fixed date for tests; `None` means the local date
    today: Option<NaiveDate>,
}

impl AppShell {
    /// Build the shell on the dashboard with the sidebar focused.
    pub fn new(store: Store, keymap: Keymap) -> Result<Self> {
        let mut shell = Self {
            view: ViewState::new(),
            screen: mount(Page::default()),
            sidebar: Sidebar::new(),
            toasts: ToastManager::new(),
            store,
            keymap,
            backend: None,
            focus: Focus::Sidebar,
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
            layout: LayoutMode::Wide,
            today: None,
        };
        shell.enter_screen()?;
        Ok(shell)
    }

    pub fn with_backend(mut self, backend: Box<dyn InteractionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_compact_breakpoint(mut self, breakpoint: u16) -> Self {
        self.compact_breakpoint = breakpoint;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn current_page(&self) -> Page {
        self.view.get()
    }

    /// The mounted screen
    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Layout used for the last render
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Switch to `page`. Selecting the current page keeps the mounted screen.
    ///
    /// Returns whether a new screen was mounted.
    pub fn navigate(&mut self, page: Page) -> Result<bool> {
        if !self.view.set(page) {
            return Ok(false);
        }
        self.remount()?;
        Ok(true)
    }

    /// Switch to the page with identifier `id`; unknown ids go to the dashboard.
    pub fn set_page_id(&mut self, id: &str) -> Result<bool> {
        if !self.view.set_id(id) {
            return Ok(false);
        }
        self.remount()?;
        Ok(true)
    }

    fn remount(&mut self) -> Result<()> {
        let page = self.view.get();
        let today = self.today();
        {
            let mut ctx = ScreenContext::new(
                &mut self.store,
                &mut self.toasts,
                &self.keymap,
                today,
            );
            self.screen.as_screen_mut().on_exit(&mut ctx)?;
        }
        debug!("Unmounted {}", self.screen.page());

        self.screen = mount(page);
        self.sidebar.select(page);
        self.enter_screen()?;
        info!("Navigated to {}", page);
        Ok(())
    }

    fn enter_screen(&mut self) -> Result<()> {
        let today = self.today();
        let mut ctx = ScreenContext::new(&mut self.store, &mut self.toasts, &self.keymap, today)
            .with_backend(self.backend.as_deref());
        self.screen.as_screen_mut().on_enter(&mut ctx)
    }

    /// Expire the visible toast if its time is up.
    pub fn tick(&mut self) {
        self.toasts.tick();
    }

    /// Handle one terminal event. Returns `true` when the app should quit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                if let SidebarAction::PageChange(page) = self.sidebar.handle_mouse(mouse) {
                    self.open_page(page)?;
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        let action = self.keymap.get_action(key.code, key.modifiers);
        let typing = self.focus == Focus::Content
            && !self.sidebar.is_drawer_open()
            && self.screen.as_screen().is_input_focused();

        // Typing swallows single-key globals
        let global = action.filter(|a| !typing || a.allowed_in_text_input());
        match global {
            Some(Action::Quit) => return Ok(true),
            Some(Action::GoToDashboard) => {
                return self.open_page(Page::Dashboard).map(|()| false)
            }
            Some(Action::GoToLogInteraction) => {
                return self.open_page(Page::LogInteraction).map(|()| false)
            }
            Some(Action::GoToInteractionsList) => {
                return self.open_page(Page::InteractionsList).map(|()| false)
            }
            Some(Action::ToggleMenu) if self.layout == LayoutMode::Compact => {
                self.sidebar.toggle_drawer();
                self.focus = if self.sidebar.is_drawer_open() {
                    Focus::Sidebar
                } else {
                    Focus::Content
                };
                return Ok(false);
            }
            _ => {}
        }

        if self.focus == Focus::Sidebar || self.sidebar.is_drawer_open() {
            let Some(action) = action else {
                return Ok(false);
            };
            if action == Action::Confirm
                && self.layout == LayoutMode::Compact
                && !self.sidebar.is_drawer_open()
            {
                self.sidebar.toggle_drawer();
                return Ok(false);
            }
            match self.sidebar.handle_action(action) {
                SidebarAction::PageChange(page) => self.open_page(page)?,
                SidebarAction::FocusContent => self.focus = Focus::Content,
                SidebarAction::None => {}
            }
            return Ok(false);
        }

        let today = self.today();
        let screen_action = {
            let mut ctx = ScreenContext::new(&mut self.store, &mut self.toasts, &self.keymap, today)
                .with_backend(self.backend.as_deref());
            self.screen
                .as_screen_mut()
                .handle_event(Event::Key(key), &mut ctx)?
        };

        match screen_action {
            ScreenAction::None => {}
            ScreenAction::FocusSidebar => {
                self.focus = Focus::Sidebar;
                self.sidebar.select(self.view.get());
            }
            ScreenAction::Navigate(page) => self.open_page(page)?,
        }
        Ok(false)
    }

    /// Navigate and hand focus to the content region.
    fn open_page(&mut self, page: Page) -> Result<()> {
        self.navigate(page)?;
        self.sidebar.close_drawer();
        self.focus = Focus::Content;
        Ok(())
    }

    fn badges(&self) -> Vec<(Page, String)> {
        let pending = self
            .store
            .interactions()
            .iter()
            .filter(|i| i.has_pending_follow_up())
            .count();
        let mut badges = vec![(Page::InteractionsList, self.store.len().to_string())];
        if pending > 0 {
            badges.push((Page::Dashboard, format!("\u{2691} {}", pending))); // ⚑
        }
        badges
    }

    fn footer_text(&self) -> String {
        let hint = if self.focus == Focus::Sidebar || self.sidebar.is_drawer_open() {
            self.keymap.footer_sidebar()
        } else {
            self.screen.as_screen().footer_hint(&self.keymap)
        };
        if self.layout == LayoutMode::Compact {
            format!("{}: Menu | {}", self.keymap.key_for(Action::ToggleMenu), hint)
        } else {
            hint
        }
    }

    /// Draw the whole frame: navigation, the mounted screen, footer, toast.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.layout = LayoutMode::for_width(area.width, self.compact_breakpoint);
        let current = self.view.get();
        let badges = self.badges();
        let sidebar_focused = self.focus == Focus::Sidebar || self.sidebar.is_drawer_open();

        let [main, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(area);

        let (content, drawer_area) = match self.layout {
            LayoutMode::Wide => {
                self.sidebar.close_drawer();
                let [nav, content] =
                    Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                        .areas(main);
                self.sidebar
                    .render(frame, nav, current, sidebar_focused, &badges);
                (pad(cap_width(content, MAX_CONTENT_WIDTH), 2, 1), None)
            }
            LayoutMode::Compact => {
                let [bar, content] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(main);
                self.sidebar.render_bar(frame, bar, current, sidebar_focused);
                (pad(cap_width(content, MAX_CONTENT_WIDTH), 1, 0), Some(content))
            }
        };

        let today = self.today();
        let ctx = RenderContext::new(&self.store, &self.keymap, today).focused(!sidebar_focused);
        if let Err(e) = self.screen.as_screen_mut().render(frame, content, &ctx) {
            error!("Failed to render {}: {:#}", current, e);
        }

        if let Some(drawer_area) = drawer_area {
            self.sidebar
                .render_drawer(frame, drawer_area, current, &badges);
        }

        Footer::render(frame, footer, &self.footer_text());
        self.toasts.render(frame, area);
    }

    /// Region the content screen is drawn into for a frame of `area`
    pub fn content_area(&self, area: Rect) -> Rect {
        let [main, _] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(area);
        match LayoutMode::for_width(area.width, self.compact_breakpoint) {
            LayoutMode::Wide => {
                let [_, content] =
                    Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                        .areas(main);
                pad(cap_width(content, MAX_CONTENT_WIDTH), 2, 1)
            }
            LayoutMode::Compact => {
                let [_, content] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(main);
                pad(cap_width(content, MAX_CONTENT_WIDTH), 1, 0)
            }
        }
    }
}
