//! Screen trait and associated types.
//!
//! Screens own their state; everything shared (the store, the toast queue,
//! the keymap, the backend) reaches them through a context object built by
//! the shell for each call.
//!
//! 1. Screens never hold on to the store between calls
//! 2. Event handling returns an action instead of mutating shell state
//! 3. Rendering only gets read access

use crate::api::InteractionBackend;
use crate::keymap::Keymap;
use crate::state::Page;
use crate::store::Store;
use crate::widgets::ToastManager;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    /// The shared interaction store.
    pub store: &'a Store,
    pub keymap: &'a Keymap,
    /// Date used for "this week" and form defaults.
    pub today: NaiveDate,
    /// Whether the content region has keyboard focus.
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(store: &'a Store, keymap: &'a Keymap, today: NaiveDate) -> Self {
        Self {
            store,
            keymap,
            today,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Context provided for handling events.
pub struct ScreenContext<'a> {
    /// The shared interaction store (write access).
    pub store: &'a mut Store,
    /// Shell-level toast queue.
    pub toasts: &'a mut ToastManager,
    pub keymap: &'a Keymap,
    /// Chat logging backend, `None` when disabled.
    pub backend: Option<&'a dyn InteractionBackend>,
    pub today: NaiveDate,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        store: &'a mut Store,
        toasts: &'a mut ToastManager,
        keymap: &'a Keymap,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            toasts,
            keymap,
            backend: None,
            today,
        }
    }

    pub fn with_backend(mut self, backend: Option<&'a dyn InteractionBackend>) -> Self {
        self.backend = backend;
        self
    }
}

/// Actions that a screen can return after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// No action needed, stay on current screen.
    #[default]
    None,
    /// Give keyboard focus back to the sidebar.
    FocusSidebar,
    /// Switch to another page.
    Navigate(Page),
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         frame.render_widget(Paragraph::new(format!("{} interactions", ctx.store.len())), area);
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::None)
///     }
/// }
/// ```
pub trait Screen {
    /// Render the screen into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event while the content region has focus.
    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction>;

    /// Check if a text input is currently focused.
    ///
    /// When true, global single-key bindings are disabled so users can type freely.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Key hints for the footer.
    fn footer_hint(&self, _keymap: &Keymap) -> String {
        String::new()
    }

    /// Called when the screen is mounted.
    fn on_enter(&mut self, _ctx: &mut ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called right before the screen is dropped.
    fn on_exit(&mut self, _ctx: &mut ScreenContext) -> Result<()> {
        Ok(())
    }
}
