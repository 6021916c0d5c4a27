//! The single piece of state that decides which screen is mounted.

use super::page::Page;
use tracing::warn;

/// Holds the currently selected page.
///
/// Starts on [`Page::Dashboard`] and is only changed through the shell's
/// navigation handler. It is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    current_page: Page,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page.
    pub fn get(&self) -> Page {
        self.current_page
    }

    /// Replace the current page.
    ///
    /// Returns `true` when the page actually changed, in which case the
    /// caller must re-mount the page region.
    pub fn set(&mut self, next: Page) -> bool {
        if self.current_page == next {
            return false;
        }
        self.current_page = next;
        true
    }

    /// Set the page from a string identifier.
    ///
    /// Identifiers outside the known set resolve to the dashboard.
    pub fn set_id(&mut self, id: &str) -> bool {
        let next = match id.parse::<Page>() {
            Ok(page) => page,
            Err(e) => {
                warn!("{}, falling back to {}", e, Page::Dashboard);
                Page::Dashboard
            }
        };
        self.set(next)
    }
}
