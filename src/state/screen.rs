//! The mounted screen.
//!
//! Exactly one screen is alive at a time: the shell holds a single
//! [`ActiveScreen`] and replaces it wholesale on navigation, which drops the
//! previous screen together with its state.

use crate::screens::{DashboardScreen, InteractionsListScreen, LogInteractionScreen, Screen};
use crate::state::Page;

/// Union type for the three screens.
#[derive(Debug)]
pub enum ActiveScreen {
    Dashboard(DashboardScreen),
    LogInteraction(Box<LogInteractionScreen>),
    InteractionsList(Box<InteractionsListScreen>),
}

impl Default for ActiveScreen {
    fn default() -> Self {
        mount(Page::default())
    }
}

/// Build a fresh screen for `page`.
///
/// Total over [`Page`]: a new page variant will not compile until it is
/// given a screen here.
pub fn mount(page: Page) -> ActiveScreen {
    match page {
        Page::Dashboard => ActiveScreen::Dashboard(DashboardScreen::new()),
        Page::LogInteraction => ActiveScreen::LogInteraction(Box::default()),
        Page::InteractionsList => ActiveScreen::InteractionsList(Box::default()),
    }
}

impl ActiveScreen {
    /// The page this screen renders
    pub fn page(&self) -> Page {
        match self {
            ActiveScreen::Dashboard(_) => Page::Dashboard,
            ActiveScreen::LogInteraction(_) => Page::LogInteraction,
            ActiveScreen::InteractionsList(_) => Page::InteractionsList,
        }
    }

    pub fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Dashboard(s) => s,
            ActiveScreen::LogInteraction(s) => s.as_ref(),
            ActiveScreen::InteractionsList(s) => s.as_ref(),
        }
    }

    pub fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::Dashboard(s) => s,
            ActiveScreen::LogInteraction(s) => s.as_mut(),
            ActiveScreen::InteractionsList(s) => s.as_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_is_total() {
        for page in Page::ALL {
            assert_eq!(mount(page).page(), page);
        }
    }

    #[test]
    fn test_default_is_dashboard() {
        assert!(matches!(ActiveScreen::default(), ActiveScreen::Dashboard(_)));
    }
}
