//! Page identifiers for the navigation shell.

use std::fmt;
use std::str::FromStr;

/// The pages the shell can show.
///
/// This is a closed set: the sidebar, the view state and the page renderer
/// all match on it exhaustively, so a new page cannot be added without
/// updating each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    LogInteraction,
    InteractionsList,
}

/// Error returned when a string is not one of the known page identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page identifier: {:?}", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl Page {
    /// All pages in sidebar order.
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::LogInteraction, Page::InteractionsList];

    /// Stable string identifier (`dashboard`, `log-interaction`, `interactions-list`).
    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::LogInteraction => "log-interaction",
            Page::InteractionsList => "interactions-list",
        }
    }

    /// Human-readable title shown in the sidebar and screen headers.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::LogInteraction => "Log Interaction",
            Page::InteractionsList => "Interactions",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "\u{25A6}",        // ▦
            Page::LogInteraction => "\u{270E}",   // ✎
            Page::InteractionsList => "\u{2630}", // ☰
        }
    }

    /// Position of this page in [`Page::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::LogInteraction => 1,
            Page::InteractionsList => 2,
        }
    }

    /// Page at a sidebar position, if any.
    pub fn from_index(index: usize) -> Option<Page> {
        Page::ALL.get(index).copied()
    }

    /// Resolve an identifier, falling back to the dashboard for anything unknown.
    pub fn from_id_or_default(id: &str) -> Page {
        id.parse().unwrap_or_default()
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Page::Dashboard),
            "log-interaction" => Ok(Page::LogInteraction),
            "interactions-list" => Ok(Page::InteractionsList),
            other => Err(UnknownPage(other.to_string())),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
