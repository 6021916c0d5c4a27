//! Shell state.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   AppShell                   │
//! ├──────────────────────────────────────────────┤
//! │  ViewState ──(page)──▶ mount() ──▶ ActiveScreen
//! │      ▲                                       │
//! │      └──(PageChange)── Sidebar               │
//! │                                              │
//! │  Store, ToastManager: owned once, lent to    │
//! │  the active screen through its context       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`ViewState`] is the only value deciding which screen is mounted, and
//! [`ActiveScreen`] is an enum so two screens can never be alive together.

pub mod page;
pub mod screen;
pub mod view_state;

pub use page::{Page, UnknownPage};
pub use screen::{mount, ActiveScreen};
pub use view_state::ViewState;

/// Which region receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Content,
}
