//! Screen controllers.
//!
//! Each screen implements the [`Screen`] trait, owns its own state, and is
//! mounted by [`crate::state::mount`] for exactly one page.

pub mod dashboard;
pub mod interactions_list;
pub mod log_interaction;
pub mod screen_trait;

pub use dashboard::DashboardScreen;
pub use interactions_list::InteractionsListScreen;
pub use log_interaction::{LogInteractionScreen, LogMode};
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
