//! hcp-crm - A terminal CRM for interactions with healthcare professionals
//!
//! The application shell keeps one view-state value selecting which page is
//! mounted, a persistent sidebar for navigation, a shared interaction store
//! passed to pages by context, and a toast overlay anchored top-right.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod screens;
pub mod shell;
pub mod state;
pub mod store;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

/// File name of the log written under [`utils::get_log_dir`]
pub const LOG_FILE_NAME: &str = "hcp-crm.log";

// Re-exports for convenience
pub use api::{ApiClient, BlockingApi, ChatOutcome, InteractionBackend};
pub use config::Config;
pub use shell::{AppShell, LayoutMode};
pub use state::{Page, ViewState};
pub use store::{Interaction, InteractionDraft, Store};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
