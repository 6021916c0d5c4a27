//! Command-line interface.
//!
//! With no subcommand the binary launches the TUI; the subcommands are quick
//! read-only views of the interaction store for scripts and shells.

mod commands;
mod common;
pub mod completions;

pub use commands::{Cli, Commands};
pub use common::*;
