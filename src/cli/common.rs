//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: loads the configuration and the interaction store
//! - Output helpers: `print_success`, `print_error`, `print_warning`, `print_info`

use crate::config::Config;
use crate::store::Store;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Shared context for CLI commands.
pub struct CliContext {
    /// The loaded configuration
    pub config: Config,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl CliContext {
    /// Load the configuration from `config_path`, or from the default
    /// location when `None`. A missing file is created with defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(crate::utils::get_config_path);

        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Open the interaction store named by the configuration.
    pub fn store(&self) -> Result<Store> {
        Store::load(&self.config.data_file).with_context(|| {
            format!(
                "Failed to open interaction store {}",
                crate::utils::format_path_for_display(&self.config.data_file)
            )
        })
    }
}

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
