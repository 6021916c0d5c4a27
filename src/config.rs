use crate::keymap::Keymap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Where interactions are stored
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Terminal width (columns) below which the sidebar collapses into a menu bar
    #[serde(default = "default_compact_breakpoint")]
    pub compact_breakpoint: u16,
    /// Interaction backend settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Keyboard bindings
    #[serde(default)]
    pub keymap: Keymap,
}

/// Settings for the interaction backend used by chat logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Whether chat logging talks to the backend at all
    #[serde(default = "default_api_enabled")]
    pub enabled: bool,
    /// Base URL of the backend (e.g. http://localhost:8000)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: default_api_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_data_file() -> PathBuf {
    crate::utils::get_data_dir().join("interactions.json")
}

fn default_compact_breakpoint() -> u16 {
    100
}

fn default_api_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_file: default_data_file(),
            compact_breakpoint: default_compact_breakpoint(),
            api: ApiConfig::default(),
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create (and save) the default one
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Empty strings in hand-edited files fall back to defaults
            if config.theme.trim().is_empty() {
                config.theme = default_theme();
            }
            if config.api.base_url.trim().is_empty() {
                config.api.base_url = default_base_url();
            }
            if config.compact_breakpoint == 0 {
                config.compact_breakpoint = default_compact_breakpoint();
            }
            config.data_file = crate::utils::expand_path(&config.data_file.to_string_lossy());

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // Set secure permissions (600: owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// The backend base URL when chat logging is enabled
    pub fn api_base_url(&self) -> Option<&str> {
        if self.api.enabled {
            Some(self.api.base_url.trim_end_matches('/'))
        } else {
            None
        }
    }
}
