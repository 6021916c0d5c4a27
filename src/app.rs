use crate::api::BlockingApi;
use crate::config::Config;
use crate::shell::AppShell;
use crate::store::Store;
use crate::tui::Tui;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Event loop tick: how long to wait for input before redrawing
const TICK_RATE: Duration = Duration::from_millis(250);

/// Main application: the shell plus the terminal it draws on
pub struct App {
    shell: AppShell,
    tui: Tui,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let store = Store::load(&config.data_file).with_context(|| {
            format!("Failed to open interaction store {:?}", config.data_file)
        })?;

        let mut shell = AppShell::new(store, config.keymap.clone())?
            .with_compact_breakpoint(config.compact_breakpoint);

        match config.api_base_url() {
            Some(url) => match BlockingApi::new(url, Duration::from_secs(config.api.timeout_secs)) {
                Ok(api) => {
                    info!("Chat logging backend: {}", api.base_url());
                    shell = shell.with_backend(Box::new(api));
                }
                Err(e) => {
                    warn!("Chat logging disabled: {:#}", e);
                    shell.toasts_mut().warning("Chat logging backend unavailable");
                }
            },
            None => info!("Chat logging backend disabled in config"),
        }

        Ok(Self {
            shell,
            tui: Tui::new()?,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.shell.tick();
            let shell = &mut self.shell;
            self.tui.terminal_mut().draw(|frame| shell.render(frame))?;

            if let Some(event) = self.tui.poll_event(TICK_RATE)? {
                if self.shell.handle_event(event)? {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }
    }
}
