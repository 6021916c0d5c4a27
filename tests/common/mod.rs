//! Shared test utilities for shell integration tests.
//!
//! Provides `TestEnv` - an isolated config + data file in a `TempDir`, and
//! helpers to drive an `AppShell` with key events and read back what it drew.

#![allow(dead_code)]

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use hcp_crm::config::Config;
use hcp_crm::keymap::Keymap;
use hcp_crm::shell::AppShell;
use hcp_crm::store::Store;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixed "today" so date defaults are predictable
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
}

/// Isolated config and data file, removed when dropped.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.data_file = temp_dir.path().join("interactions.json");
        config.api.enabled = false;
        config.save(&config_path).unwrap();

        Self {
            temp_dir,
            config_path,
            config,
        }
    }

    pub fn store(&self) -> Store {
        Store::load(&self.config.data_file).unwrap()
    }

    /// A shell over this environment's store
    pub fn shell(&self) -> AppShell {
        AppShell::new(self.store(), self.config.keymap.clone())
            .unwrap()
            .with_compact_breakpoint(self.config.compact_breakpoint)
            .with_today(today())
    }
}

/// A shell over an empty in-memory store
pub fn memory_shell() -> AppShell {
    AppShell::new(Store::in_memory(), Keymap::default())
        .unwrap()
        .with_today(today())
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Send a key press; returns whether the shell asked to quit.
pub fn press(shell: &mut AppShell, code: KeyCode) -> bool {
    shell.handle_event(key(code)).unwrap()
}

pub fn type_text(shell: &mut AppShell, text: &str) {
    for c in text.chars() {
        press(shell, KeyCode::Char(c));
    }
}

/// Render one frame and return its rows as strings.
pub fn render(shell: &mut AppShell, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| shell.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

pub fn screen_contains(rows: &[String], text: &str) -> bool {
    rows.iter().any(|row| row.contains(text))
}
