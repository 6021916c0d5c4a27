use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyModifiers};
use hcp_crm::config::Config;
use hcp_crm::keymap::{Action, KeyBinding, KeymapPreset};
use hcp_crm::store::{InteractionDraft, Store};
use hcp_crm::AppShell;
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
}

#[test]
fn test_keymap_override_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.data_file = temp_dir.path().join("interactions.json");
    config.keymap.preset = KeymapPreset::Vim;
    // Map 'x' to Quit (normally 'q' in the vim preset)
    config
        .keymap
        .overrides
        .push(KeyBinding::new("x", Action::Quit));
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(loaded.keymap.overrides.len(), 1);

    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('x'), KeyModifiers::NONE),
        Some(Action::Quit)
    );
    // The overridden action loses its preset key
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('q'), KeyModifiers::NONE),
        None
    );
    // Preset bindings for other actions still work
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
}

#[test]
fn test_shell_uses_configured_keymap() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.data_file = temp_dir.path().join("interactions.json");
    config.keymap.preset = KeymapPreset::Vim;

    let store = Store::load(&config.data_file).unwrap();
    let mut shell = AppShell::new(store, config.keymap.clone()).unwrap();

    // 'j' moves the sidebar cursor in the vim preset
    shell
        .handle_event(crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
        )))
        .unwrap();
    assert_eq!(
        shell.sidebar().selected(),
        hcp_crm::state::Page::LogInteraction
    );
}

#[test]
fn test_store_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("interactions.json");

    let mut store = Store::load(&path).unwrap();
    assert!(store.is_empty());
    let first = store
        .add(InteractionDraft::new("Dr. Sarah Johnson", day(1)))
        .unwrap()
        .id;
    store
        .add(InteractionDraft::new("Dr. Michael Chen", day(2)))
        .unwrap();
    store.remove(first).unwrap();

    let reloaded = Store::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.interactions()[0].hcp_name, "Dr. Michael Chen");

    // Ids are never reused, even after a delete and reload
    let mut reloaded = reloaded;
    let next = reloaded
        .add(InteractionDraft::new("Dr. Amy Patel", day(3)))
        .unwrap()
        .id;
    assert!(next > first + 1);
}

#[test]
fn test_corrupt_store_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("interactions.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Store::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse interaction store"));
}

#[test]
fn test_newer_store_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("interactions.json");
    std::fs::write(&path, r#"{"version": 99, "interactions": []}"#).unwrap();

    assert!(Store::load(&path).is_err());
}

#[test]
fn test_reload_picks_up_external_changes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("interactions.json");

    let mut ours = Store::load(&path).unwrap();
    let mut theirs = Store::load(&path).unwrap();
    theirs
        .add(InteractionDraft::new("Dr. Sarah Johnson", day(1)))
        .unwrap();

    assert!(ours.is_empty());
    ours.reload().unwrap();
    assert_eq!(ours.len(), 1);
}
