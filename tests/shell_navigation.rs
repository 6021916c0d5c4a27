//! Navigation through the application shell: view state, mounting and the
//! chrome that survives page switches.

mod common;

use common::{memory_shell, press, render, type_text};
use crossterm::event::KeyCode;
use hcp_crm::state::{ActiveScreen, Focus, Page};
use hcp_crm::LayoutMode;

fn assert_mounted(shell: &hcp_crm::AppShell, page: Page) {
    assert_eq!(shell.current_page(), page);
    assert_eq!(shell.screen().page(), page);
    match (shell.screen(), page) {
        (ActiveScreen::Dashboard(_), Page::Dashboard)
        | (ActiveScreen::LogInteraction(_), Page::LogInteraction)
        | (ActiveScreen::InteractionsList(_), Page::InteractionsList) => {}
        (screen, page) => panic!("{:?} mounted while on {}", screen.page(), page),
    }
}

#[test]
fn test_initial_render_mounts_dashboard() {
    let mut shell = memory_shell();
    assert_mounted(&shell, Page::Dashboard);
    assert_eq!(shell.focus(), Focus::Sidebar);

    let rows = render(&mut shell, 120, 30);
    assert_mounted(&shell, Page::Dashboard);
    assert!(common::screen_contains(&rows, "No interactions logged yet"));
}

#[test]
fn test_page_id_scenario() {
    let mut shell = memory_shell();
    assert_mounted(&shell, Page::Dashboard);

    assert!(shell.set_page_id("log-interaction").unwrap());
    assert_mounted(&shell, Page::LogInteraction);

    assert!(shell.set_page_id("interactions-list").unwrap());
    assert_mounted(&shell, Page::InteractionsList);

    assert!(shell.set_page_id("dashboard").unwrap());
    assert_mounted(&shell, Page::Dashboard);
}

#[test]
fn test_every_known_id_mounts_its_screen() {
    for page in Page::ALL {
        let mut shell = memory_shell();
        shell.set_page_id(page.id()).unwrap();
        assert_mounted(&shell, page);
    }
}

#[test]
fn test_unknown_id_falls_back_to_dashboard() {
    let mut shell = memory_shell();
    shell.navigate(Page::InteractionsList).unwrap();

    assert!(shell.set_page_id("reports").unwrap());
    assert_mounted(&shell, Page::Dashboard);

    // Already on the dashboard: nothing to remount
    assert!(!shell.set_page_id("").unwrap());
    assert_mounted(&shell, Page::Dashboard);
}

#[test]
fn test_exactly_one_screen_across_any_sequence() {
    let mut shell = memory_shell();
    let ids = [
        "interactions-list",
        "interactions-list",
        "log-interaction",
        "nope",
        "dashboard",
        "log-interaction",
        "DASHBOARD",
        "interactions-list",
    ];
    for id in ids {
        shell.set_page_id(id).unwrap();
        let expected = Page::from_id_or_default(id);
        assert_mounted(&shell, expected);
        render(&mut shell, 120, 30);
        assert_mounted(&shell, expected);
    }
}

#[test]
fn test_same_page_keeps_screen_state() {
    let mut shell = memory_shell();
    press(&mut shell, KeyCode::Char('2'));
    assert_mounted(&shell, Page::LogInteraction);
    type_text(&mut shell, "Dr. Kim");

    // Back to the sidebar, then pick the page that is already open
    press(&mut shell, KeyCode::Esc);
    assert_eq!(shell.focus(), Focus::Sidebar);
    press(&mut shell, KeyCode::Enter);
    assert_eq!(shell.focus(), Focus::Content);

    let rows = render(&mut shell, 120, 30);
    assert!(common::screen_contains(&rows, "Dr. Kim"));
}

#[test]
fn test_global_page_keys() {
    let mut shell = memory_shell();

    press(&mut shell, KeyCode::Char('3'));
    assert_mounted(&shell, Page::InteractionsList);
    assert_eq!(shell.focus(), Focus::Content);

    press(&mut shell, KeyCode::Char('2'));
    assert_mounted(&shell, Page::LogInteraction);

    // The name field has focus, so digits are text rather than page keys
    press(&mut shell, KeyCode::Char('1'));
    assert_mounted(&shell, Page::LogInteraction);

    press(&mut shell, KeyCode::Esc);
    press(&mut shell, KeyCode::Char('1'));
    assert_mounted(&shell, Page::Dashboard);
}

#[test]
fn test_sidebar_keyboard_navigation() {
    let mut shell = memory_shell();
    assert_eq!(shell.sidebar().selected(), Page::Dashboard);

    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Down);
    assert_eq!(shell.sidebar().selected(), Page::InteractionsList);
    // Moving the cursor alone does not navigate
    assert_mounted(&shell, Page::Dashboard);

    press(&mut shell, KeyCode::Enter);
    assert_mounted(&shell, Page::InteractionsList);
    assert_eq!(shell.focus(), Focus::Content);

    // Esc on an unfiltered list hands focus back with the cursor on the current page
    press(&mut shell, KeyCode::Esc);
    assert_eq!(shell.focus(), Focus::Sidebar);
    assert_eq!(shell.sidebar().selected(), Page::InteractionsList);
}

#[test]
fn test_toasts_survive_navigation() {
    let mut shell = memory_shell();
    shell.toasts_mut().success("Saved");
    shell.toasts_mut().info("Queued");

    for page in [Page::LogInteraction, Page::InteractionsList, Page::Dashboard] {
        shell.navigate(page).unwrap();
        assert_eq!(shell.toasts().current().unwrap().message, "Saved");
        assert_eq!(shell.toasts().pending(), 1);
    }
}

#[test]
fn test_sidebar_survives_navigation() {
    let mut shell = memory_shell();
    render(&mut shell, 80, 24);
    assert_eq!(shell.layout(), LayoutMode::Compact);

    press(&mut shell, KeyCode::Char('m'));
    assert!(shell.sidebar().is_drawer_open());

    // Navigation that does not come from the sidebar leaves its state alone
    shell.navigate(Page::InteractionsList).unwrap();
    assert!(shell.sidebar().is_drawer_open());
    assert_eq!(shell.sidebar().selected(), Page::InteractionsList);
}

#[test]
fn test_quit_keys() {
    let mut shell = memory_shell();
    assert!(press(&mut shell, KeyCode::Char('q')));

    // While typing, q is a letter but Ctrl+C still quits
    let mut shell = memory_shell();
    press(&mut shell, KeyCode::Char('2'));
    assert!(!press(&mut shell, KeyCode::Char('q')));
    assert!(shell.handle_event(common::ctrl('c')).unwrap());
}
