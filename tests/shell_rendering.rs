//! What the shell draws: sidebar, content, footer and the toast overlay in
//! both layouts.

mod common;

use common::{click, memory_shell, press, render, screen_contains, TestEnv};
use crossterm::event::KeyCode;
use hcp_crm::state::Page;
use hcp_crm::store::InteractionDraft;
use hcp_crm::LayoutMode;

#[test]
fn test_wide_layout_shows_sidebar() {
    let mut shell = memory_shell();
    let rows = render(&mut shell, 120, 30);

    assert_eq!(shell.layout(), LayoutMode::Wide);
    assert!(screen_contains(&rows, "HCP CRM"));
    for page in Page::ALL {
        assert!(screen_contains(&rows, page.title()), "missing {}", page.title());
    }
    // Footer hints on the last rows
    assert!(rows[28..].iter().any(|row| row.contains("Quit")));
}

#[test]
fn test_compact_layout_collapses_sidebar() {
    let mut shell = memory_shell();
    let rows = render(&mut shell, 80, 24);

    assert_eq!(shell.layout(), LayoutMode::Compact);
    assert!(rows[0].contains("Menu"));
    assert!(rows[0].contains("Dashboard"));
    assert!(!screen_contains(&rows, "Log Interaction"));

    press(&mut shell, KeyCode::Char('m'));
    let rows = render(&mut shell, 80, 24);
    assert!(screen_contains(&rows, "Log Interaction"));
    assert!(screen_contains(&rows, "Interactions"));
}

#[test]
fn test_compact_drawer_navigation() {
    let mut shell = memory_shell();
    render(&mut shell, 80, 24);

    // Enter opens the drawer, then picks the highlighted page
    press(&mut shell, KeyCode::Enter);
    assert!(shell.sidebar().is_drawer_open());
    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Enter);

    assert_eq!(shell.current_page(), Page::LogInteraction);
    assert!(!shell.sidebar().is_drawer_open());
    let rows = render(&mut shell, 80, 24);
    assert!(rows[0].contains("Log Interaction"));
}

#[test]
fn test_menu_bar_click_toggles_drawer() {
    let mut shell = memory_shell();
    render(&mut shell, 80, 24);

    shell.handle_event(click(2, 0)).unwrap();
    assert!(shell.sidebar().is_drawer_open());
    render(&mut shell, 80, 24);

    shell.handle_event(click(2, 0)).unwrap();
    assert!(!shell.sidebar().is_drawer_open());
}

#[test]
fn test_resize_switches_layout() {
    let mut shell = memory_shell();
    render(&mut shell, 80, 24);
    press(&mut shell, KeyCode::Char('m'));
    assert!(shell.sidebar().is_drawer_open());

    render(&mut shell, 140, 30);
    assert_eq!(shell.layout(), LayoutMode::Wide);
    assert!(!shell.sidebar().is_drawer_open());
}

#[test]
fn test_toast_is_drawn_top_right() {
    let mut shell = memory_shell();
    shell.toasts_mut().success("Interaction saved");
    let rows = render(&mut shell, 120, 30);

    let (row, line) = rows
        .iter()
        .enumerate()
        .find(|(_, line)| line.contains("Interaction saved"))
        .expect("toast not drawn");
    assert!(row <= 3);
    let column = line.find("Interaction saved").unwrap();
    assert!(line[column..].chars().count() < 30);

    // Still on top after switching pages
    shell.navigate(Page::InteractionsList).unwrap();
    let rows = render(&mut shell, 120, 30);
    assert!(screen_contains(&rows, "Interaction saved"));
}

#[test]
fn test_content_width_is_capped() {
    let shell = memory_shell();
    let content = shell.content_area(ratatui::layout::Rect::new(0, 0, 400, 40));
    assert!(content.width <= hcp_crm::shell::MAX_CONTENT_WIDTH);
}

#[test]
fn test_pages_render_store_data() {
    let env = TestEnv::new();
    {
        let mut store = env.store();
        let mut draft = InteractionDraft::new("Dr. Sarah Johnson", common::day(2));
        draft.follow_up = Some("Send trial data".to_string());
        store.add(draft).unwrap();
    }

    let mut shell = env.shell();
    let rows = render(&mut shell, 120, 30);
    assert!(screen_contains(&rows, "Recent"));
    assert!(screen_contains(&rows, "Dr. Sarah Johnson"));

    shell.navigate(Page::InteractionsList).unwrap();
    let rows = render(&mut shell, 120, 30);
    assert!(screen_contains(&rows, "1 logged"));
    assert!(screen_contains(&rows, "Dr. Sarah Johnson"));
    assert!(screen_contains(&rows, "open"));
}
