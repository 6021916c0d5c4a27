//! Interactions list screen.
//!
//! A filterable table of every logged interaction with a detail panel for
//! the selected row. Follow-ups can be ticked off and records deleted.

use crate::components::Header;
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::state::Page;
use crate::store::{Interaction, InteractionSource, Store};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::{SelectionNav, TextInput, DEFAULT_PAGE_SIZE};
use crate::widgets::{Dialog, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap,
};
use tracing::warn;

/// Content width below which the detail panel moves under the table
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

/// Interactions list screen controller
#[derive(Debug, Default)]
pub struct InteractionsListScreen {
    table_state: TableState,
    filter: TextInput,
    searching: bool,
    /// Interaction awaiting delete confirmation
    confirm_delete: Option<u64>,
}

impl InteractionsListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &str {
        self.filter.text()
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete.is_some()
    }

    /// Ids of the rows currently shown, in display order
    fn visible_ids(&self, store: &Store) -> Vec<u64> {
        store
            .search(self.filter.text())
            .into_iter()
            .map(|i| i.id)
            .collect()
    }

    fn selected_id(&self, ids: &[u64]) -> Option<u64> {
        self.table_state.selected().and_then(|i| ids.get(i).copied())
    }

    fn handle_confirm(&mut self, action: Option<Action>, ctx: &mut ScreenContext) {
        let Some(id) = self.confirm_delete else {
            return;
        };
        match action {
            Some(Action::Yes | Action::Confirm) => {
                self.confirm_delete = None;
                let name = ctx.store.get(id).map(|i| i.hcp_name.clone());
                match ctx.store.remove(id) {
                    Ok(true) => ctx.toasts.success(format!(
                        "Deleted interaction with {}",
                        name.unwrap_or_default()
                    )),
                    Ok(false) => ctx.toasts.warning("Interaction no longer exists"),
                    Err(e) => {
                        warn!("Failed to delete interaction #{}: {:#}", id, e);
                        ctx.toasts.error(format!("Failed to delete: {}", e));
                    }
                }
                let remaining = self.visible_ids(ctx.store).len();
                self.table_state.clamp_selection(remaining);
            }
            Some(Action::No | Action::Cancel) => self.confirm_delete = None,
            _ => {}
        }
    }

    fn handle_search_key(
        &mut self,
        code: KeyCode,
        action: Option<Action>,
        modifiers: crossterm::event::KeyModifiers,
        ctx: &ScreenContext,
    ) {
        match action {
            Some(Action::Confirm) => self.searching = false,
            Some(Action::Cancel) => {
                self.searching = false;
                self.filter.clear();
            }
            _ => {
                if self.filter.handle_key_with_action(code, modifiers, action) {
                    self.table_state.select(None);
                }
            }
        }
        let total = self.visible_ids(ctx.store).len();
        self.table_state.clamp_selection(total);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, rows: &[&Interaction], focused: bool) {
        let t = theme();
        let header = Row::new(["Date", "HCP", "Type", "Sentiment", "Follow-up"].map(|h| {
            Cell::from(h).style(t.title_style())
        }));

        let table_rows = rows.iter().map(|i| {
            let follow_up = match (&i.follow_up, i.follow_up_done) {
                (Some(_), true) => Span::styled("\u{2714} done", t.success_style()), // ✔
                (Some(_), false) => Span::styled("\u{2691} open", t.warning_style()), // ⚑
                (None, _) => Span::styled("-", t.muted_style()),
            };
            Row::new(vec![
                Cell::from(i.date.format("%Y-%m-%d").to_string()).style(t.muted_style()),
                Cell::from(i.hcp_name.as_str()).style(t.text_style()),
                Cell::from(i.interaction_type.label())
                    .style(Style::default().fg(t.interaction_type_color(i.interaction_type))),
                Cell::from(i.sentiment.label()).style(t.sentiment_style(i.sentiment)),
                Cell::from(follow_up),
            ])
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(9),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if focused {
                        t.border_focused_style()
                    } else {
                        t.border_style()
                    })
                    .title(format!(" {} shown ", rows.len())),
            );
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_detail(frame: &mut Frame, area: Rect, selected: Option<&Interaction>) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Details ")
            .title_style(t.title_style())
            .padding(Padding::horizontal(1));

        let Some(i) = selected else {
            frame.render_widget(
                Paragraph::new(Span::styled("Nothing selected", t.muted_style())).block(block),
                area,
            );
            return;
        };

        let field = |label: &'static str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{:<11}", label), t.muted_style()),
                Span::styled(value, style),
            ])
        };
        let or_dash = |s: &str| {
            if s.trim().is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                i.hcp_name.as_str(),
                t.title_style(),
            )),
            Line::default(),
            field("Date", i.date.format("%A, %B %-d %Y").to_string(), t.text_style()),
            field(
                "Type",
                i.interaction_type.label().to_string(),
                Style::default().fg(t.interaction_type_color(i.interaction_type)),
            ),
            field("Sentiment", i.sentiment.label().to_string(), t.sentiment_style(i.sentiment)),
            field("Attendees", or_dash(&i.attendees.join(", ")), t.text_style()),
            field("Topics", or_dash(&i.topics), t.text_style()),
            field("Outcomes", or_dash(&i.outcomes), t.text_style()),
        ];
        if let Some(ref follow_up) = i.follow_up {
            let status = if i.follow_up_done { " (done)" } else { "" };
            let style = if i.follow_up_done {
                t.success_style()
            } else {
                t.warning_style()
            };
            lines.push(field("Follow-up", format!("{}{}", follow_up, status), style));
        }
        lines.push(Line::default());
        let source = match i.source {
            InteractionSource::Form => "form",
            InteractionSource::Chat => "chat note",
        };
        lines.push(Line::from(Span::styled(
            format!(
                "#{} logged via {} on {}",
                i.id,
                source,
                i.created_at.format("%Y-%m-%d %H:%M")
            ),
            t.muted_style(),
        )));

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl Screen for InteractionsListScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let rows = ctx.store.search(self.filter.text());
        self.table_state.clamp_selection(rows.len());

        let show_filter = self.searching || !self.filter.text().is_empty();
        let [header, filter, body] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(if show_filter { 3 } else { 0 }),
            Constraint::Min(0),
        ])
        .areas(area);

        Header::render(
            frame,
            header,
            Page::InteractionsList,
            &format!("{} logged", ctx.store.len()),
        );

        if show_filter {
            frame.render_text_input_widget(
                TextInputWidget::new(&self.filter)
                    .title("Filter")
                    .placeholder("name, topic, type ...")
                    .focused(self.searching && ctx.focused),
                filter,
            );
        }

        let (table_area, detail_area) = if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
            let [a, b] = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .spacing(1)
                .areas(body);
            (a, b)
        } else {
            let [a, b] = Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body);
            (a, b)
        };

        let selected = self.table_state.selected().and_then(|i| rows.get(i).copied());
        self.render_table(frame, table_area, &rows, ctx.focused && !self.searching);
        Self::render_detail(frame, detail_area, selected);

        if let Some(id) = self.confirm_delete {
            let name = ctx
                .store
                .get(id)
                .map_or_else(|| format!("#{}", id), |i| i.hcp_name.clone());
            let message = format!("Delete the interaction with {}?", name);
            frame.render_widget(Dialog::new("Delete interaction", &message), area);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let action = ctx.keymap.get_action(key.code, key.modifiers);

        if self.confirm_delete.is_some() {
            self.handle_confirm(action, ctx);
            return Ok(ScreenAction::None);
        }
        if self.searching {
            self.handle_search_key(key.code, action, key.modifiers, ctx);
            return Ok(ScreenAction::None);
        }

        let ids = self.visible_ids(ctx.store);
        let total = ids.len();

        match action {
            Some(Action::MoveUp) => self.table_state.move_up_by(1, total),
            Some(Action::MoveDown) => self.table_state.move_down_by(1, total),
            Some(Action::PageUp) => self.table_state.move_up_by(DEFAULT_PAGE_SIZE, total),
            Some(Action::PageDown) => self.table_state.move_down_by(DEFAULT_PAGE_SIZE, total),
            Some(Action::GoToTop) => self.table_state.select_first_item(total),
            Some(Action::GoToEnd) => self.table_state.select_last_item(total),
            Some(Action::Search) => self.searching = true,
            Some(Action::ToggleSelect) => {
                if let Some(id) = self.selected_id(&ids) {
                    if ctx.store.get(id).is_some_and(|i| i.follow_up.is_none()) {
                        ctx.toasts.warning("No follow-up to mark for this interaction");
                        return Ok(ScreenAction::None);
                    }
                    match ctx.store.toggle_follow_up(id) {
                        Ok(_) => {
                            let done = ctx.store.get(id).is_some_and(|i| i.follow_up_done);
                            ctx.toasts.info(if done {
                                "Follow-up marked done"
                            } else {
                                "Follow-up reopened"
                            });
                        }
                        Err(e) => {
                            warn!("Failed to update follow-up: {:#}", e);
                            ctx.toasts.error(format!("Failed to update: {}", e));
                        }
                    }
                }
            }
            Some(Action::Delete) => self.confirm_delete = self.selected_id(&ids),
            Some(Action::Refresh) => {
                if let Err(e) = ctx.store.reload() {
                    warn!("Reload failed: {:#}", e);
                    ctx.toasts.error(format!("Reload failed: {}", e));
                }
                let total = self.visible_ids(ctx.store).len();
                self.table_state.clamp_selection(total);
            }
            Some(Action::Cancel) if !self.filter.text().is_empty() => {
                self.filter.clear();
                self.table_state.clamp_selection(self.visible_ids(ctx.store).len());
            }
            Some(Action::Cancel | Action::MoveLeft) => return Ok(ScreenAction::FocusSidebar),
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.searching
    }

    fn footer_hint(&self, keymap: &Keymap) -> String {
        if self.confirm_delete.is_some() {
            return "y: Delete | n/Esc: Keep".to_string();
        }
        if self.searching {
            return "Enter: Apply filter | Esc: Clear filter".to_string();
        }
        format!(
            "{}/{}: Select | {}: Filter | {}: Toggle follow-up | {}: Delete | {}: Sidebar",
            keymap.key_for(Action::MoveUp),
            keymap.key_for(Action::MoveDown),
            keymap.key_for(Action::Search),
            keymap.key_for(Action::ToggleSelect),
            keymap.key_for(Action::Delete),
            keymap.key_for(Action::Cancel)
        )
    }

    fn on_enter(&mut self, ctx: &mut ScreenContext) -> Result<()> {
        self.table_state
            .clamp_selection(self.visible_ids(ctx.store).len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InteractionDraft, Store};
    use crate::widgets::ToastManager;
    use chrono::NaiveDate;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn store() -> Store {
        let mut store = Store::in_memory();
        let mut first = InteractionDraft::new("Dr. Sarah Johnson", day(1));
        first.follow_up = Some("Send trial data".to_string());
        store.add(first).unwrap();
        store.add(InteractionDraft::new("Dr. Michael Chen", day(2))).unwrap();
        store.add(InteractionDraft::new("Dr. Amy Patel", day(3))).unwrap();
        store
    }

    #[test]
    fn test_enter_selects_first_row() {
        let mut store = store();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();
        screen.on_enter(&mut ctx).unwrap();
        assert_eq!(screen.table_state.selected(), Some(0));
        let ids = screen.visible_ids(ctx.store);
        assert_eq!(ctx.store.get(ids[0]).unwrap().hcp_name, "Dr. Amy Patel");
    }

    #[test]
    fn test_filter_narrows_rows() {
        let mut store = store();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();

        screen.handle_event(key(KeyCode::Char('/')), &mut ctx).unwrap();
        assert!(screen.is_input_focused());
        for c in "chen".chars() {
            screen.handle_event(key(KeyCode::Char(c)), &mut ctx).unwrap();
        }
        screen.handle_event(key(KeyCode::Enter), &mut ctx).unwrap();

        assert!(!screen.is_input_focused());
        assert_eq!(screen.filter(), "chen");
        assert_eq!(screen.visible_ids(ctx.store).len(), 1);

        // First Esc clears the filter, the second one leaves the screen
        assert_eq!(
            screen.handle_event(key(KeyCode::Esc), &mut ctx).unwrap(),
            ScreenAction::None
        );
        assert_eq!(screen.filter(), "");
        assert_eq!(
            screen.handle_event(key(KeyCode::Esc), &mut ctx).unwrap(),
            ScreenAction::FocusSidebar
        );
    }

    #[test]
    fn test_toggle_follow_up() {
        let mut store = store();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();
        screen.on_enter(&mut ctx).unwrap();

        screen.handle_event(key(KeyCode::End), &mut ctx).unwrap();
        screen.handle_event(key(KeyCode::Char(' ')), &mut ctx).unwrap();

        let sarah = ctx
            .store
            .interactions()
            .into_iter()
            .find(|i| i.hcp_name == "Dr. Sarah Johnson")
            .unwrap();
        assert!(sarah.follow_up_done);
    }

    #[test]
    fn test_toggle_without_follow_up_is_ignored() {
        let mut store = store();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();
        screen.on_enter(&mut ctx).unwrap();

        // Dr. Amy Patel is first and has no follow-up
        let rev = ctx.store.revision();
        screen.handle_event(key(KeyCode::Char(' ')), &mut ctx).unwrap();

        assert_eq!(ctx.store.revision(), rev);
        assert!(ctx.store.interactions().iter().all(|i| !i.follow_up_done));
        assert_eq!(
            ctx.toasts.current().unwrap().message,
            "No follow-up to mark for this interaction"
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = store();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();
        screen.on_enter(&mut ctx).unwrap();

        screen.handle_event(key(KeyCode::Char('d')), &mut ctx).unwrap();
        assert!(screen.is_confirming_delete());
        screen.handle_event(key(KeyCode::Char('n')), &mut ctx).unwrap();
        assert!(!screen.is_confirming_delete());
        assert_eq!(ctx.store.len(), 3);

        screen.handle_event(key(KeyCode::Char('d')), &mut ctx).unwrap();
        screen.handle_event(key(KeyCode::Char('y')), &mut ctx).unwrap();
        assert_eq!(ctx.store.len(), 2);
        assert!(ctx.store.search("patel").is_empty());
        assert_eq!(screen.table_state.selected(), Some(0));
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let mut store = Store::in_memory();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, day(4));
        let mut screen = InteractionsListScreen::new();
        screen.handle_event(key(KeyCode::Char('d')), &mut ctx).unwrap();
        assert!(!screen.is_confirming_delete());
    }
}
