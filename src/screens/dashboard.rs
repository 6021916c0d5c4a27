//! Dashboard screen.
//!
//! Summary cards, a per-type breakdown and the most recent interactions.
//! Everything is derived from the store on each render.

use crate::components::Header;
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::state::Page;
use crate::store::DashboardStats;
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use tracing::warn;

const BLOCK_FULL: char = '\u{2588}'; // █

/// Dashboard screen controller
#[derive(Debug, Default)]
pub struct DashboardScreen;

impl DashboardScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_card(frame: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());
        let text = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, t.muted_style())),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }

    fn render_cards(frame: &mut Frame, area: Rect, stats: &DashboardStats) {
        let t = theme();
        let [total, week, follow_ups, positive] =
            Layout::horizontal([Constraint::Fill(1); 4]).spacing(1).areas(area);

        Self::render_card(frame, total, "Total interactions", stats.total.to_string(), t.accent);
        Self::render_card(frame, week, "Last 7 days", stats.this_week.to_string(), t.info);
        Self::render_card(
            frame,
            follow_ups,
            "Pending follow-ups",
            stats.pending_follow_ups.to_string(),
            if stats.pending_follow_ups > 0 {
                t.warning
            } else {
                t.success
            },
        );
        Self::render_card(
            frame,
            positive,
            "Positive sentiment",
            stats
                .positive_percent()
                .map_or_else(|| "-".to_string(), |p| format!("{}%", p)),
            t.success,
        );
    }

    fn render_breakdown(frame: &mut Frame, area: Rect, stats: &DashboardStats) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" By type ")
            .title_style(t.title_style())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let max = stats.by_type.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let label_width = 12usize;
        let count_width = 5usize;
        let bar_width = (inner.width as usize).saturating_sub(label_width + count_width);

        let lines: Vec<Line> = stats
            .by_type
            .iter()
            .map(|(kind, count)| {
                Line::from(vec![
                    Span::styled(format!("{:<label_width$}", kind.label()), t.text_style()),
                    Span::styled(
                        format!("{:<bar_width$}", bar(*count, max, bar_width)),
                        Style::default().fg(t.interaction_type_color(*kind)),
                    ),
                    Span::styled(format!("{:>count_width$}", count), t.emphasis_style()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_recent(frame: &mut Frame, area: Rect, stats: &DashboardStats, ctx: &RenderContext) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Recent ")
            .title_style(t.title_style())
            .padding(Padding::horizontal(1));

        let lines: Vec<Line> = stats
            .recent
            .iter()
            .filter_map(|id| ctx.store.get(*id))
            .map(|i| {
                let mut spans = vec![
                    Span::styled(i.date.format("%b %d  ").to_string(), t.muted_style()),
                    Span::styled(i.hcp_name.as_str(), t.text_style().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {}", i.interaction_type),
                        Style::default().fg(t.interaction_type_color(i.interaction_type)),
                    ),
                    Span::styled(
                        format!("  {}", i.sentiment),
                        t.sentiment_style(i.sentiment),
                    ),
                ];
                if i.has_pending_follow_up() {
                    spans.push(Span::styled("  \u{2691}", t.warning_style())); // ⚑
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_empty(frame: &mut Frame, area: Rect, keymap: &Keymap) {
        let t = theme();
        let text = vec![
            Line::from(Span::styled("No interactions logged yet", t.title_style())),
            Line::default(),
            Line::from(vec![
                Span::styled("Press ", t.text_style()),
                Span::styled(keymap.key_for(Action::GoToLogInteraction), t.emphasis_style()),
                Span::styled(" to log your first interaction.", t.text_style()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::top(area.height / 3))),
            area,
        );
    }
}

/// A bar of `width * count / max` full blocks, at least one for a non-zero count.
fn bar(count: usize, max: usize, width: usize) -> String {
    if count == 0 || max == 0 || width == 0 {
        return String::new();
    }
    let len = (count * width / max).max(1);
    std::iter::repeat_n(BLOCK_FULL, len).collect()
}

impl Screen for DashboardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let [header, body] =
            Layout::vertical([Constraint::Length(Header::HEIGHT), Constraint::Min(0)]).areas(area);
        Header::render(frame, header, Page::Dashboard, "Activity at a glance");

        if ctx.store.is_empty() {
            Self::render_empty(frame, body, ctx.keymap);
            return Ok(());
        }

        let stats = ctx.store.stats(ctx.today);
        let [cards, _, details] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(body);
        Self::render_cards(frame, cards, &stats);

        let [breakdown, recent] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .spacing(1)
                .areas(details);
        Self::render_breakdown(frame, breakdown, &stats);
        Self::render_recent(frame, recent, &stats, ctx);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match ctx.keymap.get_action(key.code, key.modifiers) {
            Some(Action::Refresh) => {
                match ctx.store.reload() {
                    Ok(()) => ctx
                        .toasts
                        .info(format!("Reloaded {} interactions", ctx.store.len())),
                    Err(e) => {
                        warn!("Reload failed: {:#}", e);
                        ctx.toasts.error(format!("Reload failed: {}", e));
                    }
                }
                Ok(ScreenAction::None)
            }
            Some(Action::Confirm) => Ok(ScreenAction::Navigate(Page::LogInteraction)),
            Some(Action::Cancel | Action::MoveLeft) => Ok(ScreenAction::FocusSidebar),
            _ => Ok(ScreenAction::None),
        }
    }

    fn footer_hint(&self, keymap: &Keymap) -> String {
        format!(
            "{}: Reload | {}: Log interaction | {}: Sidebar",
            keymap.key_for(Action::Refresh),
            keymap.key_for(Action::Confirm),
            keymap.key_for(Action::Cancel)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InteractionDraft, Store};
    use crate::widgets::ToastManager;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    fn screen_text(store: &Store) -> String {
        let keymap = Keymap::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let mut screen = DashboardScreen::new();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(store, &keymap, today());
                screen.render(f, f.area(), &ctx).unwrap();
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..24)
            .map(|y| (0..100).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10, 20), "");
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert_eq!(bar(5, 10, 20).chars().count(), 10);
        assert_eq!(bar(1, 100, 20).chars().count(), 1);
    }

    #[test]
    fn test_empty_store_shows_hint() {
        let text = screen_text(&Store::in_memory());
        assert!(text.contains("Dashboard"));
        assert!(text.contains("No interactions logged yet"));
    }

    #[test]
    fn test_renders_stats_and_recent() {
        let mut store = Store::in_memory();
        store
            .add(InteractionDraft::new("Dr. Sarah Johnson", today()))
            .unwrap();
        let text = screen_text(&store);
        assert!(text.contains("Total interactions"));
        assert!(text.contains("Dr. Sarah Johnson"));
    }

    #[test]
    fn test_refresh_on_in_memory_store() {
        let mut store = Store::in_memory();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, today());
        let mut screen = DashboardScreen::new();

        let event = Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
        assert_eq!(screen.handle_event(event, &mut ctx).unwrap(), ScreenAction::None);
        assert!(toasts.has_toast());
    }

    #[test]
    fn test_escape_returns_to_sidebar() {
        let mut store = Store::in_memory();
        let mut toasts = ToastManager::new();
        let keymap = Keymap::default();
        let mut ctx = ScreenContext::new(&mut store, &mut toasts, &keymap, today());
        let event = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(
            DashboardScreen::new().handle_event(event, &mut ctx).unwrap(),
            ScreenAction::FocusSidebar
        );
    }
}
