//! Log interaction screen.
//!
//! Two ways to record an interaction:
//! - a structured form, one field per attribute
//! - a chat note sent to the backend, which extracts the fields itself

use crate::components::Header;
use crate::keymap::{Action, Keymap};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::state::Page;
use crate::store::{parse_attendees, InteractionDraft, InteractionType, Sentiment};
use crate::styles::theme;
use crate::utils::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Entry mode of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    Form,
    Chat,
}

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    HcpName,
    Date,
    Type,
    Sentiment,
    Attendees,
    Topics,
    Outcomes,
    FollowUp,
}

impl Field {
    const ALL: [Field; 8] = [
        Field::HcpName,
        Field::Date,
        Field::Type,
        Field::Sentiment,
        Field::Attendees,
        Field::Topics,
        Field::Outcomes,
        Field::FollowUp,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn is_text(self) -> bool {
        !matches!(self, Field::Type | Field::Sentiment)
    }

    fn label(self) -> &'static str {
        match self {
            Field::HcpName => "HCP name",
            Field::Date => "Date",
            Field::Type => "Type",
            Field::Sentiment => "Sentiment",
            Field::Attendees => "Attendees",
            Field::Topics => "Topics discussed",
            Field::Outcomes => "Outcomes",
            Field::FollowUp => "Follow-up action",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Field::HcpName => "Dr. Sarah Johnson",
            Field::Date => "YYYY-MM-DD",
            Field::Attendees => "Comma separated names",
            Field::Topics => "Products, studies, questions raised",
            Field::Outcomes => "Agreements, samples requested, objections",
            Field::FollowUp => "Optional next step",
            Field::Type | Field::Sentiment => "",
        }
    }
}

/// Log interaction screen controller
#[derive(Debug, Default)]
pub struct LogInteractionScreen {
    mode: LogMode,
    focus: Field,
    hcp_name: TextInput,
    date: TextInput,
    interaction_type: InteractionType,
    sentiment: Sentiment,
    attendees: TextInput,
    topics: TextInput,
    outcomes: TextInput,
    follow_up: TextInput,
    note: TextInput,
    /// Summary line of the last chat submission
    last_chat: Option<String>,
}

impl LogInteractionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LogMode {
        self.mode
    }

    pub fn focused_field(&self) -> Field {
        self.focus
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::HcpName => Some(&mut self.hcp_name),
            Field::Date => Some(&mut self.date),
            Field::Attendees => Some(&mut self.attendees),
            Field::Topics => Some(&mut self.topics),
            Field::Outcomes => Some(&mut self.outcomes),
            Field::FollowUp => Some(&mut self.follow_up),
            Field::Type | Field::Sentiment => None,
        }
    }

    fn input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::HcpName => Some(&self.hcp_name),
            Field::Date => Some(&self.date),
            Field::Attendees => Some(&self.attendees),
            Field::Topics => Some(&self.topics),
            Field::Outcomes => Some(&self.outcomes),
            Field::FollowUp => Some(&self.follow_up),
            Field::Type | Field::Sentiment => None,
        }
    }

    /// Typed text that leaving the screen would lose. The prefilled date does
    /// not count.
    fn has_unsaved_input(&self) -> bool {
        [
            &self.hcp_name,
            &self.attendees,
            &self.topics,
            &self.outcomes,
            &self.follow_up,
            &self.note,
        ]
        .iter()
        .any(|input| !input.text_trimmed().is_empty())
    }

    fn reset_form(&mut self, today: NaiveDate) {
        let mode = self.mode;
        let last_chat = self.last_chat.take();
        *self = Self {
            mode,
            last_chat,
            ..Self::default()
        };
        self.date.set_text(today.format(DATE_FORMAT).to_string());
    }

    /// Build a draft from the form, or explain what is wrong with it.
    fn draft(&self) -> Result<InteractionDraft, (Field, &'static str)> {
        if self.hcp_name.is_empty() {
            return Err((Field::HcpName, "HCP name is required"));
        }
        let date = NaiveDate::parse_from_str(self.date.text_trimmed(), DATE_FORMAT)
            .map_err(|_| (Field::Date, "Invalid date, use YYYY-MM-DD"))?;

        let mut draft = InteractionDraft::new(self.hcp_name.text_trimmed(), date);
        draft.interaction_type = self.interaction_type;
        draft.sentiment = self.sentiment;
        draft.attendees = parse_attendees(self.attendees.text());
        draft.topics = self.topics.text_trimmed().to_string();
        draft.outcomes = self.outcomes.text_trimmed().to_string();
        if !self.follow_up.is_empty() {
            draft.follow_up = Some(self.follow_up.text_trimmed().to_string());
        }
        Ok(draft)
    }

    fn submit_form(&mut self, ctx: &mut ScreenContext) {
        let draft = match self.draft() {
            Ok(draft) => draft,
            Err((field, message)) => {
                self.focus = field;
                ctx.toasts.error(message);
                return;
            }
        };

        match ctx.store.add(draft) {
            Ok(added) => {
                ctx.toasts
                    .success(format!("Logged {} with {}", added.interaction_type, added.hcp_name));
                self.reset_form(ctx.today);
            }
            Err(e) => {
                warn!("Failed to save interaction: {:#}", e);
                ctx.toasts.error(format!("Failed to save: {}", e));
            }
        }
    }

    fn submit_chat(&mut self, ctx: &mut ScreenContext) {
        if self.note.is_empty() {
            ctx.toasts.warning("Write a note first");
            return;
        }
        let Some(backend) = ctx.backend else {
            ctx.toasts
                .info("Chat logging is unavailable: no backend configured");
            return;
        };

        info!("Submitting chat note to backend");
        let outcome = match backend.log_chat(self.note.text_trimmed(), ctx.today) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Chat logging failed: {:#}", e);
                ctx.toasts.error(format!("Backend error: {}", e));
                return;
            }
        };

        match ctx.store.add(outcome.draft) {
            Ok(added) => {
                let summary = format!(
                    "{} with {} on {} ({})",
                    added.interaction_type,
                    added.hcp_name,
                    added.date.format(DATE_FORMAT),
                    added.sentiment
                );
                ctx.toasts.success(format!("Logged {}", summary));
                self.last_chat = Some(summary);
                self.note.clear();
            }
            Err(e) => {
                warn!("Failed to save chat interaction: {:#}", e);
                ctx.toasts.error(format!("Failed to save: {}", e));
                return;
            }
        }

        if let Some(reply) = outcome.reply {
            ctx.toasts.info(reply);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, action: Option<Action>, ctx: &mut ScreenContext) {
        if let Some(input) = self.input_mut(self.focus) {
            if input.handle_key_with_action(key.code, key.modifiers, action) {
                return;
            }
        }

        match action {
            Some(Action::MoveDown) => self.focus = self.focus.next(),
            Some(Action::MoveUp) => self.focus = self.focus.prev(),
            Some(Action::Confirm) => {
                if self.focus == Field::FollowUp {
                    self.submit_form(ctx);
                } else {
                    self.focus = self.focus.next();
                }
            }
            Some(Action::MoveRight | Action::ToggleSelect) => self.cycle_choice(true),
            Some(Action::MoveLeft) => self.cycle_choice(false),
            _ => {}
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match (self.focus, forward) {
            (Field::Type, true) => self.interaction_type = self.interaction_type.next(),
            (Field::Type, false) => self.interaction_type = self.interaction_type.prev(),
            (Field::Sentiment, true) => self.sentiment = self.sentiment.next(),
            (Field::Sentiment, false) => self.sentiment = self.sentiment.prev(),
            _ => {}
        }
    }

    fn render_choice(&self, frame: &mut Frame, area: Rect, field: Field, focused: bool) {
        let t = theme();
        let (value, style) = match field {
            Field::Type => (
                self.interaction_type.label(),
                Style::default().fg(t.interaction_type_color(self.interaction_type)),
            ),
            _ => (self.sentiment.label(), t.sentiment_style(self.sentiment)),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                t.border_focused_style()
            } else {
                t.border_style()
            })
            .title(format!(" {} ", field.label()));
        let arrows = if focused { t.emphasis_style() } else { t.muted_style() };
        let line = Line::from(vec![
            Span::styled("\u{2039} ", arrows), // ‹
            Span::styled(value, style.add_modifier(Modifier::BOLD)),
            Span::styled(" \u{203A}", arrows), // ›
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field, focused: bool) {
        let focused = focused && self.focus == field;
        match self.input(field) {
            Some(input) => frame.render_text_input_widget(
                TextInputWidget::new(input)
                    .title(field.label())
                    .placeholder(field.placeholder())
                    .focused(focused),
                area,
            ),
            None => self.render_choice(frame, area, field, focused),
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let rows = Layout::vertical([Constraint::Length(3); 6]).split(area);

        let [name, date] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(16)]).areas(rows[0]);
        let [kind, sentiment] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(rows[1]);

        self.render_field(frame, name, Field::HcpName, focused);
        self.render_field(frame, date, Field::Date, focused);
        self.render_field(frame, kind, Field::Type, focused);
        self.render_field(frame, sentiment, Field::Sentiment, focused);
        self.render_field(frame, rows[2], Field::Attendees, focused);
        self.render_field(frame, rows[3], Field::Topics, focused);
        self.render_field(frame, rows[4], Field::Outcomes, focused);
        self.render_field(frame, rows[5], Field::FollowUp, focused);
    }

    fn render_chat(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let [input, _, help] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
                .areas(area);

        frame.render_text_input_widget(
            TextInputWidget::new(&self.note)
                .title("Describe the interaction")
                .placeholder("Just had a call with Dr. Sarah Johnson about ...")
                .focused(ctx.focused),
            input,
        );

        let mut lines = vec![Line::from(vec![
            Span::styled("Press ", t.text_style()),
            Span::styled(ctx.keymap.key_for(Action::Confirm), t.emphasis_style()),
            Span::styled(
                " to send the note. The backend extracts the HCP, topics, sentiment and follow-ups.",
                t.text_style(),
            ),
        ])];
        if let Some(ref last) = self.last_chat {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Last logged: ", t.muted_style()),
                Span::styled(last.as_str(), t.success_style()),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::horizontal(1))),
            help,
        );
    }
}

impl Screen for LogInteractionScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let [header, body] =
            Layout::vertical([Constraint::Length(Header::HEIGHT), Constraint::Min(0)]).areas(area);
        let description = match self.mode {
            LogMode::Form => "Structured form",
            LogMode::Chat => "Chat note",
        };
        Header::render(frame, header, Page::LogInteraction, description);

        match self.mode {
            LogMode::Form => self.render_form(frame, body, ctx.focused),
            LogMode::Chat => self.render_chat(frame, body, ctx),
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

        if key.code == KeyCode::Esc || action == Some(Action::Cancel) {
            return Ok(ScreenAction::FocusSidebar);
        }

        match action {
            Some(Action::ToggleMode) => {
                self.mode = match self.mode {
                    LogMode::Form => LogMode::Chat,
                    LogMode::Chat => LogMode::Form,
                };
                return Ok(ScreenAction::None);
            }
            Some(Action::Save) => {
                match self.mode {
                    LogMode::Form => self.submit_form(ctx),
                    LogMode::Chat => self.submit_chat(ctx),
                }
                return Ok(ScreenAction::None);
            }
            Some(Action::NextTab) if self.mode == LogMode::Form => {
                self.focus = self.focus.next();
                return Ok(ScreenAction::None);
            }
            Some(Action::PrevTab) if self.mode == LogMode::Form => {
                self.focus = self.focus.prev();
                return Ok(ScreenAction::None);
            }
            _ => {}
        }

        match self.mode {
            LogMode::Form => self.handle_form_key(key, action, ctx),
            LogMode::Chat => {
                if action == Some(Action::Confirm) {
                    self.submit_chat(ctx);
                } else {
                    self.note
                        .handle_key_with_action(key.code, key.modifiers, action);
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        match self.mode {
            LogMode::Form => self.focus.is_text(),
            LogMode::Chat => true,
        }
    }

    fn footer_hint(&self, keymap: &Keymap) -> String {
        match self.mode {
            LogMode::Form => format!(
                "Tab/Shift+Tab: Field | ←/→: Change choice | {}: Save | {}: Chat mode | {}: Sidebar",
                keymap.key_for(Action::Save),
                keymap.key_for(Action::ToggleMode),
                keymap.key_for(Action::Cancel)
            ),
            LogMode::Chat => format!(
                "{}: Send | {}: Form mode | {}: Sidebar",
                keymap.key_for(Action::Confirm),
                keymap.key_for(Action::ToggleMode),
                keymap.key_for(Action::Cancel)
            ),
        }
    }

    fn on_enter(&mut self, ctx: &mut ScreenContext) -> Result<()> {
        if self.date.is_empty() {
            self.date.set_text(ctx.today.format(DATE_FORMAT).to_string());
        }
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut ScreenContext) -> Result<()> {
        if self.has_unsaved_input() {
            info!("Discarding unsaved {:?} draft", self.mode);
            ctx.toasts.warning("Unsaved interaction draft discarded");
        }
        Ok(())
    }
}
