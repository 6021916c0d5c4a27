//! Toast notifications.
//!
//! A non-blocking notification drawn in the top-right corner of the frame.
//! Toasts are queued and shown one at a time; each one expires after its
//! duration and the next one takes its place.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toasts waiting beyond this are dropped oldest first
const MAX_QUEUED: usize = 8;

/// Toast notification variant for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Warning => "\u{26A0}", // ⚠
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.accent,
            ToastVariant::Warning => t.warning,
            ToastVariant::Error => t.error,
        }
    }
}

/// Toast notification data
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    /// Set when the toast becomes visible, not when it is queued
    pub shown_at: Option<Instant>,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            shown_at: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast has been visible for its full duration
    pub fn is_expired(&self) -> bool {
        self.shown_at
            .is_some_and(|shown| shown.elapsed() >= self.duration)
    }
}

/// Renders a single toast in the top-right corner of the given area.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    /// The toast rect: top-right corner, one cell away from the edges
    pub fn calculate_area(area: Rect, message: &str) -> Rect {
        let wanted = message.chars().count() as u16 + 6;
        let toast_width = wanted.clamp(20, 48).min(area.width.saturating_sub(2));
        let toast_height = if wanted > toast_width { 4u16 } else { 3u16 };

        let x = area.x + area.width.saturating_sub(toast_width + 1);
        let y = area.y + 1.min(area.height);

        Rect::new(x, y, toast_width, toast_height.min(area.height))
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = Self::calculate_area(area, &self.toast.message);
        let t = theme();

        Clear.render(toast_area, buf);

        let message = format!(" {} {} ", self.toast.variant.icon(), self.toast.message);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(Style::default().bg(t.background));

        Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(t.text).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(toast_area, buf);
    }
}

/// Queue of toasts with one visible at a time.
///
/// The shell owns exactly one of these for its whole lifetime; screens push
/// into it through their context.
#[derive(Debug, Default)]
pub struct ToastManager {
    current: Option<Toast>,
    queue: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast. It shows immediately if nothing else is visible.
    pub fn push(&mut self, toast: Toast) {
        if self.queue.len() >= MAX_QUEUED {
            self.queue.pop_front();
        }
        self.queue.push_back(toast);
        if self.current.is_none() {
            self.advance();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Toast::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Drop the visible toast if it expired and show the next one.
    /// Returns whether a toast is visible afterwards.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
            self.advance();
        }
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Number of toasts waiting behind the visible one
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn has_toast(&self) -> bool {
        self.current.is_some()
    }

    /// Render the visible toast (if any) over the whole frame area
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget::new(toast), area);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.queue.clear();
    }

    fn advance(&mut self) {
        if let Some(mut next) = self.queue.pop_front() {
            next.shown_at = Some(Instant::now());
            self.current = Some(next);
        }
    }
}
