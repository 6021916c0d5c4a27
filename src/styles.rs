//! Theme and style system
//!
//! One palette is active at a time; every widget reads it through [`theme()`].

use crate::state::Page;
use crate::store::{InteractionType, Sentiment};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::RwLock;

/// Marker drawn next to the selected table row
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Install the active palette. Called once at startup.
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(std::sync::PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

/// Pick the theme from config, with `NO_COLOR` / `--no-colors` taking precedence
pub fn resolve_theme(configured: &str, no_colors: bool) -> ThemeType {
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    if no_colors || no_color_env {
        ThemeType::NoColor
    } else {
        configured.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Modifiers only, no colour codes at all
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

/// Colour palette.
///
/// `accent`, `chat` and `info` tint pages and interaction types; the semantic
/// colours back toasts, sentiment badges and follow-up markers.
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Titles, the dashboard page, meetings
    pub accent: Color,
    /// Chat-sourced entries
    pub chat: Color,
    /// The interactions page, emails
    pub info: Color,

    pub success: Color,
    /// Pending follow-ups
    pub warning: Color,
    pub error: Color,

    pub text: Color,
    pub muted: Color,
    pub emphasis: Color,

    pub border: Color,
    pub focus: Color,
    pub selection_bg: Color,
    pub background: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            accent: Color::Cyan,
            chat: Color::Magenta,
            info: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            text: Color::White,
            muted: Color::DarkGray,
            emphasis: Color::Yellow,
            border: Color::DarkGray,
            focus: Color::Cyan,
            selection_bg: Color::DarkGray,
            background: Color::Reset,
        }
    }

    /// Darker accents so they stay readable on a light terminal
    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            accent: Color::Blue,
            chat: Color::Magenta,
            info: Color::Cyan,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            text: Color::Black,
            muted: Color::DarkGray,
            emphasis: Color::Blue,
            border: Color::DarkGray,
            focus: Color::Blue,
            selection_bg: Color::Gray,
            background: Color::Reset,
        }
    }

    /// Every slot is `Reset`; the style helpers fall back to modifiers.
    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            accent: Color::Reset,
            chat: Color::Reset,
            info: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            emphasis: Color::Reset,
            border: Color::Reset,
            focus: Color::Reset,
            selection_bg: Color::Reset,
            background: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    /// Foreground `color`, or `plain` when colours are off
    fn fg_or(&self, color: Color, plain: Modifier) -> Style {
        if self.is_plain() {
            Style::default().add_modifier(plain)
        } else {
            Style::default().fg(color)
        }
    }

    pub fn title_style(&self) -> Style {
        self.fg_or(self.accent, Modifier::BOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.fg_or(self.text, Modifier::empty())
    }

    pub fn muted_style(&self) -> Style {
        self.fg_or(self.muted, Modifier::DIM)
    }

    /// Key hints, counts and other short highlights
    pub fn emphasis_style(&self) -> Style {
        self.fg_or(self.emphasis, Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.fg_or(self.success, Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        self.fg_or(self.warning, Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        self.fg_or(self.border, Modifier::empty())
    }

    /// Border of the region that owns keyboard focus
    pub fn border_focused_style(&self) -> Style {
        self.fg_or(self.focus, Modifier::BOLD)
    }

    /// Selected table row or menu card
    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.emphasis)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Sentiment badge colour: positive reads green, negative red
    pub fn sentiment_style(&self, sentiment: Sentiment) -> Style {
        match sentiment {
            Sentiment::Positive => self.fg_or(self.success, Modifier::empty()),
            Sentiment::Neutral => self.fg_or(self.muted, Modifier::empty()),
            Sentiment::Negative => self.fg_or(self.error, Modifier::BOLD),
        }
    }

    /// Accent colour of a page in the sidebar and its screen title
    pub fn page_color(&self, page: Page) -> Color {
        match page {
            Page::Dashboard => self.accent,
            Page::LogInteraction => self.success,
            Page::InteractionsList => self.info,
        }
    }

    /// Colour of an interaction type in charts and table cells
    pub fn interaction_type_color(&self, kind: InteractionType) -> Color {
        match kind {
            InteractionType::Meeting => self.accent,
            InteractionType::Call => self.success,
            InteractionType::Email => self.info,
            InteractionType::Chat => self.chat,
            InteractionType::Conference => self.warning,
        }
    }

    pub fn background_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().bg(self.background)
    }
}
