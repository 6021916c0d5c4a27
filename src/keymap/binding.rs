//! Key bindings as written in the config file.
//!
//! A binding is a key string such as `"j"`, `"ctrl+s"` or `"shift+tab"`
//! paired with an [`Action`]. Strings are parsed on match so a typo in the
//! config disables one binding instead of failing the whole load.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// A key string after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Named keys: accepted spellings first, then how the footer shows them.
const NAMED_KEYS: &[(&[&str], KeyCode, &str)] = &[
    (&["up"], KeyCode::Up, "↑"),
    (&["down"], KeyCode::Down, "↓"),
    (&["left"], KeyCode::Left, "←"),
    (&["right"], KeyCode::Right, "→"),
    (&["home"], KeyCode::Home, "Home"),
    (&["end"], KeyCode::End, "End"),
    (&["pageup", "pgup"], KeyCode::PageUp, "PgUp"),
    (&["pagedown", "pgdn"], KeyCode::PageDown, "PgDn"),
    (&["enter", "return"], KeyCode::Enter, "Enter"),
    (&["esc", "escape"], KeyCode::Esc, "Esc"),
    (&["space"], KeyCode::Char(' '), "Space"),
    (&["tab"], KeyCode::Tab, "Tab"),
    (&["backtab"], KeyCode::BackTab, "Shift+Tab"),
    (&["backspace", "bs"], KeyCode::Backspace, "Backspace"),
    (&["delete", "del"], KeyCode::Delete, "Del"),
];

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }

    /// Whether a key event triggers this binding. Unparseable keys never match.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.parse().is_ok_and(|parsed| {
            normalize(parsed.code, parsed.modifiers) == normalize(code, modifiers)
        })
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        parse_key_string(&self.key)
    }

    /// Footer form of the key, e.g. "ctrl+s" -> "Ctrl+S"
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }
}

/// Bring a key into the canonical form used for matching.
///
/// Terminals report Shift+Tab as `BackTab` and uppercase letters with the
/// SHIFT modifier, while symbols such as `?` may or may not carry SHIFT.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::BackTab => (KeyCode::Tab, modifiers | KeyModifiers::SHIFT),
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            (KeyCode::Char(c.to_ascii_lowercase()), modifiers | KeyModifiers::SHIFT)
        }
        KeyCode::Char(c) if !c.is_ascii_alphabetic() => (code, modifiers - KeyModifiers::SHIFT),
        _ => (code, modifiers),
    }
}

const MODIFIERS: &[(&[&str], KeyModifiers, &str)] = &[
    (&["ctrl", "control"], KeyModifiers::CONTROL, "Ctrl"),
    (&["alt", "option"], KeyModifiers::ALT, "Alt"),
    (&["shift"], KeyModifiers::SHIFT, "Shift"),
    (&["super", "cmd"], KeyModifiers::SUPER, "Cmd"),
];

fn find_modifier(name: &str) -> Option<(KeyModifiers, &'static str)> {
    MODIFIERS
        .iter()
        .find(|(names, _, _)| names.contains(&name))
        .map(|(_, modifier, label)| (*modifier, *label))
}

/// Parse `"ctrl+shift+n"` style strings. The last `+` segment is the key.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    // "ctrl++" binds the plus key itself
    let (prefix, last) = match key.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None => key.rsplit_once('+').unwrap_or(("", key.as_str())),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        let (modifier, _) =
            find_modifier(part).ok_or_else(|| format!("Unknown modifier: {}", part))?;
        modifiers |= modifier;
    }

    Ok(ParsedKey {
        code: parse_key_code(last.trim())?,
        modifiers,
    })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    if let Some((_, code, _)) = NAMED_KEYS.iter().find(|(names, _, _)| names.contains(&key)) {
        return Ok(*code);
    }
    if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCode::Char(c)),
        _ => Err(format!("Unknown key: {}", key)),
    }
}

/// Format a key string for display (e.g., "ctrl+n" -> "Ctrl+N")
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            if let Some((_, label)) = find_modifier(&part) {
                return label.to_string();
            }
            NAMED_KEYS
                .iter()
                .find(|(names, _, _)| names.contains(&part.as_str()))
                .map_or_else(|| part.to_uppercase(), |(_, _, label)| (*label).to_string())
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_named_keys() {
        let parsed = parse_key_string("j").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('j'));
        assert_eq!(parsed.modifiers, KeyModifiers::NONE);

        assert_eq!(parse_key_string("down").unwrap().code, KeyCode::Down);
        assert_eq!(parse_key_string("Escape").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("f12").unwrap().code, KeyCode::F(12));
    }

    #[test]
    fn test_parse_modifiers() {
        let parsed = parse_key_string("ctrl+s").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('s'));
        assert_eq!(parsed.modifiers, KeyModifiers::CONTROL);

        let parsed = parse_key_string("ctrl+shift+n").unwrap();
        assert_eq!(
            parsed.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );

        let parsed = parse_key_string("ctrl++").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('+'));
        assert_eq!(parsed.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_key_string("hyper+j").is_err());
        assert!(parse_key_string("f13").is_err());
        assert!(parse_key_string("jk").is_err());
        assert!(!KeyBinding::new("jk", Action::MoveDown)
            .matches(KeyCode::Char('j'), KeyModifiers::NONE));
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("ctrl+s"), "Ctrl+S");
        assert_eq!(format_key_display("up"), "↑");
        assert_eq!(format_key_display("ctrl+shift+j"), "Ctrl+Shift+J");
        assert_eq!(format_key_display("enter"), "Enter");
        assert_eq!(format_key_display("f5"), "F5");
    }

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::new("ctrl+s", Action::Save);
        assert!(binding.matches(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!binding.matches(KeyCode::Char('s'), KeyModifiers::NONE));
        assert!(!binding.matches(KeyCode::Char('d'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_terminal_reported_keys_match() {
        let back = KeyBinding::new("shift+tab", Action::PrevTab);
        assert!(back.matches(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert!(back.matches(KeyCode::BackTab, KeyModifiers::NONE));

        let end = KeyBinding::new("shift+g", Action::GoToEnd);
        assert!(end.matches(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert!(!end.matches(KeyCode::Char('g'), KeyModifiers::NONE));

        let search = KeyBinding::new("/", Action::Search);
        assert!(search.matches(KeyCode::Char('/'), KeyModifiers::SHIFT));
    }
}
