use crate::keymap::Action;
use crossterm::event::{KeyCode, KeyModifiers};

/// A text input field with encapsulated state.
///
/// Cursor positions are counted in characters, not bytes.
///
/// # Example
/// ```
/// use hcp_crm::utils::text_input::TextInput;
///
/// let mut input = TextInput::new();
/// input.insert_char('h');
/// input.insert_char('i');
/// assert_eq!(input.text(), "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Set the text and move cursor to end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position. Control characters are ignored.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let byte_index = self.byte_index(self.cursor);
        self.text.insert(byte_index, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Handle a raw key code. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Handle an action from the keymap. Returns true if the action was consumed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Handle a key event together with its mapped action.
    ///
    /// Unmodified characters always insert, even when the keymap binds them
    /// (e.g. `x` to delete in the vim preset). Ctrl/Alt chords only go
    /// through the action.
    pub fn handle_key_with_action(
        &mut self,
        key_code: KeyCode,
        modifiers: KeyModifiers,
        action: Option<Action>,
    ) -> bool {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return action.is_some_and(|a| self.handle_action(a));
        }
        if let KeyCode::Char(_) = key_code {
            return self.handle_key(key_code);
        }
        if let Some(action) = action {
            if self.handle_action(action) {
                return true;
            }
        }
        self.handle_key(key_code)
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor() {
        let mut input = TextInput::new();
        input.insert_char('a');
        input.insert_char('c');
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_non_ascii_names() {
        let mut input = TextInput::with_text("Dr. Müll");
        input.insert_char('e');
        input.insert_char('r');
        assert_eq!(input.text(), "Dr. Müller");
        input.move_home();
        input.move_right();
        input.move_right();
        input.move_right();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "Dr. üller");
        input.delete();
        assert_eq!(input.text(), "Dr. ller");
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\n');
        input.insert_char('\t');
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInput::with_text("x");
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "x");
        input.move_end();
        input.delete();
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn test_vim_x_still_types() {
        let mut input = TextInput::new();
        assert!(input.handle_key_with_action(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            Some(Action::DeleteChar)
        ));
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn test_ctrl_chord_does_not_type() {
        let mut input = TextInput::with_text("ab");
        input.move_home();
        assert!(input.handle_key_with_action(
            KeyCode::Char('d'),
            KeyModifiers::CONTROL,
            Some(Action::DeleteChar)
        ));
        assert_eq!(input.text(), "b");
        assert!(!input.handle_key_with_action(KeyCode::Char('s'), KeyModifiers::CONTROL, None));
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let input = TextInput::with_text("   ");
        assert!(input.is_empty());
        assert_eq!(input.text_trimmed(), "");
    }
}
