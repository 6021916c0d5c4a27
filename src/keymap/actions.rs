//! Action enum for all user-triggered actions
//!
//! These represent semantic actions that can be triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All possible user actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation (unified across screens) ============
    /// Move selection up in a list
    MoveUp,
    /// Move selection down in a list
    MoveDown,
    /// Move left (cycle a choice field backwards, leave content)
    MoveLeft,
    /// Move right (cycle a choice field forwards, enter content)
    MoveRight,
    /// Jump up by a page
    PageUp,
    /// Jump down by a page
    PageDown,
    /// Go to the first item
    GoToTop,
    /// Go to the last item
    GoToEnd,

    // ============ Selection & Confirmation ============
    /// Confirm selection (Enter)
    Confirm,
    /// Cancel / go back (Esc)
    Cancel,
    /// Toggle the selected item (Space)
    ToggleSelect,

    // ============ Global ============
    /// Quit the application
    Quit,
    /// Open the dashboard
    GoToDashboard,
    /// Open the log interaction form
    GoToLogInteraction,
    /// Open the interactions list
    GoToInteractionsList,
    /// Open or close the navigation drawer on narrow terminals
    ToggleMenu,

    // ============ Screen-specific actions ============
    /// Delete selected item
    Delete,
    /// Search / filter
    Search,
    /// Reload data from disk
    Refresh,
    /// Save / submit form
    Save,
    /// Switch between form and chat entry
    ToggleMode,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Field navigation ============
    /// Move to next field
    NextTab,
    /// Move to previous field
    PrevTab,

    // ============ Yes/No prompts ============
    /// Confirm yes
    Yes,
    /// Confirm no
    No,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Confirm => "Confirm",
            Action::Cancel => "Cancel / Go back",
            Action::ToggleSelect => "Toggle",
            Action::Quit => "Quit",
            Action::GoToDashboard => "Dashboard",
            Action::GoToLogInteraction => "Log interaction",
            Action::GoToInteractionsList => "Interactions list",
            Action::ToggleMenu => "Toggle menu",
            Action::Delete => "Delete",
            Action::Search => "Search",
            Action::Refresh => "Refresh",
            Action::Save => "Save",
            Action::ToggleMode => "Form / chat mode",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::NextTab => "Next field",
            Action::PrevTab => "Previous field",
            Action::Yes => "Yes",
            Action::No => "No",
        }
    }

    /// Whether this action is still processed while a text input has focus.
    ///
    /// Everything else (e.g. `Quit` bound to `q`) is suppressed so the key
    /// can be typed.
    pub fn allowed_in_text_input(&self) -> bool {
        matches!(
            self,
            Action::Cancel
                | Action::Confirm
                | Action::NextTab
                | Action::PrevTab
                | Action::MoveLeft
                | Action::MoveRight
                | Action::MoveUp
                | Action::MoveDown
                | Action::Backspace
                | Action::DeleteChar
                | Action::Save
                | Action::ToggleMode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Action::GoToLogInteraction).unwrap();
        assert_eq!(json, "\"go_to_log_interaction\"");
        let action: Action = serde_json::from_str("\"toggle_menu\"").unwrap();
        assert_eq!(action, Action::ToggleMenu);
    }

    #[test]
    fn test_quit_suppressed_in_text_input() {
        assert!(!Action::Quit.allowed_in_text_input());
        assert!(!Action::Delete.allowed_in_text_input());
        assert!(Action::Save.allowed_in_text_input());
        assert!(Action::NextTab.allowed_in_text_input());
    }
}
