//! Hotkey actions and keydown results.
//!
//! `HotkeyAction` names the designer operations reachable from the keyboard,
//! decoupled from the key combinations that trigger them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// All builtin designer hotkey actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // === Editing ===
    /// Remove the selected nodes (Backspace / Delete).
    Delete,
    /// Drop the selection (Escape).
    ClearSelection,

    // === Clipboard ===
    Copy,
    Cut,
    Paste,

    // === History ===
    Undo,
    Redo,

    // === Selection movement ===
    /// Select the previous sibling (Left).
    SelectPreviousSibling,
    /// Select the next sibling (Right).
    SelectNextSibling,
    /// Select the previous node in document order (Up).
    SelectPrevious,
    /// Select the next node in document order (Down).
    SelectNext,

    // === Node movement ===
    /// Swap with the previous sibling (Option+Left).
    SwapWithPrevious,
    /// Swap with the next sibling (Option+Right).
    SwapWithNext,
    /// Move up, entering a container sibling or leaving the parent (Option+Up).
    MoveUp,
    /// Move down, entering a container sibling or leaving the parent (Option+Down).
    MoveDown,
}

impl HotkeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::ClearSelection => "clear_selection",
            Self::Copy => "copy",
            Self::Cut => "cut",
            Self::Paste => "paste",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SelectPreviousSibling => "select_previous_sibling",
            Self::SelectNextSibling => "select_next_sibling",
            Self::SelectPrevious => "select_previous",
            Self::SelectNext => "select_next",
            Self::SwapWithPrevious => "swap_with_previous",
            Self::SwapWithNext => "swap_with_next",
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
        }
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was accepted but completes later; do not prevent default.
    ///
    /// Returned for paste: the platform paste event must still fire so that
    /// its data can be handed to `Hotkeys::complete_paste`.
    HandledAsync,
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
    /// Event should be passed through (navigation, form input, live editing).
    PassThrough,
}

impl KeydownResult {
    /// Whether the platform's default behaviour should be suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Handled)
    }
}
