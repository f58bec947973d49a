//! Keyboard input types.
//!
//! Platform-agnostic key representation. Platform-specific code converts from
//! native key events to `KeyEvent`.

use std::fmt;

use smol_str::SmolStr;

/// Key values for keyboard input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    // === Whitespace / editing ===
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    Control,
    Meta,
    Shift,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Alt | Self::Control | Self::Meta | Self::Shift)
    }

    /// Lowercase character keys so Shift+Z and Z resolve to the same binding.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Character(s) if s.chars().any(char::is_uppercase) => {
                Self::Character(s.to_lowercase().into())
            }
            other => other.clone(),
        }
    }

    /// Name used in hotkey notation (`del`, `left`, `c`).
    pub fn name(&self) -> &str {
        match self {
            Self::Character(s) => s.as_str(),
            Self::Unidentified => "unidentified",
            Self::Backspace => "backspace",
            Self::Delete => "del",
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::Escape => "escape",
            Self::Space => "space",
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
            Self::ArrowUp => "up",
            Self::ArrowDown => "down",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Alt => "option",
            Self::Control => "ctrl",
            Self::Meta => "command",
            Self::Shift => "shift",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META_SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// Get the primary modifier + Shift for the platform.
    pub fn primary_shift(is_mac: bool) -> Self {
        if is_mac {
            Self::META_SHIFT
        } else {
            Self::CTRL_SHIFT
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A key combination for triggering an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL)
    }

    pub fn meta(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::META)
    }

    /// Alt, written `option` in hotkey notation.
    pub fn option(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::ALT)
    }

    pub fn shift(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary(is_mac))
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self::with_modifiers(key, Modifiers::primary_shift(is_mac))
    }

    /// Same combo with the key normalised for lookup.
    pub fn normalized(&self) -> Self {
        Self {
            key: self.key.normalized(),
            modifiers: self.modifiers,
        }
    }
}

impl fmt::Display for KeyCombo {
    /// Hotkey notation: `ctrl+option+command+shift+key`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            alt,
            shift,
            meta,
        } = self.modifiers;
        for (held, name) in [(ctrl, "ctrl"), (alt, "option"), (meta, "command"), (shift, "shift")] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

/// Element a keyboard event was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// The design canvas or another non-editable element.
    #[default]
    Canvas,
    Input,
    TextArea,
    Select,
    ContentEditable,
}

impl EventTarget {
    /// Whether the element takes text input of its own.
    pub fn is_form_control(&self) -> bool {
        !matches!(self, Self::Canvas)
    }
}

/// A keydown event as seen by the hotkey layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub combo: KeyCombo,
    pub target: EventTarget,
}

impl KeyEvent {
    /// A keydown on the canvas.
    pub fn new(combo: KeyCombo) -> Self {
        Self {
            combo,
            target: EventTarget::Canvas,
        }
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Events from form controls belong to the control, not the designer.
    pub fn is_form_event(&self) -> bool {
        self.target.is_form_control()
    }
}

impl From<KeyCombo> for KeyEvent {
    fn from(combo: KeyCombo) -> Self {
        Self::new(combo)
    }
}
