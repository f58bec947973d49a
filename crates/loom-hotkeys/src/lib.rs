//! Builtin keyboard shortcuts for the loom page designer.
//!
//! `Hotkeys` resolves keydown events through a `KeybindingConfig` and runs the
//! bound action against a `DesignerHost`. Paste completes in two steps: the
//! keydown is accepted with `KeydownResult::HandledAsync` and the clipboard
//! text is handed to `Hotkeys::complete_paste` once the platform delivers it.

pub mod actions;
pub mod handlers;
pub mod host;
pub mod keybindings;
pub mod keys;

pub use actions::{HotkeyAction, KeydownResult};
pub use handlers::{execute_hotkey, paste_payload};
pub use host::{DesignerHost, HotkeyOptions, MemoryClipboard, NodeClipboard, NodeOf};
pub use keybindings::KeybindingConfig;
pub use keys::{EventTarget, Key, KeyCombo, KeyEvent, Modifiers};

use loom_designer_core::ClipboardPayload;

/// Keybindings plus options, ready to receive keydown events.
#[derive(Debug, Clone, Default)]
pub struct Hotkeys {
    bindings: KeybindingConfig,
    options: HotkeyOptions,
}

impl Hotkeys {
    pub fn new(bindings: KeybindingConfig, options: HotkeyOptions) -> Self {
        Self { bindings, options }
    }

    pub fn bindings(&self) -> &KeybindingConfig {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeybindingConfig {
        &mut self.bindings
    }

    pub fn options(&self) -> &HotkeyOptions {
        &self.options
    }

    /// Handle a keydown event.
    ///
    /// Unbound navigation and modifier keys pass through; any other unbound
    /// key is `NotHandled`.
    pub fn handle_keydown<H: DesignerHost>(&self, host: &mut H, event: &KeyEvent) -> KeydownResult {
        let Some(action) = self.bindings.lookup(&event.combo) else {
            if event.combo.key.is_navigation() || event.combo.key.is_modifier() {
                return KeydownResult::PassThrough;
            }
            return KeydownResult::NotHandled;
        };

        tracing::info!(combo = %event.combo, %action, "hotkey triggered");
        execute_hotkey(host, action, event)
    }

    /// Finish a paste with the text the platform paste event carried.
    ///
    /// Text that is not a node schema payload is ignored. Returns whether
    /// any node was inserted.
    pub fn complete_paste<H: DesignerHost>(&self, host: &mut H, text: &str) -> bool {
        if host.is_live_editing() {
            tracing::debug!("live editing active, paste left to the editor");
            return false;
        }

        let payload = match ClipboardPayload::from_json(text) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(%err, "clipboard holds no node schemas");
                return false;
            }
        };
        paste_payload(host, &payload, self.options.focus_track_delay())
    }
}
