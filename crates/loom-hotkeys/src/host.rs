//! Host abstraction traits for hotkey handlers.
//!
//! These traits define the interface between the hotkey logic and the editor
//! that embeds it. The editor context is passed explicitly into every handler
//! call; nothing is looked up globally.

use std::time::Duration;

use loom_designer_core::{ClipboardError, ClipboardPayload, DesignerDocument, NodeTree};
use serde::{Deserialize, Serialize};

/// Node handle type of a host's documents.
pub type NodeOf<H> = <<H as DesignerHost>::Document as NodeTree>::Node;

/// Clipboard sink for copied node schemas.
pub trait NodeClipboard {
    /// Store a payload for a later paste.
    fn set_data(&mut self, payload: &ClipboardPayload) -> Result<(), ClipboardError>;
}

/// The editor context hotkeys operate in.
pub trait DesignerHost {
    type Document: DesignerDocument;

    /// Whether the canvas is in in-place content editing. Hotkeys are
    /// suppressed while it is.
    fn is_live_editing(&self) -> bool;

    /// Document currently focused in the designer.
    fn current_document(&self) -> Option<&Self::Document>;

    fn current_document_mut(&mut self) -> Option<&mut Self::Document>;

    fn clipboard_mut(&mut self) -> &mut dyn NodeClipboard;

    /// Ask the designer to focus-track `node` once `delay` has passed.
    ///
    /// Called after paste so the tracker runs against the settled tree.
    fn track_focus(&mut self, node: <Self::Document as NodeTree>::Node, delay: Duration);
}

/// Clipboard that keeps the last payload as JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw clipboard contents, as a paste event would deliver them.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Put arbitrary text on the clipboard (e.g. copied from elsewhere).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn clear(&mut self) {
        self.text = None;
    }
}

impl NodeClipboard for MemoryClipboard {
    fn set_data(&mut self, payload: &ClipboardPayload) -> Result<(), ClipboardError> {
        self.text = Some(payload.to_json()?);
        Ok(())
    }
}

/// Tunables for the builtin hotkeys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyOptions {
    /// Delay before focus-tracking the first pasted node, in milliseconds.
    pub focus_track_delay_ms: u64,
}

impl Default for HotkeyOptions {
    fn default() -> Self {
        Self {
            focus_track_delay_ms: 10,
        }
    }
}

impl HotkeyOptions {
    pub fn focus_track_delay(&self) -> Duration {
        Duration::from_millis(self.focus_track_delay_ms)
    }
}
