//! loom-designer-core: designer document logic without framework dependencies.
//!
//! This crate provides:
//! - `NodeTree` trait for structural tree access
//! - Document-order traversal used for arrow-key selection movement
//! - `DesignerDocument` trait - the host contract for editing operations
//! - `MemoryDocument` - arena-backed document with snapshot history
//! - Clipboard schema payload shared by copy and paste

pub mod component;
pub mod document;
pub mod error;
pub mod history;
pub mod memory;
pub mod schema;
pub mod selection;
pub mod traversal;
pub mod tree;

pub use component::{ComponentMeta, ComponentRegistry, NodeAction};
pub use document::{DesignerDocument, Insertion, Place};
pub use error::{ClipboardError, DesignerError};
pub use history::SnapshotHistory;
pub use memory::{MemoryDocument, NodeId};
pub use schema::{CLIPBOARD_PAYLOAD_TYPE, ClipboardPayload, NodeSchema};
pub use selection::Selection;
pub use smol_str::SmolStr;
pub use traversal::{next_for_select, next_in_document, prev_for_select, prev_in_document};
pub use tree::NodeTree;
