//! Error types for designer operations.

use thiserror::Error;

/// Errors from structural edits on a designer document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DesignerError {
    /// The node does not exist in this document.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Children can only be placed in container nodes.
    #[error("{0} is not a container")]
    NotAContainer(String),

    /// Moving a node into itself or one of its descendants.
    #[error("moving {node} into {container} would create a cycle")]
    WouldCreateCycle { node: String, container: String },

    /// The reference node is not a child of the target container.
    #[error("{reference} is not a child of {container}")]
    NotAChild { reference: String, container: String },

    /// The document root cannot be removed or moved.
    #[error("the document root cannot be detached")]
    RootDetach,
}

/// Errors reading or writing the node clipboard.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClipboardError {
    /// Clipboard text is not a JSON payload.
    #[error("invalid clipboard payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON payload of some other kind (not a node schema).
    #[error("unexpected clipboard payload type {0:?}")]
    UnexpectedType(String),

    /// The platform clipboard rejected the write.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}
