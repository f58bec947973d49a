//! Core designer document trait.
//!
//! Defines the `DesignerDocument` trait: everything the keyboard handlers need
//! from a host document (selection, structural edits, clipboard export,
//! nesting rules and history). Different hosts can back it with their own node
//! model; `MemoryDocument` is the in-crate implementation.

use crate::component::NodeAction;
use crate::error::DesignerError;
use crate::schema::NodeSchema;
use crate::selection::Selection;
use crate::tree::NodeTree;

/// A host-computed insertion point for relocating a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place<N> {
    /// Container receiving the node.
    pub container: N,
    /// Child of `container` to insert relative to. `None` means an end of the
    /// child list.
    pub reference: Option<N>,
}

/// Where pasted content goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion<N> {
    pub target: N,
    /// Child index to insert at. `None` appends.
    pub index: Option<usize>,
}

/// Core trait for designer documents.
///
/// Structural edits return `DesignerError` on invalid requests; callers that
/// drive UI shortcuts treat failures as no-ops.
pub trait DesignerDocument: NodeTree {
    // === Required: node lookup ===

    /// Whether the node exists in this document.
    fn contains_node(&self, node: Self::Node) -> bool;

    // === Required: selection state ===

    fn selection(&self) -> &Selection<Self::Node>;

    fn selection_mut(&mut self) -> &mut Selection<Self::Node>;

    // === Required: structural edits ===

    /// Remove a node and its subtree.
    fn remove_node(&mut self, node: Self::Node) -> Result<(), DesignerError>;

    /// Move `node` into `container` right before `reference`.
    ///
    /// `reference: None` appends to the end of the children.
    fn insert_before(
        &mut self,
        container: Self::Node,
        node: Self::Node,
        reference: Option<Self::Node>,
    ) -> Result<(), DesignerError>;

    /// Move `node` into `container` right after `reference`.
    ///
    /// `reference: None` inserts at the start of the children.
    fn insert_after(
        &mut self,
        container: Self::Node,
        node: Self::Node,
        reference: Option<Self::Node>,
    ) -> Result<(), DesignerError>;

    /// Instantiate schemas as children of `target` starting at `index`
    /// (`None` appends). Returns the new subtree roots in order.
    fn insert_children(
        &mut self,
        target: Self::Node,
        schemas: &[NodeSchema],
        index: Option<usize>,
    ) -> Result<Vec<Self::Node>, DesignerError>;

    // === Required: placement queries ===

    /// Find where `node` may go, starting at `container` and walking upward.
    ///
    /// `reference` is the child of `container` the search arrived through.
    fn suitable_place(
        &self,
        container: Self::Node,
        node: Self::Node,
        reference: Option<Self::Node>,
    ) -> Option<Place<Self::Node>>;

    /// Where pasted schemas should be inserted, given the current selection.
    fn suitable_insertion(&self, schemas: &[NodeSchema]) -> Option<Insertion<Self::Node>>;

    /// Whether `schema` may be nested directly in `target`.
    fn check_nesting_up(&self, target: Self::Node, schema: &NodeSchema) -> bool;

    // === Required: export and permissions ===

    /// Export a node subtree for the clipboard.
    fn export_schema(&self, node: Self::Node) -> Option<NodeSchema>;

    fn can_perform_action(&self, node: Self::Node, action: NodeAction) -> bool;

    // === Required: history ===

    fn history_back(&mut self) -> bool;

    fn history_forward(&mut self) -> bool;

    // === Provided ===

    /// Whether this document tracks undo history at all.
    fn has_history(&self) -> bool {
        true
    }

    /// Run several edits as one history step.
    ///
    /// The default runs `f` directly; documents with history override this to
    /// group the edits.
    fn transact<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        f(self)
    }

    fn top_nodes(&self, include_root: bool) -> Vec<Self::Node> {
        self.selection().top_nodes(self, include_root)
    }

    fn select(&mut self, node: Self::Node) {
        if self.contains_node(node) {
            self.selection_mut().select(node);
        }
    }

    /// Replace the selection, skipping nodes that no longer exist.
    fn select_all(&mut self, nodes: &[Self::Node]) {
        let existing: Vec<Self::Node> = nodes
            .iter()
            .copied()
            .filter(|node| self.contains_node(*node))
            .collect();
        self.selection_mut().select_all(existing);
    }

    fn clear_selection(&mut self) {
        self.selection_mut().clear();
    }
}
