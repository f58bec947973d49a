//! Arena-backed in-memory designer document.
//!
//! `MemoryDocument` keeps the node tree in a map keyed by `NodeId`, looks up
//! container-ness and nesting rules in a `ComponentRegistry`, and records a
//! whole-tree snapshot before every structural edit for undo/redo.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::component::{ComponentMeta, ComponentRegistry, NodeAction};
use crate::document::{DesignerDocument, Insertion, Place};
use crate::error::DesignerError;
use crate::history::SnapshotHistory;
use crate::schema::NodeSchema;
use crate::selection::Selection;
use crate::tree::NodeTree;

/// Handle of a node in a `MemoryDocument`. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    component: SmolStr,
    props: Map<String, Value>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The part of the document history snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
struct TreeState {
    nodes: HashMap<NodeId, NodeData>,
    root: Option<NodeId>,
}

/// Open transaction: the state before its first edit.
#[derive(Debug)]
struct Batch {
    before: TreeState,
    changed: bool,
}

/// In-memory `DesignerDocument`.
#[derive(Debug)]
pub struct MemoryDocument {
    tree: TreeState,
    components: ComponentRegistry,
    selection: Selection<NodeId>,
    history: SnapshotHistory<TreeState>,
    next_id: u32,
    batch: Option<Batch>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new(ComponentRegistry::default())
    }
}

impl MemoryDocument {
    /// Create an empty document using the given component metadata.
    pub fn new(components: ComponentRegistry) -> Self {
        Self {
            tree: TreeState::default(),
            components,
            selection: Selection::new(),
            history: SnapshotHistory::default(),
            next_id: 0,
            batch: None,
        }
    }

    /// Load a document from a schema. Loading is not an undoable step.
    pub fn from_schema(schema: &NodeSchema, components: ComponentRegistry) -> Self {
        let mut doc = Self::new(components);
        let root = doc.build_subtree(schema, None);
        doc.tree.root = Some(root);
        doc
    }

    /// Keep at most `max_steps` undo steps. Drops existing history.
    pub fn with_history_limit(mut self, max_steps: usize) -> Self {
        self.history = SnapshotHistory::new(max_steps);
        self
    }

    /// Replace the whole tree with a fresh root node.
    ///
    /// Clears selection and history.
    pub fn create_root(&mut self, component: impl Into<SmolStr>) -> NodeId {
        self.tree = TreeState::default();
        let root = self.build_subtree(&NodeSchema::new(component), None);
        self.tree.root = Some(root);
        self.selection.clear();
        self.history.clear();
        root
    }

    /// Append a new empty node of `component` to `parent`.
    pub fn append(
        &mut self,
        parent: NodeId,
        component: impl Into<SmolStr>,
    ) -> Result<NodeId, DesignerError> {
        let schema = NodeSchema::new(component);
        self.insert_children(parent, std::slice::from_ref(&schema), None)?
            .into_iter()
            .next()
            .ok_or_else(|| DesignerError::NodeNotFound(parent.to_string()))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root
    }

    pub fn component(&self, node: NodeId) -> Option<&str> {
        self.tree.nodes.get(&node).map(|data| data.component.as_str())
    }

    pub fn props(&self, node: NodeId) -> Option<&Map<String, Value>> {
        self.tree.nodes.get(&node).map(|data| &data.props)
    }

    pub fn node_count(&self) -> usize {
        self.tree.nodes.len()
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// First node of `component` in document order.
    pub fn find(&self, component: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.tree.root.into_iter().collect();
        while let Some(node) = stack.pop() {
            if self.component(node) == Some(component) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        None
    }

    pub fn can_back(&self) -> bool {
        self.history.can_back()
    }

    pub fn can_forward(&self) -> bool {
        self.history.can_forward()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn meta(&self, node: NodeId) -> Option<&ComponentMeta> {
        self.component(node).map(|name| self.components.get(name))
    }

    fn check_exists(&self, node: NodeId) -> Result<(), DesignerError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(DesignerError::NodeNotFound(node.to_string()))
        }
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut NodeData, DesignerError> {
        self.tree
            .nodes
            .get_mut(&node)
            .ok_or_else(|| DesignerError::NodeNotFound(node.to_string()))
    }

    /// Record history for the edit about to happen.
    fn begin_change(&mut self) {
        match &mut self.batch {
            Some(batch) => batch.changed = true,
            None => self.history.record(self.tree.clone()),
        }
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create nodes for `schema` (fresh ids) without attaching the subtree root.
    fn build_subtree(&mut self, schema: &NodeSchema, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc_id();
        self.tree.nodes.insert(
            id,
            NodeData {
                component: schema.component_name.clone(),
                props: schema.props.clone(),
                parent,
                children: Vec::new(),
            },
        );

        let children: Vec<NodeId> = schema
            .children
            .iter()
            .map(|child| self.build_subtree(child, Some(id)))
            .collect();
        if let Some(data) = self.tree.nodes.get_mut(&id) {
            data.children = children;
        }
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.tree.nodes.get_mut(&node).and_then(|data| data.parent.take())
        else {
            return;
        };
        if let Some(data) = self.tree.nodes.get_mut(&parent) {
            data.children.retain(|child| *child != node);
        }
    }

    fn attach(&mut self, container: NodeId, node: NodeId, index: usize) -> Result<(), DesignerError> {
        let data = self.node_mut(container)?;
        let index = index.min(data.children.len());
        data.children.insert(index, node);
        self.node_mut(node)?.parent = Some(container);
        Ok(())
    }

    fn validate_move(
        &self,
        container: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DesignerError> {
        self.check_exists(container)?;
        self.check_exists(node)?;
        if self.is_root(node) {
            return Err(DesignerError::RootDetach);
        }
        if !self.is_container(container) {
            return Err(DesignerError::NotAContainer(container.to_string()));
        }
        if self.contains(node, container) {
            return Err(DesignerError::WouldCreateCycle {
                node: node.to_string(),
                container: container.to_string(),
            });
        }
        if let Some(reference) = reference {
            if reference != node && self.parent(reference) != Some(container) {
                return Err(DesignerError::NotAChild {
                    reference: reference.to_string(),
                    container: container.to_string(),
                });
            }
        }
        Ok(())
    }

    fn move_node(
        &mut self,
        container: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
        after: bool,
    ) -> Result<(), DesignerError> {
        self.validate_move(container, node, reference)?;
        if reference == Some(node) {
            return Ok(());
        }

        self.begin_change();
        self.detach(node);

        let siblings = self.children(container);
        let index = match reference {
            Some(reference) => {
                let position = siblings
                    .iter()
                    .position(|child| *child == reference)
                    .unwrap_or(siblings.len());
                if after { position + 1 } else { position }
            }
            None if after => 0,
            None => siblings.len(),
        };
        self.attach(container, node, index)
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        for child in self.children(node) {
            self.collect_subtree(*child, out);
        }
    }

    fn accepts(&self, container: NodeId, node: NodeId) -> bool {
        let (Some(container_name), Some(meta)) = (self.component(container), self.meta(node))
        else {
            return false;
        };
        self.is_container(container)
            && !self.contains(node, container)
            && meta.allows_parent(container_name)
    }

    fn prune_selection(&mut self) {
        let nodes = &self.tree.nodes;
        self.selection.retain(|node| nodes.contains_key(node));
    }

    fn swap_state(&mut self, forward: bool) -> bool {
        let current = std::mem::take(&mut self.tree);
        let result = if forward {
            self.history.forward(current)
        } else {
            self.history.back(current)
        };
        match result {
            Ok(state) => {
                self.tree = state;
                self.prune_selection();
                true
            }
            Err(current) => {
                self.tree = current;
                false
            }
        }
    }
}

impl NodeTree for MemoryDocument {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.nodes.get(&node).and_then(|data| data.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.tree
            .nodes
            .get(&node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    fn is_container(&self, node: NodeId) -> bool {
        self.meta(node).is_some_and(|meta| meta.is_container)
    }
}

impl DesignerDocument for MemoryDocument {
    fn contains_node(&self, node: NodeId) -> bool {
        self.tree.nodes.contains_key(&node)
    }

    fn selection(&self) -> &Selection<NodeId> {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Selection<NodeId> {
        &mut self.selection
    }

    fn remove_node(&mut self, node: NodeId) -> Result<(), DesignerError> {
        self.check_exists(node)?;
        if self.is_root(node) {
            return Err(DesignerError::RootDetach);
        }

        self.begin_change();
        let mut removed = Vec::new();
        self.collect_subtree(node, &mut removed);
        self.detach(node);
        for id in removed {
            self.tree.nodes.remove(&id);
        }
        self.prune_selection();
        Ok(())
    }

    fn insert_before(
        &mut self,
        container: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DesignerError> {
        self.move_node(container, node, reference, false)
    }

    fn insert_after(
        &mut self,
        container: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DesignerError> {
        self.move_node(container, node, reference, true)
    }

    fn insert_children(
        &mut self,
        target: NodeId,
        schemas: &[NodeSchema],
        index: Option<usize>,
    ) -> Result<Vec<NodeId>, DesignerError> {
        self.check_exists(target)?;
        if !self.is_container(target) {
            return Err(DesignerError::NotAContainer(target.to_string()));
        }
        if schemas.is_empty() {
            return Ok(Vec::new());
        }

        self.begin_change();
        let mut inserted = Vec::with_capacity(schemas.len());
        for (offset, schema) in schemas.iter().enumerate() {
            let id = self.build_subtree(schema, None);
            let position = match index {
                Some(index) => index + offset,
                None => self.children(target).len(),
            };
            self.attach(target, id, position)?;
            inserted.push(id);
        }

        tracing::debug!(container = %target, count = inserted.len(), "inserted children");
        Ok(inserted)
    }

    fn suitable_place(
        &self,
        container: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Option<Place<NodeId>> {
        let mut container = container;
        let mut reference = reference;
        loop {
            if self.accepts(container, node) {
                return Some(Place {
                    container,
                    reference,
                });
            }
            let parent = self.parent(container)?;
            reference = Some(container);
            container = parent;
        }
    }

    fn suitable_insertion(&self, schemas: &[NodeSchema]) -> Option<Insertion<NodeId>> {
        let root = self.tree.root?;
        let anchor = self
            .selection
            .nodes()
            .iter()
            .copied()
            .find(|node| self.contains_node(*node));

        let Some(anchor) = anchor.filter(|anchor| *anchor != root) else {
            return Some(Insertion {
                target: root,
                index: None,
            });
        };

        // Paste into a selected container when it takes the content,
        // otherwise right after the selected node.
        if self.is_container(anchor) && schemas.iter().any(|s| self.check_nesting_up(anchor, s)) {
            return Some(Insertion {
                target: anchor,
                index: None,
            });
        }

        let parent = self.parent(anchor)?;
        let index = self.index_in_parent(anchor)?;
        Some(Insertion {
            target: parent,
            index: Some(index + 1),
        })
    }

    fn check_nesting_up(&self, target: NodeId, schema: &NodeSchema) -> bool {
        let Some(target_name) = self.component(target) else {
            return false;
        };
        self.is_container(target)
            && self
                .components
                .get(&schema.component_name)
                .allows_parent(target_name)
    }

    fn export_schema(&self, node: NodeId) -> Option<NodeSchema> {
        let data = self.tree.nodes.get(&node)?;
        Some(NodeSchema {
            id: Some(node.to_string()),
            component_name: data.component.clone(),
            props: data.props.clone(),
            children: data
                .children
                .iter()
                .filter_map(|child| self.export_schema(*child))
                .collect(),
        })
    }

    fn can_perform_action(&self, node: NodeId, action: NodeAction) -> bool {
        if !self.contains_node(node) || self.is_root(node) {
            return false;
        }
        self.meta(node).is_some_and(|meta| meta.permits(action))
    }

    /// A zero step limit disables history.
    fn has_history(&self) -> bool {
        self.history.max_steps() > 0
    }

    fn history_back(&mut self) -> bool {
        self.swap_state(false)
    }

    fn history_forward(&mut self) -> bool {
        self.swap_state(true)
    }

    fn transact<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let outermost = self.batch.is_none();
        if outermost {
            self.batch = Some(Batch {
                before: self.tree.clone(),
                changed: false,
            });
        }

        let result = f(self);

        if outermost {
            if let Some(batch) = self.batch.take() {
                if batch.changed {
                    self.history.record(batch.before);
                }
            }
        }
        result
    }
}
