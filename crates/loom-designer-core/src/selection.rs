//! Node selection state.

use crate::tree::NodeTree;

/// Ordered set of selected nodes.
///
/// Keeps insertion order so "the first selected node" is stable for the
/// keyboard handlers that act on a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<N> {
    selected: Vec<N>,
}

impl<N> Default for Selection<N> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
        }
    }
}

impl<N: Copy + Eq> Selection<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single node.
    pub fn select(&mut self, node: N) {
        self.selected.clear();
        self.selected.push(node);
    }

    /// Add a node, keeping existing selection.
    pub fn add(&mut self, node: N) {
        if !self.contains(node) {
            self.selected.push(node);
        }
    }

    pub fn remove(&mut self, node: N) {
        self.selected.retain(|n| *n != node);
    }

    /// Replace the selection with `nodes`, dropping duplicates.
    pub fn select_all(&mut self, nodes: impl IntoIterator<Item = N>) {
        self.selected.clear();
        for node in nodes {
            self.add(node);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn retain(&mut self, keep: impl FnMut(&N) -> bool) {
        self.selected.retain(keep);
    }

    pub fn contains(&self, node: N) -> bool {
        self.selected.contains(&node)
    }

    pub fn nodes(&self) -> &[N] {
        &self.selected
    }

    pub fn first(&self) -> Option<N> {
        self.selected.first().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected nodes that have no selected ancestor, in selection order.
    ///
    /// The root is skipped unless `include_root` is set; a skipped root does
    /// not shadow its selected descendants.
    pub fn top_nodes<T>(&self, tree: &T, include_root: bool) -> Vec<N>
    where
        T: NodeTree<Node = N> + ?Sized,
    {
        self.selected
            .iter()
            .copied()
            .filter(|node| include_root || !tree.is_root(*node))
            .filter(|node| !self.has_selected_ancestor(tree, *node, include_root))
            .collect()
    }

    fn has_selected_ancestor<T>(&self, tree: &T, node: N, include_root: bool) -> bool
    where
        T: NodeTree<Node = N> + ?Sized,
    {
        let mut current = tree.parent(node);
        while let Some(ancestor) = current {
            if self.contains(ancestor) && (include_root || !tree.is_root(ancestor)) {
                return true;
            }
            current = tree.parent(ancestor);
        }
        false
    }
}
