//! Structural tree access.
//!
//! The `NodeTree` trait is the minimal capability set the designer needs from
//! a node tree: parent, ordered children and container-ness. Sibling and
//! ancestry queries are provided on top of those.

use std::fmt;
use std::hash::Hash;

/// Read-only structural view of a rooted node tree.
///
/// Nodes are cheap `Copy` handles; the tree owns the node data. Implementations
/// must keep the parent/children relation consistent and acyclic.
pub trait NodeTree {
    /// Handle type identifying a node in this tree.
    type Node: Copy + Eq + Hash + fmt::Debug;

    /// Parent of `node`, or `None` for the root (or an unknown node).
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Ordered children of `node`. Empty for leaves and unknown nodes.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Whether `node` may hold children.
    fn is_container(&self, node: Self::Node) -> bool;

    /// Position of `node` among its parent's children.
    fn index_in_parent(&self, node: Self::Node) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|child| *child == node)
    }

    /// The sibling right before `node`.
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let index = self.index_in_parent(node)?;
        index
            .checked_sub(1)
            .and_then(|prev| self.children(parent).get(prev).copied())
    }

    /// The sibling right after `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let index = self.index_in_parent(node)?;
        self.children(parent).get(index + 1).copied()
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.children(node).first().copied()
    }

    fn last_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.children(node).last().copied()
    }

    fn is_root(&self, node: Self::Node) -> bool {
        self.parent(node).is_none()
    }

    /// Whether `node` is `ancestor` or lies somewhere below it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }
}
