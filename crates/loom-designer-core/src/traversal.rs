//! Document-order traversal for arrow-key selection movement.
//!
//! Walks the tree in pre-order so Up/Down move the selection across the whole
//! visual tree rather than only among immediate siblings. Both directions are a
//! pure function of the tree and the starting point.

use crate::tree::NodeTree;

/// Find the next node in document order.
///
/// `is_head` marks the call made for the originally selected node: the head
/// node itself is never returned, its first child (for non-empty containers)
/// or next sibling is. A non-head `node` is a valid stop and is returned as is.
/// When nothing is found, the walk continues with `parent`'s next sibling,
/// ascending one level at a time.
pub fn next_for_select<T: NodeTree + ?Sized>(
    tree: &T,
    node: Option<T::Node>,
    is_head: bool,
    parent: Option<T::Node>,
) -> Option<T::Node> {
    if let Some(node) = node {
        if !is_head {
            return Some(node);
        }

        let first_child = if tree.is_container(node) {
            tree.first_child(node)
        } else {
            None
        };
        if let Some(found) = first_child.or_else(|| tree.next_sibling(node)) {
            return Some(found);
        }
    }

    let mut parent = parent;
    while let Some(ancestor) = parent {
        if let Some(sibling) = tree.next_sibling(ancestor) {
            return Some(sibling);
        }
        parent = tree.parent(ancestor);
    }

    None
}

/// Find the previous node in document order.
///
/// A non-head `node` resolves to its deepest last descendant (or itself).
/// The head node resolves to its previous sibling's deepest last descendant.
/// With no previous sibling, the previous node is `parent` itself.
pub fn prev_for_select<T: NodeTree + ?Sized>(
    tree: &T,
    node: Option<T::Node>,
    is_head: bool,
    parent: Option<T::Node>,
) -> Option<T::Node> {
    if let Some(node) = node {
        if !is_head {
            return Some(deepest_last_descendant(tree, node));
        }
        if let Some(prev) = tree.prev_sibling(node) {
            return Some(deepest_last_descendant(tree, prev));
        }
    }

    parent
}

/// Next node after `node` in document order, starting a fresh walk.
pub fn next_in_document<T: NodeTree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    next_for_select(tree, Some(node), true, tree.parent(node))
}

/// Previous node before `node` in document order, starting a fresh walk.
pub fn prev_in_document<T: NodeTree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    prev_for_select(tree, Some(node), true, tree.parent(node))
}

fn deepest_last_descendant<T: NodeTree + ?Sized>(tree: &T, node: T::Node) -> T::Node {
    let mut current = node;
    while tree.is_container(current) {
        match tree.last_child(current) {
            Some(last) => current = last,
            None => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Minimal index-based tree; node `0` is the root.
    struct FakeTree {
        names: Vec<&'static str>,
        parents: Vec<Option<usize>>,
        children: Vec<Vec<usize>>,
        containers: Vec<bool>,
    }

    impl FakeTree {
        fn root(name: &'static str) -> Self {
            Self {
                names: vec![name],
                parents: vec![None],
                children: vec![Vec::new()],
                containers: vec![true],
            }
        }

        fn add(&mut self, parent: usize, name: &'static str, container: bool) -> usize {
            let id = self.names.len();
            self.names.push(name);
            self.parents.push(Some(parent));
            self.children.push(Vec::new());
            self.containers.push(container);
            self.children[parent].push(id);
            id
        }

        fn name(&self, node: Option<usize>) -> Option<&'static str> {
            node.map(|n| self.names[n])
        }
    }

    impl NodeTree for FakeTree {
        type Node = usize;

        fn parent(&self, node: usize) -> Option<usize> {
            self.parents.get(node).copied().flatten()
        }

        fn children(&self, node: usize) -> &[usize] {
            self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
        }

        fn is_container(&self, node: usize) -> bool {
            self.containers.get(node).copied().unwrap_or(false)
        }
    }

    /// A[B, C[D]]
    fn abcd() -> (FakeTree, usize, usize, usize) {
        let mut tree = FakeTree::root("A");
        let b = tree.add(0, "B", false);
        let c = tree.add(0, "C", true);
        let d = tree.add(c, "D", false);
        (tree, b, c, d)
    }

    #[test]
    fn test_next_from_leaf_moves_to_sibling() {
        let (tree, b, ..) = abcd();
        assert_eq!(tree.name(next_in_document(&tree, b)), Some("C"));
    }

    #[test]
    fn test_next_descends_into_container() {
        let (tree, _, c, _) = abcd();
        assert_eq!(tree.name(next_in_document(&tree, c)), Some("D"));
    }

    #[test]
    fn test_next_at_end_of_tree_is_none() {
        let (tree, _, _, d) = abcd();
        assert_eq!(next_in_document(&tree, d), None);
    }

    #[test]
    fn test_next_ascends_to_ancestor_sibling() {
        // Page[Section[Row[Cell]], Footer]
        let mut tree = FakeTree::root("Page");
        let section = tree.add(0, "Section", true);
        let row = tree.add(section, "Row", true);
        let cell = tree.add(row, "Cell", false);
        tree.add(0, "Footer", false);

        assert_eq!(tree.name(next_in_document(&tree, cell)), Some("Footer"));
    }

    #[test]
    fn test_next_non_head_returns_node_itself() {
        let (tree, b, ..) = abcd();
        assert_eq!(next_for_select(&tree, Some(b), false, None), Some(b));
    }

    #[test]
    fn test_prev_without_sibling_lands_on_parent() {
        let (tree, _, c, d) = abcd();
        assert_eq!(prev_in_document(&tree, d), Some(c));
    }

    #[test]
    fn test_prev_continuation_is_valid_stop() {
        let (tree, _, _, d) = abcd();
        assert_eq!(prev_for_select(&tree, Some(d), false, None), Some(d));
    }

    #[test]
    fn test_prev_moves_to_leaf_sibling() {
        let (tree, b, c, _) = abcd();
        assert_eq!(prev_in_document(&tree, c), Some(b));
    }

    #[test]
    fn test_prev_lands_on_deepest_last_descendant() {
        // A[B[E[F, G]], C]
        let mut tree = FakeTree::root("A");
        let b = tree.add(0, "B", true);
        let e = tree.add(b, "E", true);
        tree.add(e, "F", false);
        tree.add(e, "G", false);
        let c = tree.add(0, "C", false);

        assert_eq!(tree.name(prev_in_document(&tree, c)), Some("G"));
    }

    #[test]
    fn test_root_alone_has_no_neighbours() {
        let tree = FakeTree::root("A");
        assert_eq!(next_in_document(&tree, 0), None);
        assert_eq!(prev_in_document(&tree, 0), None);
    }

    #[test]
    fn test_empty_container_is_a_leaf() {
        // A[B(empty container), C]
        let mut tree = FakeTree::root("A");
        let b = tree.add(0, "B", true);
        let c = tree.add(0, "C", false);

        assert_eq!(next_in_document(&tree, b), Some(c));
        assert_eq!(prev_in_document(&tree, c), Some(b));
    }

    fn sample_tree() -> FakeTree {
        // Page[Header, Body[Empty, Card[Title, Text]], Footer]
        let mut tree = FakeTree::root("Page");
        tree.add(0, "Header", false);
        let body = tree.add(0, "Body", true);
        tree.add(body, "Empty", true);
        let card = tree.add(body, "Card", true);
        tree.add(card, "Title", false);
        tree.add(card, "Text", false);
        tree.add(0, "Footer", false);
        tree
    }

    #[test]
    fn test_walk_down_visits_document_order() {
        let tree = sample_tree();
        let mut order = vec![tree.names[0]];
        let mut visited = HashSet::from([0]);
        let mut current = 0;
        while let Some(next) = next_in_document(&tree, current) {
            assert!(visited.insert(next), "node revisited: {}", tree.names[next]);
            order.push(tree.names[next]);
            current = next;
        }

        insta::assert_yaml_snapshot!(order, @r"
        - Page
        - Header
        - Body
        - Empty
        - Card
        - Title
        - Text
        - Footer
        ");
    }

    #[test]
    fn test_walk_up_reverses_walk_down() {
        let tree = sample_tree();
        let mut down = vec![0];
        while let Some(next) = next_in_document(&tree, *down.last().unwrap()) {
            down.push(next);
        }

        let mut up = vec![*down.last().unwrap()];
        while let Some(prev) = prev_in_document(&tree, *up.last().unwrap()) {
            assert!(up.len() <= tree.names.len(), "walk did not terminate");
            up.push(prev);
        }
        up.reverse();

        assert_eq!(up, down);
    }
}
