//! Hotkey execution for designer documents.
//!
//! This module provides the `execute_hotkey` function that applies a
//! `HotkeyAction` to the host's current document. The logic is generic over
//! `DesignerHost` and `DesignerDocument`; every failure is a silent no-op for
//! the user and a log line for the developer.

use std::time::Duration;

use loom_designer_core::{
    ClipboardPayload, DesignerDocument, DesignerError, Insertion, NodeAction, NodeSchema, NodeTree,
    Place, next_for_select, prev_for_select,
};

use crate::actions::{HotkeyAction, KeydownResult};
use crate::host::DesignerHost;
use crate::keys::KeyEvent;

/// Execute a hotkey action against the host.
///
/// This is the central dispatch point for all builtin hotkeys. Returns
/// `PassThrough` when the event is not the designer's to handle (live
/// editing, form input, no document, no history) and `Handled` otherwise,
/// even if the action ends up changing nothing.
pub fn execute_hotkey<H: DesignerHost>(
    host: &mut H,
    action: HotkeyAction,
    event: &KeyEvent,
) -> KeydownResult {
    if host.is_live_editing() {
        tracing::debug!(%action, "live editing active, hotkey suppressed");
        return KeydownResult::PassThrough;
    }
    if event.is_form_event() || host.current_document().is_none() {
        tracing::debug!(%action, event_target = ?event.target, "hotkey not for the designer");
        return KeydownResult::PassThrough;
    }

    match action {
        HotkeyAction::Copy => {
            copy_selection(host, false);
            return KeydownResult::Handled;
        }
        HotkeyAction::Cut => {
            copy_selection(host, true);
            return KeydownResult::Handled;
        }
        // Data arrives with the platform paste event; see `paste_payload`.
        HotkeyAction::Paste => return KeydownResult::HandledAsync,
        _ => {}
    }

    let Some(doc) = host.current_document_mut() else {
        return KeydownResult::PassThrough;
    };

    match action {
        HotkeyAction::Delete => delete_selection(doc),
        HotkeyAction::ClearSelection => doc.clear_selection(),
        HotkeyAction::Undo | HotkeyAction::Redo => {
            if !doc.has_history() {
                return KeydownResult::PassThrough;
            }
            step_history(doc, action == HotkeyAction::Redo);
        }
        HotkeyAction::SelectPreviousSibling => select_sibling(doc, false),
        HotkeyAction::SelectNextSibling => select_sibling(doc, true),
        HotkeyAction::SelectPrevious => select_in_document(doc, false),
        HotkeyAction::SelectNext => select_in_document(doc, true),
        HotkeyAction::SwapWithPrevious => swap_with_sibling(doc, false),
        HotkeyAction::SwapWithNext => swap_with_sibling(doc, true),
        HotkeyAction::MoveUp => move_up(doc),
        HotkeyAction::MoveDown => move_down(doc),
        // Dispatched above.
        HotkeyAction::Copy | HotkeyAction::Cut | HotkeyAction::Paste => {}
    }

    KeydownResult::Handled
}

/// Insert a pasted payload at the document's suitable insertion point.
///
/// Items the target refuses to nest are dropped. The inserted nodes become
/// the selection and the first one is handed to the focus tracker after
/// `focus_delay`. Returns whether anything was inserted.
pub fn paste_payload<H: DesignerHost>(
    host: &mut H,
    payload: &ClipboardPayload,
    focus_delay: Duration,
) -> bool {
    let Some(doc) = host.current_document_mut() else {
        return false;
    };
    let tree = &payload.components_tree;
    if tree.is_empty() {
        return false;
    }

    let Some(Insertion { target, index }) = doc.suitable_insertion(tree) else {
        tracing::debug!("no insertion point for pasted nodes");
        return false;
    };

    let accepted: Vec<NodeSchema> = tree
        .iter()
        .filter(|schema| doc.check_nesting_up(target, schema))
        .cloned()
        .collect();
    if accepted.is_empty() {
        tracing::debug!(container = ?target, "insertion target refuses pasted nodes");
        return false;
    }

    let nodes = match doc.transact(|doc| doc.insert_children(target, &accepted, index)) {
        Ok(nodes) => nodes,
        Err(err) => {
            tracing::warn!(%err, "paste failed");
            return false;
        }
    };
    let Some(first) = nodes.first().copied() else {
        return false;
    };

    doc.select_all(&nodes);
    host.track_focus(first, focus_delay);
    true
}

fn copy_selection<H: DesignerHost>(host: &mut H, cut: bool) {
    let Some(doc) = host.current_document() else {
        return;
    };

    let selected: Vec<_> = doc
        .top_nodes(true)
        .into_iter()
        .filter(|node| doc.can_perform_action(*node, NodeAction::Copy))
        .collect();
    if selected.is_empty() {
        tracing::debug!("nothing copyable selected");
        return;
    }

    let components_tree = selected
        .iter()
        .filter_map(|node| doc.export_schema(*node))
        .collect();
    let payload = ClipboardPayload::new(components_tree);

    if let Err(err) = host.clipboard_mut().set_data(&payload) {
        // Keep the nodes when the copy did not land.
        tracing::warn!(%err, "failed to write clipboard");
        return;
    }
    tracing::debug!(count = selected.len(), cut, "copied nodes");

    if !cut {
        return;
    }
    let Some(doc) = host.current_document_mut() else {
        return;
    };
    doc.transact(|doc| {
        for node in selected {
            if let Some(parent) = doc.parent(node) {
                doc.select(parent);
            }
            if let Err(err) = doc.remove_node(node) {
                tracing::warn!(%err, ?node, "cut could not remove node");
            }
        }
    });
}

fn delete_selection<D: DesignerDocument>(doc: &mut D) {
    let top = doc.top_nodes(false);
    doc.transact(|doc| {
        for node in top {
            if !doc.can_perform_action(node, NodeAction::Remove) {
                tracing::debug!(?node, "node refuses removal");
                continue;
            }
            if let Err(err) = doc.remove_node(node) {
                tracing::warn!(%err, ?node, "failed to remove node");
            }
        }
    });
    doc.clear_selection();
}

/// Step history and keep the same nodes selected where they still exist.
fn step_history<D: DesignerDocument>(doc: &mut D, forward: bool) {
    let selected = doc.selection().nodes().to_vec();
    let stepped = if forward {
        doc.history_forward()
    } else {
        doc.history_back()
    };
    if !stepped {
        tracing::debug!(forward, "history exhausted");
    }
    doc.select_all(&selected);
}

fn first_top_node<D: DesignerDocument>(doc: &D) -> Option<D::Node> {
    let first = doc.top_nodes(true).first().copied();
    if first.is_none() {
        tracing::debug!("nothing selected");
    }
    first
}

fn select_sibling<D: DesignerDocument>(doc: &mut D, next: bool) {
    let Some(first) = first_top_node(doc) else {
        return;
    };
    let sibling = if next {
        doc.next_sibling(first)
    } else {
        doc.prev_sibling(first)
    };
    if let Some(sibling) = sibling {
        doc.select(sibling);
    }
}

fn select_in_document<D: DesignerDocument>(doc: &mut D, next: bool) {
    let Some(first) = first_top_node(doc) else {
        return;
    };
    let parent = doc.parent(first);
    let found = if next {
        next_for_select(&*doc, Some(first), true, parent)
    } else {
        prev_for_select(&*doc, Some(first), true, parent)
    };
    if let Some(found) = found {
        doc.select(found);
    }
}

/// The first selected node if it may be moved, with its parent.
fn movable_node<D: DesignerDocument>(doc: &D) -> Option<(D::Node, D::Node)> {
    let first = first_top_node(doc)?;
    if !doc.can_perform_action(first, NodeAction::Move) {
        tracing::debug!(node = ?first, "node refuses moving");
        return None;
    }
    let parent = doc.parent(first)?;
    Some((first, parent))
}

fn swap_with_sibling<D: DesignerDocument>(doc: &mut D, next: bool) {
    let Some((node, parent)) = movable_node(doc) else {
        return;
    };
    let result = if next {
        let Some(sibling) = doc.next_sibling(node) else {
            return;
        };
        doc.insert_after(parent, node, Some(sibling))
    } else {
        let Some(sibling) = doc.prev_sibling(node) else {
            return;
        };
        doc.insert_before(parent, node, Some(sibling))
    };
    finish_move(doc, node, result);
}

fn move_up<D: DesignerDocument>(doc: &mut D) {
    let Some((node, parent)) = movable_node(doc) else {
        return;
    };
    let result = match doc.prev_sibling(node) {
        // Enter the container above as its last child.
        Some(sibling) if enters(doc, sibling, node) => doc.insert_before(sibling, node, None),
        Some(sibling) => doc.insert_before(parent, node, Some(sibling)),
        None => {
            let Some(place) = place_above(doc, parent, node) else {
                tracing::debug!(?node, "no place above the parent");
                return;
            };
            doc.insert_before(place.container, node, place.reference)
        }
    };
    finish_move(doc, node, result);
}

fn move_down<D: DesignerDocument>(doc: &mut D) {
    let Some((node, parent)) = movable_node(doc) else {
        return;
    };
    let result = match doc.next_sibling(node) {
        // Enter the container below as its first child.
        Some(sibling) if enters(doc, sibling, node) => doc.insert_after(sibling, node, None),
        Some(sibling) => doc.insert_after(parent, node, Some(sibling)),
        None => {
            let Some(place) = place_above(doc, parent, node) else {
                tracing::debug!(?node, "no place above the parent");
                return;
            };
            doc.insert_after(place.container, node, place.reference)
        }
    };
    finish_move(doc, node, result);
}

/// Whether `node` can move directly into the container `sibling`.
fn enters<D: DesignerDocument>(doc: &D, sibling: D::Node, node: D::Node) -> bool {
    doc.is_container(sibling)
        && doc
            .suitable_place(sibling, node, None)
            .is_some_and(|place| place.container == sibling)
}

/// Suitable place for `node` outside `parent`, next to the ancestor it leaves.
fn place_above<D: DesignerDocument>(
    doc: &D,
    parent: D::Node,
    node: D::Node,
) -> Option<Place<D::Node>> {
    let grandparent = doc.parent(parent)?;
    doc.suitable_place(grandparent, node, Some(parent))
}

fn finish_move<D: DesignerDocument>(
    doc: &mut D,
    node: D::Node,
    result: Result<(), DesignerError>,
) {
    match result {
        Ok(()) => doc.select(node),
        Err(err) => tracing::warn!(%err, ?node, "failed to move node"),
    }
}
