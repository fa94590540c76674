//! Dialog stack: overlay panels pushed onto a dedicated container.
//!
//! The container's child sequence *is* the stack: position encodes
//! stacking order, and only the most recently pushed panel is visible.
//! Popping hands the panel back to the caller, who keeps ownership and is
//! responsible for eventually freeing it.

use tracing::debug;

use crate::layout::{NodeId, WindowTree};

/// Push an overlay panel onto `container`.
///
/// The previously topmost panel (if any) is hidden, `panel` is appended
/// and shown. Silent no-op on stale handles. Callers reflow afterwards to
/// give the new panel geometry.
pub fn dialog_push(tree: &mut WindowTree, container: NodeId, panel: NodeId) {
    if !tree.contains(container) || !tree.contains(panel) {
        return;
    }

    if let Some(last) = tree.last_child(container) {
        tree.set_visible(last, false);
    }
    tree.add_child(container, panel);
    tree.set_visible(panel, true);
    debug!(?panel, "dialog pushed");
}

/// Pop the topmost overlay panel from `container`.
///
/// The panel is hidden and detached (not freed), and the panel below it
/// (if any) becomes visible again. Returns the popped panel so the caller
/// can reuse or free it; `None` if the container is empty or stale.
pub fn dialog_pop(tree: &mut WindowTree, container: NodeId) -> Option<NodeId> {
    let last = tree.last_child(container)?;

    tree.set_visible(last, false);
    tree.detach(last);
    if let Some(next) = tree.last_child(container) {
        tree.set_visible(next, true);
    }
    debug!(?last, "dialog popped");
    Some(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Orientation, SizePolicy, UNLIMITED};

    fn panel(tree: &mut WindowTree) -> NodeId {
        tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        )
    }

    #[test]
    fn test_push_hides_previous_top() {
        let mut tree = WindowTree::new();
        let container = panel(&mut tree);
        let a = panel(&mut tree);
        let b = panel(&mut tree);

        dialog_push(&mut tree, container, a);
        assert!(tree.is_visible(a));

        dialog_push(&mut tree, container, b);
        assert!(!tree.is_visible(a));
        assert!(tree.is_visible(b));
        assert_eq!(tree.children(container), &[a, b]);
    }

    #[test]
    fn test_pop_restores_previous_top() {
        let mut tree = WindowTree::new();
        let container = panel(&mut tree);
        let a = panel(&mut tree);
        let b = panel(&mut tree);
        dialog_push(&mut tree, container, a);
        dialog_push(&mut tree, container, b);

        assert_eq!(dialog_pop(&mut tree, container), Some(b));
        assert!(tree.is_visible(a));
        assert!(!tree.is_visible(b));
        // Popped panel is detached but still alive; the caller owns it.
        assert!(tree.contains(b));
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut tree = WindowTree::new();
        let container = panel(&mut tree);

        assert_eq!(dialog_pop(&mut tree, container), None);

        let a = panel(&mut tree);
        dialog_push(&mut tree, container, a);
        assert_eq!(dialog_pop(&mut tree, container), Some(a));
        assert_eq!(dialog_pop(&mut tree, container), None);
    }

    #[test]
    fn test_at_most_one_visible_child() {
        let mut tree = WindowTree::new();
        let container = panel(&mut tree);
        let panels: Vec<NodeId> = (0..4).map(|_| panel(&mut tree)).collect();
        for &p in &panels {
            dialog_push(&mut tree, container, p);
        }

        let visible: Vec<NodeId> = tree
            .children(container)
            .iter()
            .copied()
            .filter(|&p| tree.is_visible(p))
            .collect();
        assert_eq!(visible, vec![panels[3]]);
    }

    #[test]
    fn test_push_stale_is_noop() {
        let mut tree = WindowTree::new();
        let container = panel(&mut tree);
        let a = panel(&mut tree);
        tree.free(a);

        dialog_push(&mut tree, container, a);
        assert!(tree.children(container).is_empty());
    }
}
