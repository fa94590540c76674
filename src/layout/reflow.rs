//! Reflow: recompute geometry for every visible window in a subtree.
//!
//! Allocation is two-phase per node. Minimise windows are measured
//! bottom-up first, because their footprint depends on their contents;
//! Fixed and Maximise siblings are then resolved against the remaining
//! budget, and offsets are assigned top-down in child order. All
//! arithmetic saturates, so a window can be squeezed to zero but never below.

use tracing::debug;

use super::node::{NodeId, Orientation, SizePolicy, UNLIMITED};
use super::tree::WindowTree;

/// Recompute `state` for every visible descendant of `root`.
///
/// `root`'s own geometry is the budget: whoever owns the screen sets it
/// (typically on terminal resize) and this pass never modifies it. Before
/// a window's state is recomputed, its `previous` state is overwritten
/// with the outgoing one so collaborators can diff after the pass.
///
/// Invisible windows are skipped entirely: they are allocated nothing,
/// their subtrees are not visited, and their state is left untouched.
pub fn reflow(tree: &mut WindowTree, root: NodeId) {
    let Some(node) = tree.node(root) else {
        return;
    };
    debug!(
        rows = node.state.rows,
        cols = node.state.cols,
        "reflow"
    );
    if !node.state.visible {
        return;
    }
    if let Some(node) = tree.node_mut(root) {
        node.previous = node.state;
    }
    layout_children(tree, root);
}

fn layout_children(tree: &mut WindowTree, id: NodeId) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let orientation = node.orientation;
    let state = node.state;

    let kids: Vec<NodeId> = node
        .children
        .iter()
        .copied()
        .filter(|&c| tree.node(c).is_some_and(|n| n.state.visible))
        .collect();
    if kids.is_empty() {
        return;
    }

    let budget = match orientation {
        Orientation::Vertical => state.rows,
        Orientation::Horizontal => state.cols,
    };

    // First pass: Fixed and Minimise children claim space in child order.
    // An UNLIMITED request resolves to the remaining budget at its point
    // in the iteration, so a sole Fixed consumer takes everything.
    let mut remaining = budget;
    let mut extents = vec![0_u16; kids.len()];
    let mut maximise = Vec::new();
    for (i, &child) in kids.iter().enumerate() {
        let Some(c) = tree.node(child) else {
            continue;
        };
        match c.policy {
            SizePolicy::Fixed => {
                let req = match orientation {
                    Orientation::Vertical => c.req_rows,
                    Orientation::Horizontal => c.req_cols,
                };
                extents[i] = req.min(remaining);
                remaining -= extents[i];
            }
            SizePolicy::Minimise => {
                let (rows, cols) = measure(tree, child);
                let want = match orientation {
                    Orientation::Vertical => rows,
                    Orientation::Horizontal => cols,
                };
                extents[i] = want.min(remaining);
                remaining -= extents[i];
            }
            SizePolicy::Maximise => maximise.push(i),
        }
    }

    // Second pass: what is left splits evenly among Maximise children,
    // the last one absorbing the division remainder.
    if !maximise.is_empty() {
        let count = u16::try_from(maximise.len()).unwrap_or(u16::MAX);
        let share = remaining / count;
        for (n, &i) in maximise.iter().enumerate() {
            extents[i] = if n + 1 == maximise.len() {
                remaining - share * (count - 1)
            } else {
                share
            };
        }
    }

    // Offsets: contiguous along the orientation axis starting at the
    // parent's own offset; the cross axis is inherited unchanged.
    let mut cursor = match orientation {
        Orientation::Vertical => state.row_offset,
        Orientation::Horizontal => state.col_offset,
    };
    for (i, &child) in kids.iter().enumerate() {
        if let Some(c) = tree.node_mut(child) {
            c.previous = c.state;
            match orientation {
                Orientation::Vertical => {
                    c.state.rows = extents[i];
                    c.state.cols = state.cols;
                    c.state.row_offset = cursor;
                    c.state.col_offset = state.col_offset;
                }
                Orientation::Horizontal => {
                    c.state.cols = extents[i];
                    c.state.rows = state.rows;
                    c.state.col_offset = cursor;
                    c.state.row_offset = state.row_offset;
                }
            }
            cursor = cursor.saturating_add(extents[i]);
        }
        layout_children(tree, child);
    }
}

/// Intrinsic `(rows, cols)` of a window whose size derives from its
/// children.
///
/// Along the window's own orientation the extents of its visible children
/// sum; on the cross axis the largest child wins. Maximise children and
/// UNLIMITED requests contribute nothing to an intrinsic measure; there
/// is no outer budget to resolve them against.
fn measure(tree: &WindowTree, id: NodeId) -> (u16, u16) {
    let Some(node) = tree.node(id) else {
        return (0, 0);
    };

    let mut along: u16 = 0;
    let mut cross: u16 = 0;
    for &child in &node.children {
        let Some(c) = tree.node(child) else {
            continue;
        };
        if !c.state.visible {
            continue;
        }
        let (rows, cols) = match c.policy {
            SizePolicy::Fixed => (bounded(c.req_rows), bounded(c.req_cols)),
            SizePolicy::Maximise => (0, 0),
            SizePolicy::Minimise => measure(tree, child),
        };
        match node.orientation {
            Orientation::Vertical => {
                along = along.saturating_add(rows);
                cross = cross.max(cols);
            }
            Orientation::Horizontal => {
                along = along.saturating_add(cols);
                cross = cross.max(rows);
            }
        }
    }

    match node.orientation {
        Orientation::Vertical => (along, cross),
        Orientation::Horizontal => (cross, along),
    }
}

const fn bounded(req: u16) -> u16 {
    if req == UNLIMITED {
        0
    } else {
        req
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WindowTree;

    fn vertical(tree: &mut WindowTree, policy: SizePolicy, rows: u16) -> NodeId {
        tree.create(Orientation::Vertical, policy, rows, UNLIMITED)
    }

    fn root_24x80(tree: &mut WindowTree) -> NodeId {
        let root = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        tree.set_geometry(root, 24, 80, 0, 0);
        root
    }

    #[test]
    fn test_fixed_maximise_fixed() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let a = vertical(&mut tree, SizePolicy::Fixed, 1);
        let b = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        let c = vertical(&mut tree, SizePolicy::Fixed, 1);
        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.add_child(root, c);

        reflow(&mut tree, root);

        let sa = tree.state(a).expect("live");
        let sb = tree.state(b).expect("live");
        let sc = tree.state(c).expect("live");
        assert_eq!((sa.rows, sa.row_offset), (1, 0));
        assert_eq!((sb.rows, sb.row_offset), (22, 1));
        assert_eq!((sc.rows, sc.row_offset), (1, 23));
        assert_eq!(sa.cols, 80);
        assert_eq!(sb.cols, 80);
        assert_eq!(sc.cols, 80);
    }

    #[test]
    fn test_offsets_contiguous() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let kids: Vec<NodeId> = (0..4)
            .map(|_| vertical(&mut tree, SizePolicy::Fixed, 5))
            .collect();
        for &k in &kids {
            tree.add_child(root, k);
        }

        reflow(&mut tree, root);

        for pair in kids.windows(2) {
            let prev = tree.state(pair[0]).expect("live");
            let next = tree.state(pair[1]).expect("live");
            assert_eq!(next.row_offset, prev.row_offset + prev.rows);
        }
    }

    #[test]
    fn test_sole_unlimited_fixed_takes_all() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let only = vertical(&mut tree, SizePolicy::Fixed, UNLIMITED);
        tree.add_child(root, only);

        reflow(&mut tree, root);

        assert_eq!(tree.state(only).expect("live").rows, 24);
    }

    #[test]
    fn test_fixed_overflow_clamps_to_zero() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let big = vertical(&mut tree, SizePolicy::Fixed, 30);
        let late = vertical(&mut tree, SizePolicy::Fixed, 5);
        tree.add_child(root, big);
        tree.add_child(root, late);

        reflow(&mut tree, root);

        assert_eq!(tree.state(big).expect("live").rows, 24);
        assert_eq!(tree.state(late).expect("live").rows, 0);
        assert_eq!(tree.state(late).expect("live").row_offset, 24);
    }

    #[test]
    fn test_two_maximise_split_last_gets_remainder() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let bar = vertical(&mut tree, SizePolicy::Fixed, 1);
        let first = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        let second = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        tree.add_child(root, bar);
        tree.add_child(root, first);
        tree.add_child(root, second);

        reflow(&mut tree, root);

        // 23 rows left: 11 + 12, the tail absorbs the odd row.
        assert_eq!(tree.state(first).expect("live").rows, 11);
        assert_eq!(tree.state(second).expect("live").rows, 12);
        assert_eq!(tree.state(second).expect("live").row_offset, 12);
    }

    #[test]
    fn test_horizontal_transposes_axes() {
        let mut tree = WindowTree::new();
        let root = tree.create(
            Orientation::Horizontal,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        tree.set_geometry(root, 24, 80, 0, 0);
        let side = tree.create(Orientation::Horizontal, SizePolicy::Fixed, UNLIMITED, 20);
        let rest = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        tree.add_child(root, side);
        tree.add_child(root, rest);

        reflow(&mut tree, root);

        let ss = tree.state(side).expect("live");
        let sr = tree.state(rest).expect("live");
        assert_eq!((ss.cols, ss.rows, ss.col_offset), (20, 24, 0));
        assert_eq!((sr.cols, sr.rows, sr.col_offset), (60, 24, 20));
    }

    #[test]
    fn test_invisible_children_contribute_zero() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let hidden = vertical(&mut tree, SizePolicy::Fixed, 10);
        let shown = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        tree.add_child(root, hidden);
        tree.add_child(root, shown);
        tree.set_visible(hidden, false);

        reflow(&mut tree, root);

        assert_eq!(tree.state(shown).expect("live").rows, 24);
        assert_eq!(tree.state(shown).expect("live").row_offset, 0);
        // Hidden window untouched.
        assert_eq!(tree.state(hidden).expect("live").rows, 0);
    }

    #[test]
    fn test_minimise_sums_visible_children() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let panel = vertical(&mut tree, SizePolicy::Minimise, UNLIMITED);
        let rest = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        let one = vertical(&mut tree, SizePolicy::Fixed, 6);
        let two = vertical(&mut tree, SizePolicy::Fixed, 1);
        tree.add_child(root, panel);
        tree.add_child(root, rest);
        tree.add_child(panel, one);
        tree.add_child(panel, two);

        reflow(&mut tree, root);

        assert_eq!(tree.state(panel).expect("live").rows, 7);
        assert_eq!(tree.state(rest).expect("live").rows, 17);
        assert_eq!(tree.state(rest).expect("live").row_offset, 7);
        // The panel's interior is laid out against its clamped size.
        assert_eq!(tree.state(one).expect("live").rows, 6);
        assert_eq!(tree.state(two).expect("live").row_offset, 6);
    }

    #[test]
    fn test_minimise_clamped_by_budget() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let panel = vertical(&mut tree, SizePolicy::Minimise, UNLIMITED);
        let big = vertical(&mut tree, SizePolicy::Fixed, 40);
        tree.add_child(root, panel);
        tree.add_child(panel, big);

        reflow(&mut tree, root);

        assert_eq!(tree.state(panel).expect("live").rows, 24);
        assert_eq!(tree.state(big).expect("live").rows, 24);
    }

    #[test]
    fn test_zero_budget_yields_zero_sizes() {
        let mut tree = WindowTree::new();
        let root = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let a = vertical(&mut tree, SizePolicy::Fixed, 3);
        let b = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        tree.add_child(root, a);
        tree.add_child(root, b);

        reflow(&mut tree, root);

        assert_eq!(tree.state(a).expect("live").rows, 0);
        assert_eq!(tree.state(b).expect("live").rows, 0);
    }

    #[test]
    fn test_reflow_is_idempotent() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let a = vertical(&mut tree, SizePolicy::Fixed, 1);
        let b = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        tree.add_child(root, a);
        tree.add_child(root, b);

        reflow(&mut tree, root);
        let first = (tree.state(a), tree.state(b));
        reflow(&mut tree, root);
        let second = (tree.state(a), tree.state(b));

        assert_eq!(first, second);
    }

    #[test]
    fn test_previous_state_snapshot() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        let a = vertical(&mut tree, SizePolicy::Maximise, UNLIMITED);
        tree.add_child(root, a);

        reflow(&mut tree, root);
        let before = tree.state(a).expect("live");

        tree.set_geometry(root, 30, 80, 0, 0);
        reflow(&mut tree, root);

        assert_eq!(tree.previous(a).expect("live"), before);
        assert_eq!(tree.state(a).expect("live").rows, 30);
    }

    #[test]
    fn test_reflow_stale_root_is_noop() {
        let mut tree = WindowTree::new();
        let root = root_24x80(&mut tree);
        tree.free(root);
        reflow(&mut tree, root);
        assert!(tree.is_empty());
    }
}
