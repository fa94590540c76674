//! The window tree: an arena of nodes with ordered, owned children.
//!
//! The tree owns every node. Collaborators hold [`NodeId`] handles, which
//! are generational keys: freeing a subtree invalidates the keys of every
//! node in it, and a stale key turns any operation into a silent no-op
//! rather than a fault. Child order is semantically meaningful: it is the
//! layout order and the dialog stacking order.

use std::fmt::Write as _;

use slotmap::SlotMap;

use super::node::{Node, NodeId, Orientation, SizePolicy, WindowState};

/// An arena-backed tree of windows.
#[derive(Debug, Default)]
pub struct WindowTree {
    nodes: SlotMap<NodeId, Node>,
}

impl WindowTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live windows.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no windows.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `id` refers to a live window.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Create a new window.
    ///
    /// The window starts visible, with zeroed geometry, no parent and no
    /// children. `rows`/`cols` may be [`UNLIMITED`](super::UNLIMITED).
    pub fn create(
        &mut self,
        orientation: Orientation,
        policy: SizePolicy,
        rows: u16,
        cols: u16,
    ) -> NodeId {
        self.nodes.insert(Node::new(orientation, policy, rows, cols))
    }

    /// Attach a diagnostic label to a window.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = Some(label.into());
        }
    }

    /// A window's diagnostic label, if any.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id)?.label.as_deref()
    }

    /// Append `child` to `parent`'s child sequence and set the
    /// back-reference.
    ///
    /// Silent no-op on stale handles or `parent == child`. Never triggers
    /// a reflow.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Splice `child` out of its parent's child sequence and clear the
    /// back-reference. Silent no-op on a stale or parentless handle.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    /// Move `child` to the tail of `parent`'s child sequence, preserving
    /// the order of the other children.
    pub fn move_to_tail(&mut self, parent: NodeId, child: NodeId) {
        let Some(p) = self.nodes.get_mut(parent) else {
            return;
        };
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return;
        };
        let id = p.children.remove(pos);
        p.children.push(id);
    }

    /// Free a window and its whole subtree, depth-first.
    ///
    /// Does NOT splice the window out of a surviving parent's child
    /// sequence; detach it first if the parent outlives it. Stale child
    /// entries left behind are skipped by every traversal.
    pub fn free(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        for child in node.children {
            self.free(child);
        }
    }

    /// Copy computed geometry (rows, cols, offsets, but not visibility) from
    /// `src` to `dst`.
    pub fn copy_size(&mut self, src: NodeId, dst: NodeId) {
        let Some(state) = self.nodes.get(src).map(|n| n.state) else {
            return;
        };
        if let Some(d) = self.nodes.get_mut(dst) {
            d.state.rows = state.rows;
            d.state.cols = state.cols;
            d.state.row_offset = state.row_offset;
            d.state.col_offset = state.col_offset;
        }
    }

    /// A window's computed state.
    pub fn state(&self, id: NodeId) -> Option<WindowState> {
        self.nodes.get(id).map(|n| n.state)
    }

    /// A window's state as of the previous reflow.
    pub fn previous(&self, id: NodeId) -> Option<WindowState> {
        self.nodes.get(id).map(|n| n.previous)
    }

    /// Show or hide a window. Takes effect at the next reflow.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.state.visible = visible;
        }
    }

    /// Whether a window is visible. Stale handles are invisible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.state.visible)
    }

    /// Replace a window's size request.
    pub fn set_requested(&mut self, id: NodeId, rows: u16, cols: u16) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.req_rows = rows;
            node.req_cols = cols;
        }
    }

    /// A window's size request as `(rows, cols)`.
    pub fn requested(&self, id: NodeId) -> Option<(u16, u16)> {
        self.nodes.get(id).map(|n| (n.req_rows, n.req_cols))
    }

    /// Replace a window's size policy.
    pub fn set_policy(&mut self, id: NodeId, policy: SizePolicy) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.policy = policy;
        }
    }

    /// A window's size policy.
    pub fn policy(&self, id: NodeId) -> Option<SizePolicy> {
        self.nodes.get(id).map(|n| n.policy)
    }

    /// A window's orientation.
    pub fn orientation(&self, id: NodeId) -> Option<Orientation> {
        self.nodes.get(id).map(|n| n.orientation)
    }

    /// Overwrite a window's computed geometry directly.
    ///
    /// Meant for whoever owns the screen: set the root's budget from the
    /// terminal size before reflowing.
    pub fn set_geometry(&mut self, id: NodeId, rows: u16, cols: u16, row_offset: u16, col_offset: u16) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.state.rows = rows;
            node.state.cols = cols;
            node.state.row_offset = row_offset;
            node.state.col_offset = col_offset;
        }
    }

    /// A window's parent, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// A window's children, in layout order. Empty for stale handles.
    ///
    /// May contain stale entries after a free-without-detach; traversals
    /// validate each entry.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The first live child of `parent`.
    pub fn first_child(&self, parent: NodeId) -> Option<NodeId> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.contains(c))
    }

    /// The last live child of `parent`.
    pub fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .rev()
            .copied()
            .find(|&c| self.contains(c))
    }

    /// Recursive dump of the visible geometry, for debugging.
    ///
    /// One line per visible window, indented by depth. An invisible window
    /// gates its entire subtree out of the dump, mirroring how invisible
    /// containers are never allocated space.
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.state.visible {
            return;
        }
        let label = node.label.as_deref().unwrap_or("window");
        let state = &node.state;
        let _ = writeln!(
            out,
            "{:indent$}{label} ({},{}) {}x{}",
            "",
            state.row_offset,
            state.col_offset,
            state.rows,
            state.cols,
            indent = depth * 2
        );
        for &child in &node.children {
            self.dump_into(child, depth + 1, out);
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }
}
