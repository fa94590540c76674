//! Layout context: the process-wide window tree and its well-known
//! windows.
//!
//! One context is created at startup and owns everything: the tree, the
//! named handles collaborators read geometry from, and the reflow
//! triggers. Dropping the context tears the whole tree down.

use tracing::debug;

use crate::dialog::{dialog_pop, dialog_push};
use crate::layout::{
    apply_screen_policy, reflow, NodeId, Orientation, ScreenConfig, ScreenHandles, SizePolicy,
    WindowTree, UNLIMITED,
};

/// Owner of the window tree and the named windows every collaborator
/// uses.
///
/// The canonical screen is built once, at construction:
///
/// ```text
/// root
/// ├── dialogs            (overlay stack)
/// │   └── screen         (base panel)
/// │       ├── help       (1 row)
/// │       └── middle     (horizontal)
/// │           ├── sidebar
/// │           └── work
/// │               ├── content panel: content + status (1 row)
/// │               └── preview panel: preview + bar (1 row)
/// └── message            (1 row)
/// ```
#[derive(Debug)]
pub struct LayoutContext {
    tree: WindowTree,
    handles: ScreenHandles,
}

impl LayoutContext {
    /// Build the canonical screen tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&ScreenConfig::default())
    }

    /// Build the canonical screen tree and immediately apply `config`.
    pub fn with_config(config: &ScreenConfig) -> Self {
        let mut tree = WindowTree::new();

        let root = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let dialogs = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let message = tree.create(Orientation::Vertical, SizePolicy::Fixed, 1, UNLIMITED);
        tree.add_child(root, dialogs);
        tree.add_child(root, message);

        let screen = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let help = tree.create(Orientation::Vertical, SizePolicy::Fixed, 1, UNLIMITED);
        let middle = tree.create(
            Orientation::Horizontal,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let sidebar = tree.create(Orientation::Horizontal, SizePolicy::Fixed, UNLIMITED, 20);
        let work = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let content_panel = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let content = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let status = tree.create(Orientation::Vertical, SizePolicy::Fixed, 1, UNLIMITED);
        let preview_panel = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let preview = tree.create(
            Orientation::Vertical,
            SizePolicy::Maximise,
            UNLIMITED,
            UNLIMITED,
        );
        let preview_bar = tree.create(Orientation::Vertical, SizePolicy::Fixed, 1, UNLIMITED);

        tree.add_child(screen, help);
        tree.add_child(screen, middle);
        tree.add_child(middle, sidebar);
        tree.add_child(middle, work);
        tree.add_child(work, content_panel);
        tree.add_child(work, preview_panel);
        tree.add_child(content_panel, content);
        tree.add_child(content_panel, status);
        tree.add_child(preview_panel, preview);
        tree.add_child(preview_panel, preview_bar);

        for (id, label) in [
            (root, "root"),
            (dialogs, "dialogs"),
            (message, "message"),
            (screen, "screen"),
            (help, "help"),
            (middle, "middle"),
            (sidebar, "sidebar"),
            (work, "work"),
            (content_panel, "content-panel"),
            (content, "content"),
            (status, "status"),
            (preview_panel, "preview-panel"),
            (preview, "preview"),
            (preview_bar, "preview-bar"),
        ] {
            tree.set_label(id, label);
        }

        dialog_push(&mut tree, dialogs, screen);

        let handles = ScreenHandles {
            root,
            dialogs,
            screen,
            help,
            middle,
            sidebar,
            work,
            content_panel,
            content,
            status,
            preview_panel,
            preview,
            preview_bar,
            message,
        };

        let mut ctx = Self { tree, handles };
        ctx.apply_config(config);
        ctx
    }

    /// Named handles to the well-known windows.
    pub const fn handles(&self) -> &ScreenHandles {
        &self.handles
    }

    /// The window tree, for reading geometry.
    pub const fn tree(&self) -> &WindowTree {
        &self.tree
    }

    /// The window tree, for structural changes.
    ///
    /// Mutations never reflow on their own; call [`reflow`](Self::reflow)
    /// when done.
    pub fn tree_mut(&mut self) -> &mut WindowTree {
        &mut self.tree
    }

    /// Set the root budget from the terminal size.
    ///
    /// Reflows only when the size actually changed.
    pub fn set_root_size(&mut self, rows: u16, cols: u16) {
        let Some(state) = self.tree.state(self.handles.root) else {
            return;
        };
        if state.rows == rows && state.cols == cols {
            return;
        }
        debug!(rows, cols, "root resized");
        self.tree.set_geometry(self.handles.root, rows, cols, 0, 0);
        self.reflow();
    }

    /// Recompute geometry for the whole tree.
    pub fn reflow(&mut self) {
        reflow(&mut self.tree, self.handles.root);
    }

    /// Recompute geometry below `node` only, against its current state.
    pub fn reflow_from(&mut self, node: NodeId) {
        reflow(&mut self.tree, node);
    }

    /// Apply a configuration snapshot, then reflow.
    pub fn apply_config(&mut self, config: &ScreenConfig) {
        apply_screen_policy(&mut self.tree, &self.handles, config);
        self.reflow();
    }

    /// Grow or shrink the message line for a multi-row message, then
    /// reflow. Pass 1 to restore the single-row default.
    pub fn set_message_rows(&mut self, rows: u16) {
        self.tree.set_requested(self.handles.message, rows, UNLIMITED);
        self.reflow();
    }

    /// Push an overlay panel onto the dialog container.
    ///
    /// The panel receives geometry at the next reflow.
    pub fn dialog_push(&mut self, panel: NodeId) {
        dialog_push(&mut self.tree, self.handles.dialogs, panel);
    }

    /// Pop the topmost overlay panel; the caller keeps ownership of the
    /// returned window and frees it when done.
    pub fn dialog_pop(&mut self) -> Option<NodeId> {
        dialog_pop(&mut self.tree, self.handles.dialogs)
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}
