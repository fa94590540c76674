//! Screen policy: configuration-driven tree adjustments before reflow.
//!
//! The policy hook reorders siblings and switches size policies to match a
//! configuration snapshot; the reflow engine then does the math. The split
//! is strict: nothing here computes geometry, and `reflow` never re-runs
//! the hook.

use tracing::debug;

use super::node::{NodeId, SizePolicy, UNLIMITED};
use super::tree::WindowTree;

/// Configuration snapshot consumed by [`apply_screen_policy`].
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Status line above the content pane instead of below it.
    pub status_on_top: bool,
    /// Show the one-row help line.
    pub show_help: bool,
    /// Show the sidebar.
    pub show_sidebar: bool,
    /// Sidebar width in columns.
    pub sidebar_cols: u16,
    /// Sidebar on the right edge instead of the left.
    pub sidebar_on_right: bool,
    /// Show the preview pane.
    pub show_preview: bool,
    /// Content rows kept visible while the preview pane is open.
    /// Zero collapses the content panel entirely.
    pub split_rows: u16,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            status_on_top: false,
            show_help: true,
            show_sidebar: false,
            sidebar_cols: 20,
            sidebar_on_right: false,
            show_preview: false,
            split_rows: 6,
        }
    }
}

/// Handles to the well-known windows of the default screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenHandles {
    /// Root of the whole tree; its geometry is the screen budget.
    pub root: NodeId,
    /// Overlay container managed by the dialog stack.
    pub dialogs: NodeId,
    /// The default screen, pushed as the base overlay at startup.
    pub screen: NodeId,
    /// One-row help line.
    pub help: NodeId,
    /// Horizontal band holding the sidebar and the work area.
    pub middle: NodeId,
    /// Sidebar column.
    pub sidebar: NodeId,
    /// Work area holding the content and preview panels.
    pub work: NodeId,
    /// Content panel: content pane plus status line.
    pub content_panel: NodeId,
    /// Main content pane.
    pub content: NodeId,
    /// One-row status line.
    pub status: NodeId,
    /// Preview panel: preview pane plus preview bar.
    pub preview_panel: NodeId,
    /// Preview pane.
    pub preview: NodeId,
    /// One-row bar under the preview pane.
    pub preview_bar: NodeId,
    /// One-row message line at the bottom of the screen.
    pub message: NodeId,
}

/// Reorder siblings and switch size policies to match `config`.
///
/// Must run to completion before the next `reflow`. This is purely a tree
/// mutation; no geometry is computed here.
pub fn apply_screen_policy(tree: &mut WindowTree, handles: &ScreenHandles, config: &ScreenConfig) {
    debug!(?config, "applying screen policy");

    // The status line leads its panel when on top; the help line takes the
    // opposite edge of the screen.
    ensure_first(
        tree,
        handles.content_panel,
        if config.status_on_top {
            handles.status
        } else {
            handles.content
        },
    );
    ensure_first(
        tree,
        handles.screen,
        if config.status_on_top {
            handles.middle
        } else {
            handles.help
        },
    );

    tree.set_visible(handles.help, config.show_help);

    tree.set_visible(handles.sidebar, config.show_sidebar);
    tree.set_requested(handles.sidebar, UNLIMITED, config.sidebar_cols);
    ensure_first(
        tree,
        handles.middle,
        if config.sidebar_on_right {
            handles.work
        } else {
            handles.sidebar
        },
    );

    // While the preview is open the content pane keeps a fixed number of
    // rows and its panel shrinks to fit; otherwise the content panel takes
    // everything and the preview panel disappears.
    if config.show_preview {
        tree.set_policy(handles.content, SizePolicy::Fixed);
        tree.set_requested(handles.content, config.split_rows, UNLIMITED);
        tree.set_policy(handles.content_panel, SizePolicy::Minimise);
        tree.set_visible(handles.content_panel, config.split_rows != 0);
        tree.set_visible(handles.preview_panel, true);
    } else {
        tree.set_policy(handles.content, SizePolicy::Maximise);
        tree.set_requested(handles.content, UNLIMITED, UNLIMITED);
        tree.set_policy(handles.content_panel, SizePolicy::Maximise);
        tree.set_visible(handles.content_panel, true);
        tree.set_visible(handles.preview_panel, false);
    }
}

/// Move the current first child of `parent` to the tail unless
/// `want_first` already leads.
///
/// With two children this is a swap; with more, the relative order of the
/// rest is preserved.
fn ensure_first(tree: &mut WindowTree, parent: NodeId, want_first: NodeId) {
    if !tree.children(parent).contains(&want_first) {
        return;
    }
    let Some(first) = tree.first_child(parent) else {
        return;
    };
    if first == want_first {
        return;
    }
    tree.move_to_tail(parent, first);
}
