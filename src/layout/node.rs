//! Window node primitives: size requests, policies, and computed state.
//!
//! A window is a node in an n-ary tree. It carries what it *wants*
//! (`requested` rows/cols plus a [`SizePolicy`]) and what it *got* (a
//! [`WindowState`] assigned by the last reflow). The two are deliberately
//! separate: requests survive across reflows, computed state is only valid
//! between them.

use bitflags::bitflags;

use super::rect::Rect;

slotmap::new_key_type! {
    /// Handle to a window in a [`WindowTree`](super::WindowTree).
    ///
    /// Handles are generational: once the window is freed, the handle goes
    /// stale and every operation taking it becomes a silent no-op.
    pub struct NodeId;
}

/// Size request meaning "consume whatever space is available".
///
/// Resolved against the remaining budget at allocation time, so a sole
/// Fixed consumer takes everything and later siblings take what is left.
pub const UNLIMITED: u16 = u16::MAX;

/// Which way a window's children are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children are stacked top-to-bottom; rows are allocated, width is
    /// inherited from the parent.
    Vertical,
    /// Children sit side-by-side; columns are allocated, height is
    /// inherited from the parent.
    Horizontal,
}

/// How a window's space is allocated during reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizePolicy {
    /// Exactly the requested size, clamped to the remaining budget.
    Fixed,
    /// All space left over once Fixed siblings are satisfied.
    Maximise,
    /// Derived bottom-up from the sizes of visible children.
    Minimise,
}

/// Computed on-screen geometry of a window.
///
/// Authoritative only between reflows, and only while `visible` is set.
/// Offsets are absolute screen coordinates, not parent-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    /// Whether the window occupies space on screen.
    pub visible: bool,
    /// Height in rows.
    pub rows: u16,
    /// Width in columns.
    pub cols: u16,
    /// Absolute row of the top-left corner.
    pub row_offset: u16,
    /// Absolute column of the top-left corner.
    pub col_offset: u16,
}

impl WindowState {
    /// The window's absolute bounds as a screen region.
    pub const fn rect(&self) -> Rect {
        Rect::new(self.row_offset, self.col_offset, self.rows, self.cols)
    }

    /// What changed between `prev` and this state.
    ///
    /// Collaborators use this after a reflow to decide how much to redraw.
    pub fn changes_since(&self, prev: &Self) -> WindowChanges {
        let mut changes = WindowChanges::empty();

        if self.visible && !prev.visible {
            changes |= WindowChanges::SHOWN;
        }
        if !self.visible && prev.visible {
            changes |= WindowChanges::HIDDEN;
        }
        if (self.row_offset != prev.row_offset) || (self.col_offset != prev.col_offset) {
            changes |= WindowChanges::MOVED;
        }
        if self.rows > prev.rows {
            changes |= WindowChanges::TALLER;
        }
        if self.rows < prev.rows {
            changes |= WindowChanges::SHORTER;
        }
        if self.cols > prev.cols {
            changes |= WindowChanges::WIDER;
        }
        if self.cols < prev.cols {
            changes |= WindowChanges::NARROWER;
        }

        changes
    }
}

bitflags! {
    /// How a window's geometry differs between two reflows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowChanges: u8 {
        /// Became visible.
        const SHOWN = 0b0000_0001;
        /// Became invisible.
        const HIDDEN = 0b0000_0010;
        /// Top-left corner changed.
        const MOVED = 0b0000_0100;
        /// Gained rows.
        const TALLER = 0b0000_1000;
        /// Lost rows.
        const SHORTER = 0b0001_0000;
        /// Gained columns.
        const WIDER = 0b0010_0000;
        /// Lost columns.
        const NARROWER = 0b0100_0000;
    }
}

/// A single window in the tree.
///
/// Storage only; all behavior lives in [`WindowTree`](super::WindowTree)
/// and the reflow engine.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) orientation: Orientation,
    pub(crate) policy: SizePolicy,
    pub(crate) req_rows: u16,
    pub(crate) req_cols: u16,
    pub(crate) state: WindowState,
    pub(crate) previous: WindowState,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) label: Option<String>,
}

impl Node {
    pub(crate) fn new(orientation: Orientation, policy: SizePolicy, rows: u16, cols: u16) -> Self {
        Self {
            orientation,
            policy,
            req_rows: rows,
            req_cols: cols,
            state: WindowState {
                visible: true,
                ..WindowState::default()
            },
            previous: WindowState::default(),
            parent: None,
            children: Vec::new(),
            label: None,
        }
    }
}
