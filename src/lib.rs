//! # Mullion
//!
//! A constraint-based window-tree layout engine for terminal UIs.
//!
//! Mullion models the terminal as a tree of rectangular windows. Each
//! window requests space with one of three policies (Fixed, Maximise, or
//! Minimise), and a single [`reflow`] pass turns the tree plus the
//! terminal size into absolute rows, columns and offsets for every
//! visible window. Overlay panels stack on a dedicated dialog container
//! with classic push/pop discipline.
//!
//! ## Core Concepts
//!
//! - **Window tree**: arena-backed, ordered children, non-owning parent links
//! - **Reflow**: two-phase allocation, bottom-up Minimise sizing followed by
//!   top-down offset assignment
//! - **Policy hook**: configuration-driven sibling reordering applied
//!   before reflow, never during it
//! - **Dialog stack**: pushed overlays, exactly one visible at a time
//!
//! ## Example
//!
//! ```rust
//! use mullion::LayoutContext;
//!
//! let mut ctx = LayoutContext::new();
//! ctx.set_root_size(24, 80);
//!
//! let content = ctx.handles().content;
//! let state = ctx.tree().state(content).expect("content window is live");
//! assert_eq!(state.rows, 21);
//! assert_eq!(state.cols, 80);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod context;
pub mod dialog;
pub mod layout;
pub mod screen;

// Re-exports for convenience
pub use context::LayoutContext;
pub use dialog::{dialog_pop, dialog_push};
pub use layout::{
    apply_screen_policy, reflow, NodeId, Orientation, Rect, ScreenConfig, ScreenHandles,
    SizePolicy, WindowChanges, WindowState, WindowTree, UNLIMITED,
};
pub use screen::{wrap_columns, Screen};
