//! Layout module: the window tree and the reflow engine.
//!
//! Windows form an n-ary tree. Each node carries a size request and a
//! [`SizePolicy`]; [`reflow`] walks the tree and assigns absolute geometry
//! to every visible node. Nothing here draws; collaborators read the
//! computed state after a reflow.

mod node;
mod policy;
mod rect;
mod reflow;
mod tree;

pub use node::{NodeId, Orientation, SizePolicy, WindowChanges, WindowState, UNLIMITED};
pub use policy::{apply_screen_policy, ScreenConfig, ScreenHandles};
pub use rect::Rect;
pub use reflow::reflow;
pub use tree::WindowTree;
