#![forbid(unsafe_code)]

//! Retained-mode node tree and repaint traversal for termpaint.

pub mod error;
pub mod node;
pub mod paint_lock;
pub mod root;
pub mod tree;

pub use error::{Error, Result};
pub use node::{DEFAULT_BORDER_GLYPH, Node, NodeId, NodeKind, Position};
pub use paint_lock::{PaintGuard, PaintLock};
pub use root::Root;
pub use tree::Tree;
