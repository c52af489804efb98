#![forbid(unsafe_code)]

//! Termpaint public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the layer crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use termpaint_core::geometry::Rect;
pub use termpaint_core::resize::{ResizeCallback, ResizeNotifier};
#[cfg(unix)]
pub use termpaint_core::resize::SigwinchNotifier;
pub use termpaint_core::style::{Color, Paint};
pub use termpaint_core::terminal::{AnsiWriter, CrosstermInfo, TerminalInfo, TerminalWriter};
#[cfg(feature = "test-helpers")]
pub use termpaint_core::terminal::{RecordedOp, RecordingWriter, WriterOp};

// --- Text re-exports -------------------------------------------------------

pub use termpaint_text::{TAB_WIDTH, display_width, expand_tabs, field_line, wrap_hard};

// --- Widget re-exports -----------------------------------------------------

pub use termpaint_widgets::{
    DEFAULT_BORDER_GLYPH, Error, Node, NodeId, NodeKind, PaintGuard, PaintLock, Position, Result,
    Root, Tree,
};

/// Common imports for building and painting a widget tree.
pub mod prelude {
    pub use crate::{
        AnsiWriter, Color, CrosstermInfo, Node, NodeId, Paint, Position, ResizeNotifier, Root,
        TerminalInfo, TerminalWriter, Tree,
    };
    #[cfg(unix)]
    pub use crate::SigwinchNotifier;
}
