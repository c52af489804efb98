#![forbid(unsafe_code)]

//! Core: coordinate math, styles, and terminal capabilities for termpaint.

pub mod geometry;
pub mod resize;
pub mod style;
pub mod terminal;

pub use geometry::Rect;
pub use resize::{ResizeCallback, ResizeNotifier};
#[cfg(unix)]
pub use resize::SigwinchNotifier;
pub use style::{Color, Paint};
pub use terminal::{AnsiWriter, CrosstermInfo, TerminalInfo, TerminalWriter};
#[cfg(feature = "test-helpers")]
pub use terminal::{RecordedOp, RecordingWriter, WriterOp};
