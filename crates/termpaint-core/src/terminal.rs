#![forbid(unsafe_code)]

//! Terminal capabilities: cursor-addressed styled writes and size discovery.
//!
//! The paint engine never emits escape sequences itself; it drives a
//! [`TerminalWriter`], and [`AnsiWriter`] is the crossterm-backed
//! implementation of that capability. Writes are queued and sent on
//! [`TerminalWriter::flush`].

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::style::{Color, Paint};

/// Cursor-addressed styled output consumed by the paint engine.
///
/// Coordinates are 0-based, column first, matching crossterm's `MoveTo`.
pub trait TerminalWriter {
    /// Move the cursor to the given cell.
    fn move_cursor_to(&mut self, col: u16, row: u16) -> io::Result<()>;

    /// Write `text` at the cursor with the given paint.
    fn write_styled(&mut self, text: &str, paint: Paint) -> io::Result<()>;

    /// Push any queued output to the terminal.
    fn flush(&mut self) -> io::Result<()>;
}

/// Terminal dimensions, sampled at root construction and on resize.
pub trait TerminalInfo {
    /// Current width in columns.
    fn columns(&self) -> io::Result<u16>;

    /// Current height in rows.
    fn rows(&self) -> io::Result<u16>;
}

/// A [`TerminalWriter`] emitting ANSI sequences through crossterm.
#[derive(Debug)]
pub struct AnsiWriter<W: Write> {
    out: W,
}

impl<W: Write> AnsiWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl AnsiWriter<io::Stdout> {
    /// Writer over the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter for AnsiWriter<W> {
    fn move_cursor_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        crossterm::queue!(self.out, MoveTo(col, row))
    }

    fn write_styled(&mut self, text: &str, paint: Paint) -> io::Result<()> {
        if paint.is_plain() {
            return crossterm::queue!(self.out, Print(text));
        }
        if let Some(fg) = paint.fg {
            crossterm::queue!(self.out, SetForegroundColor(to_crossterm(fg)))?;
        }
        if let Some(bg) = paint.bg {
            crossterm::queue!(self.out, SetBackgroundColor(to_crossterm(bg)))?;
        }
        if paint.inverse {
            crossterm::queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        crossterm::queue!(self.out, Print(text), SetAttribute(Attribute::Reset))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// A [`TerminalInfo`] backed by crossterm's size query.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermInfo;

impl TerminalInfo for CrosstermInfo {
    fn columns(&self) -> io::Result<u16> {
        crossterm::terminal::size().map(|(cols, _)| cols)
    }

    fn rows(&self) -> io::Result<u16> {
        crossterm::terminal::size().map(|(_, rows)| rows)
    }
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as C;
    match color {
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::White => C::Grey,
        Color::BrightBlack => C::DarkGrey,
        Color::BrightRed => C::Red,
        Color::BrightGreen => C::Green,
        Color::BrightYellow => C::Yellow,
        Color::BrightBlue => C::Blue,
        Color::BrightMagenta => C::Magenta,
        Color::BrightCyan => C::Cyan,
        Color::BrightWhite => C::White,
        Color::Ansi256(idx) => C::AnsiValue(idx),
        Color::Rgb(r, g, b) => C::Rgb { r, g, b },
    }
}

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    use super::TerminalWriter;
    use crate::style::Paint;

    /// One recorded writer call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum WriterOp {
        /// Cursor moved to (col, row).
        MoveTo(u16, u16),
        /// Styled text written at the cursor.
        Write {
            /// The text as passed to the writer.
            text: String,
            /// The paint it carried.
            paint: Paint,
        },
        /// Output flushed.
        Flush,
    }

    /// A [`WriterOp`] tagged with the handle that issued it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedOp {
        /// Identity of the issuing handle (see [`RecordingWriter::fork`]).
        pub handle: usize,
        /// The recorded call.
        pub op: WriterOp,
    }

    /// A [`TerminalWriter`] double that records calls instead of painting.
    ///
    /// Forked handles share one log, so interleaving across concurrent
    /// repaints is observable in call order.
    #[derive(Debug, Clone)]
    pub struct RecordingWriter {
        log: Arc<Mutex<Vec<RecordedOp>>>,
        next_handle: Arc<AtomicUsize>,
        handle: usize,
    }

    impl RecordingWriter {
        /// Create a writer with an empty log.
        pub fn new() -> Self {
            Self {
                log: Arc::new(Mutex::new(Vec::new())),
                next_handle: Arc::new(AtomicUsize::new(1)),
                handle: 0,
            }
        }

        /// A new handle over the same log, with its own identity tag.
        pub fn fork(&self) -> Self {
            Self {
                log: Arc::clone(&self.log),
                next_handle: Arc::clone(&self.next_handle),
                handle: self.next_handle.fetch_add(1, Ordering::Relaxed),
            }
        }

        /// Snapshot of every recorded call, in issue order.
        pub fn ops(&self) -> Vec<RecordedOp> {
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn push(&self, op: WriterOp) {
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedOp {
                    handle: self.handle,
                    op,
                });
        }
    }

    impl Default for RecordingWriter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TerminalWriter for RecordingWriter {
        fn move_cursor_to(&mut self, col: u16, row: u16) -> io::Result<()> {
            self.push(WriterOp::MoveTo(col, row));
            Ok(())
        }

        fn write_styled(&mut self, text: &str, paint: Paint) -> io::Result<()> {
            self.push(WriterOp::Write {
                text: text.to_string(),
                paint,
            });
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.push(WriterOp::Flush);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::{RecordedOp, RecordingWriter, WriterOp};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_writer_moves_cursor() {
        let mut writer = AnsiWriter::new(Vec::new());
        writer.move_cursor_to(2, 5).unwrap();
        // MoveTo is 1-based on the wire: row 6, column 3
        assert_eq!(writer.into_inner(), b"\x1b[6;3H");
    }

    #[test]
    fn ansi_writer_plain_write_is_passthrough() {
        let mut writer = AnsiWriter::new(Vec::new());
        writer.write_styled("hello", Paint::new()).unwrap();
        assert_eq!(writer.into_inner(), b"hello");
    }

    #[test]
    fn ansi_writer_styled_write_resets() {
        let mut writer = AnsiWriter::new(Vec::new());
        writer
            .write_styled("x", Paint::new().with_fg(Color::Red))
            .unwrap();
        let bytes = writer.into_inner();
        let out = String::from_utf8(bytes).unwrap();
        assert!(out.contains('x'));
        // Trailing attribute reset so styling never leaks past the write
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn bright_and_base_colors_map_apart() {
        use crossterm::style::Color as C;
        assert_eq!(to_crossterm(Color::Red), C::DarkRed);
        assert_eq!(to_crossterm(Color::BrightRed), C::Red);
        assert_eq!(to_crossterm(Color::White), C::Grey);
        assert_eq!(to_crossterm(Color::BrightWhite), C::White);
        assert_eq!(to_crossterm(Color::Ansi256(42)), C::AnsiValue(42));
        assert_eq!(
            to_crossterm(Color::Rgb(1, 2, 3)),
            C::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn recording_writer_tags_forked_handles() {
        let mut a = RecordingWriter::new();
        let mut b = a.fork();
        a.move_cursor_to(0, 0).unwrap();
        b.write_styled("x", Paint::new()).unwrap();
        let ops = a.ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].handle, 0);
        assert_eq!(ops[1].handle, 1);
    }
}
