#![forbid(unsafe_code)]

//! Colors and the closed style set handed to a [`TerminalWriter`].
//!
//! [`TerminalWriter`]: crate::terminal::TerminalWriter

/// A terminal color at varying fidelity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black (ANSI index 0).
    Black,
    /// Red (ANSI index 1).
    Red,
    /// Green (ANSI index 2).
    Green,
    /// Yellow (ANSI index 3).
    Yellow,
    /// Blue (ANSI index 4).
    Blue,
    /// Magenta (ANSI index 5).
    Magenta,
    /// Cyan (ANSI index 6).
    Cyan,
    /// White (ANSI index 7).
    White,
    /// Bright black (ANSI index 8).
    BrightBlack,
    /// Bright red (ANSI index 9).
    BrightRed,
    /// Bright green (ANSI index 10).
    BrightGreen,
    /// Bright yellow (ANSI index 11).
    BrightYellow,
    /// Bright blue (ANSI index 12).
    BrightBlue,
    /// Bright magenta (ANSI index 13).
    BrightMagenta,
    /// Bright cyan (ANSI index 14).
    BrightCyan,
    /// Bright white (ANSI index 15).
    BrightWhite,
    /// 256-color palette index.
    Ansi256(u8),
    /// 24-bit RGB value.
    Rgb(u8, u8, u8),
}

/// Styling for one write: explicit fields, no name-based dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    /// Foreground color, if any.
    pub fg: Option<Color>,
    /// Background color, if any.
    pub bg: Option<Color>,
    /// Swap foreground and background (caret rendering).
    pub inverse: bool,
}

impl Paint {
    /// Create an unstyled paint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Enable inverse video.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// Whether this paint changes nothing about the output.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.inverse
    }
}
