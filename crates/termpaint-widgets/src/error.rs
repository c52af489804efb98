#![forbid(unsafe_code)]

//! Paint-engine error type.

use std::io;

/// Errors raised by the node tree and its repaint traversal.
#[derive(Debug)]
pub enum Error {
    /// A position spelling other than `relative` or `absolute`.
    InvalidPosition(String),
    /// The border glyph does not occupy exactly one terminal cell.
    BorderGlyph(String),
    /// Focus was queried on a node kind that does not track it.
    FocusUnsupported,
    /// Terminal backend failure.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPosition(value) => {
                write!(f, "invalid position '{}': expected relative or absolute", value)
            }
            Self::BorderGlyph(glyph) => {
                write!(f, "border glyph {:?} is not exactly one cell wide", glyph)
            }
            Self::FocusUnsupported => {
                write!(f, "focus is not tracked by this node kind")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Convenience alias for paint-engine results.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_offending_value() {
        let err = Error::InvalidPosition("floating".into());
        assert!(err.to_string().contains("floating"));
        let err = Error::BorderGlyph("ab".into());
        assert!(err.to_string().contains("ab"));
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
