#![forbid(unsafe_code)]

//! Text layout for termpaint: tab expansion, hard wrapping, and the
//! single-line form used by text fields.
//!
//! Everything here is recomputed on each call — no caching — so results
//! always reflect the current text and the current inner width.

pub mod wrap;

pub use wrap::{TAB_WIDTH, expand_tabs, field_line, wrap_hard};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The window of up to `count` graphemes starting at grapheme `start`.
///
/// Out-of-range windows shrink to what exists; a `start` past the end
/// yields an empty string.
#[must_use]
pub fn grapheme_window(text: &str, start: usize, count: usize) -> String {
    text.graphemes(true).skip(start).take(count).collect()
}
