#![forbid(unsafe_code)]

//! Hard wrapping into fixed-width display lines.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab expands to.
pub const TAB_WIDTH: usize = 2;

/// Replace every tab with [`TAB_WIDTH`] spaces.
#[must_use]
pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Wrap `text` into display lines of at most `width` cells.
///
/// Tabs are expanded first, explicit newlines always start a new display
/// line, and each source line is chunked into consecutive `width`-cell
/// windows (the last chunk may be shorter). A line already narrower than
/// `width` is never split. Trailing newlines produce no trailing empty
/// lines. A `width` of zero skips chunking and yields the newline split
/// alone.
#[must_use]
pub fn wrap_hard(text: &str, width: usize) -> Vec<String> {
    let expanded = expand_tabs(text);
    let mut lines: Vec<&str> = expanded.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if width == 0 {
        return lines.into_iter().map(str::to_string).collect();
    }

    let mut out = Vec::new();
    for line in lines {
        chunk_line(line, width, &mut out);
    }
    out
}

/// The single visual line a text field shows: tabs expanded, newlines
/// collapsed to single spaces, one trailing pad cell for the caret.
#[must_use]
pub fn field_line(text: &str) -> String {
    let mut line = expand_tabs(text).replace('\n', " ");
    line.push(' ');
    line
}

fn chunk_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for grapheme in line.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(grapheme);
        current_width += grapheme_width;
    }

    // An empty source line stays an empty display line
    out.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_are_exactly_width_cells() {
        assert_eq!(wrap_hard("abcdefgh", 5), vec!["abcde", "fgh"]);
    }

    #[test]
    fn short_line_is_never_split() {
        assert_eq!(wrap_hard("abc", 5), vec!["abc"]);
        assert_eq!(wrap_hard("abcde", 5), vec!["abcde"]);
    }

    #[test]
    fn newlines_start_new_display_lines() {
        assert_eq!(wrap_hard("ab\ncdefgh", 5), vec!["ab", "cdefg", "h"]);
    }

    #[test]
    fn interior_blank_lines_survive() {
        assert_eq!(wrap_hard("a\n\nb", 5), vec!["a", "", "b"]);
    }

    #[test]
    fn trailing_newlines_drop() {
        assert_eq!(wrap_hard("a\n", 5), vec!["a"]);
        assert_eq!(wrap_hard("a\n\n\n", 5), vec!["a"]);
        assert!(wrap_hard("", 5).is_empty());
    }

    #[test]
    fn tabs_expand_to_two_cells() {
        assert_eq!(wrap_hard("a\tb", 10), vec!["a  b"]);
        assert_eq!(wrap_hard("\t\t", 10), vec!["    "]);
    }

    #[test]
    fn wide_graphemes_fill_two_cells() {
        // 2-cell CJK: three of them don't fit a 5-cell window
        assert_eq!(wrap_hard("日本語", 5), vec!["日本", "語"]);
    }

    #[test]
    fn zero_width_skips_chunking() {
        assert_eq!(wrap_hard("abc\ndef", 0), vec!["abc", "def"]);
    }

    #[test]
    fn field_line_collapses_and_pads() {
        assert_eq!(field_line("ab\ncd"), "ab cd ");
        assert_eq!(field_line("a\tb"), "a  b ");
        assert_eq!(field_line(""), " ");
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::*;
        use crate::display_width;

        proptest! {
            #[test]
            fn wrapped_lines_fit_width(text in "[ -~\\t\\n]{0,120}", width in 1usize..40) {
                for line in wrap_hard(&text, width) {
                    prop_assert!(display_width(&line) <= width);
                }
            }

            #[test]
            fn wrapping_preserves_content(text in "[ -~\\t\\n]{0,120}", width in 1usize..40) {
                let rejoined = wrap_hard(&text, width).concat();
                prop_assert_eq!(rejoined, expand_tabs(&text).replace('\n', ""));
            }
        }
    }
}
