#![forbid(unsafe_code)]

//! The tree primitive: geometry, style attributes, and kind-specific state.

use std::str::FromStr;

use termpaint_core::{Color, Paint};
use termpaint_text::{field_line, grapheme_count, grapheme_window, wrap_hard};

use crate::error::Error;

/// Index of a node inside its owning [`Tree`](crate::tree::Tree) arena.
///
/// Ids are minted by `Tree::attach` and are only meaningful for the tree
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// How a node's local origin maps to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Offsets into the parent's interior, compounding up the ancestor
    /// chain.
    #[default]
    Relative,
    /// Screen-absolute placement, ignoring ancestors.
    Absolute,
}

impl Position {
    /// Canonical spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relative" => Ok(Self::Relative),
            "absolute" => Ok(Self::Absolute),
            other => Err(Error::InvalidPosition(other.to_string())),
        }
    }
}

/// Kind-specific node state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A plain bordered/filled rectangle with no content of its own.
    Box,
    /// Wrapped, vertically scrollable multi-line text.
    TextPane {
        /// Raw text; wrapping is derived on demand.
        text: String,
        /// Vertical offset into the wrapped lines.
        scroll_y: usize,
    },
    /// A borderless single-line field with a caret.
    TextField {
        /// Raw text; collapsed to one visual line on demand.
        text: String,
        /// Caret position as a grapheme index into the visual line.
        cursor: usize,
        /// Horizontal offset into the visual line.
        scroll_x: usize,
    },
}

/// A rectangular, positionable, paintable element of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: Option<String>,
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) position: Position,
    pub(crate) border: bool,
    pub(crate) border_glyph: String,
    pub(crate) border_color: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) foreground: Option<Color>,
    pub(crate) visible: bool,
    pub(crate) changed: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

/// Default border glyph: a full block.
pub const DEFAULT_BORDER_GLYPH: &str = "█";

impl Node {
    fn base(x: u16, y: u16, width: u16, height: u16, kind: NodeKind) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
            position: Position::Relative,
            border: true,
            border_glyph: DEFAULT_BORDER_GLYPH.to_string(),
            border_color: None,
            background: None,
            foreground: None,
            visible: true,
            changed: false,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    /// A plain box node with a border.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::base(x, y, width, height, NodeKind::Box)
    }

    /// A bordered pane of wrapped, scrollable text.
    pub fn text_pane(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::base(
            x,
            y,
            width,
            height,
            NodeKind::TextPane {
                text: String::new(),
                scroll_y: 0,
            },
        )
    }

    /// A single-line text field: height fixed at 1, border fixed off.
    pub fn text_field(x: u16, y: u16, width: u16) -> Self {
        let mut node = Self::base(
            x,
            y,
            width,
            1,
            NodeKind::TextField {
                text: String::new(),
                cursor: 0,
                scroll_x: 0,
            },
        );
        node.border = false;
        node
    }

    // --- Builder methods ---

    /// Set the lookup id (builder).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the background fill color (builder).
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the text color (builder).
    #[must_use]
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Set the border color (builder).
    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set the border glyph (builder). Must be one cell wide when painted.
    #[must_use]
    pub fn with_border_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.border_glyph = glyph.into();
        self
    }

    /// Disable the border (builder).
    #[must_use]
    pub fn borderless(mut self) -> Self {
        self.border = false;
        self
    }

    /// Set the positioning mode (builder).
    #[must_use]
    pub fn positioned(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    // --- Geometry ---

    /// Local x origin.
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Local y origin.
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Outer width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Outer height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Positioning mode.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Change the positioning mode.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Move the local origin.
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    /// Change the outer size.
    pub fn resize_to(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Border thickness in cells: 1 when bordered, else 0.
    #[inline]
    pub fn border_thickness(&self) -> u16 {
        u16::from(self.border)
    }

    /// Whether the border is drawn.
    pub fn has_border(&self) -> bool {
        self.border
    }

    /// Enable or disable the border.
    pub fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    /// The glyph the border is drawn with.
    pub fn border_glyph(&self) -> &str {
        &self.border_glyph
    }

    /// Interior width: outer width minus 2 when bordered.
    ///
    /// Bordered nodes narrower than 2 cells have a degenerate interior
    /// and saturate to 0.
    #[inline]
    pub fn inner_width(&self) -> u16 {
        if self.border {
            self.width.saturating_sub(2)
        } else {
            self.width
        }
    }

    /// Interior height: outer height minus 2 when bordered.
    #[inline]
    pub fn inner_height(&self) -> u16 {
        if self.border {
            self.height.saturating_sub(2)
        } else {
            self.height
        }
    }

    // --- Style and visibility ---

    /// Background fill color.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Set or clear the background fill color.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Text color.
    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// Set or clear the text color.
    pub fn set_foreground(&mut self, color: Option<Color>) {
        self.foreground = color;
    }

    /// Border color.
    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    /// Set or clear the border color.
    pub fn set_border_color(&mut self, color: Option<Color>) {
        self.border_color = color;
    }

    /// Whether this node (and with it, its subtree) is painted.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the subtree rooted here.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Advisory dirty flag; not consumed by the paint traversal.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Set the advisory dirty flag.
    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// The paint for this node's content: its text and background colors.
    pub fn content_paint(&self) -> Paint {
        let mut paint = Paint::new();
        if let Some(fg) = self.foreground {
            paint = paint.with_fg(fg);
        }
        if let Some(bg) = self.background {
            paint = paint.with_bg(bg);
        }
        paint
    }

    // --- Identity and links ---

    /// Lookup id, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Non-owning back-reference to the parent, set once at attach time.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order (= paint order = lookup order).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Kind-specific state.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    // --- Focus ---

    /// Whether this kind can hold focus at all.
    pub fn focusable(&self) -> bool {
        matches!(self.kind, NodeKind::TextField { .. })
    }

    /// Whether this node holds focus.
    ///
    /// Text fields report `true` unconditionally (single-field-focus
    /// stub); every other kind fails with
    /// [`Error::FocusUnsupported`].
    pub fn focused(&self) -> Result<bool, Error> {
        match self.kind {
            NodeKind::TextField { .. } => Ok(true),
            _ => Err(Error::FocusUnsupported),
        }
    }

    // --- Text content ---

    /// Raw text of a pane or field.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::TextPane { text, .. } | NodeKind::TextField { text, .. } => Some(text),
            NodeKind::Box => None,
        }
    }

    /// Replace the text of a pane or field.
    ///
    /// A field also snaps its horizontal scroll so the tail of the new
    /// text is visible. Returns whether a redraw is needed; callers
    /// follow up with a repaint themselves.
    pub fn set_text(&mut self, new_text: impl Into<String>) -> bool {
        let width = self.width as usize;
        match &mut self.kind {
            NodeKind::TextPane { text, .. } => {
                *text = new_text.into();
                true
            }
            NodeKind::TextField { text, scroll_x, .. } => {
                *text = new_text.into();
                let line = field_line(text);
                *scroll_x = (grapheme_count(&line) + 1).saturating_sub(width);
                true
            }
            NodeKind::Box => false,
        }
    }

    /// Vertical scroll offset of a pane.
    pub fn scroll_y(&self) -> Option<usize> {
        match self.kind {
            NodeKind::TextPane { scroll_y, .. } => Some(scroll_y),
            _ => None,
        }
    }

    /// Set the vertical scroll offset of a pane.
    ///
    /// Any value is accepted; offsets past the wrapped-line count make
    /// the pane render nothing. Returns whether a redraw is needed.
    pub fn set_scroll_y(&mut self, offset: usize) -> bool {
        match &mut self.kind {
            NodeKind::TextPane { scroll_y, .. } => {
                *scroll_y = offset;
                true
            }
            _ => false,
        }
    }

    /// The pane's text in wrapped form, honoring the current inner width.
    pub fn wrapped_lines(&self) -> Option<Vec<String>> {
        match &self.kind {
            NodeKind::TextPane { text, .. } => Some(wrap_hard(text, self.inner_width() as usize)),
            _ => None,
        }
    }

    // --- Text field ---

    /// Horizontal scroll offset of a field.
    pub fn scroll_x(&self) -> Option<usize> {
        match self.kind {
            NodeKind::TextField { scroll_x, .. } => Some(scroll_x),
            _ => None,
        }
    }

    /// Set the horizontal scroll offset of a field.
    pub fn set_scroll_x(&mut self, offset: usize) -> bool {
        match &mut self.kind {
            NodeKind::TextField { scroll_x, .. } => {
                *scroll_x = offset;
                true
            }
            _ => false,
        }
    }

    /// Caret position of a field, as a grapheme index into
    /// [`Node::text_line`].
    pub fn cursor(&self) -> Option<usize> {
        match self.kind {
            NodeKind::TextField { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    /// Move the caret.
    ///
    /// Positions outside `[0, text_line_len - 1]` are rejected silently:
    /// the caret stays put and `false` is returned, so no repaint
    /// follows. The last valid position is the trailing pad cell.
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        let Some(line) = self.text_line() else {
            return false;
        };
        if pos >= grapheme_count(&line) {
            return false;
        }
        if let NodeKind::TextField { cursor, .. } = &mut self.kind {
            *cursor = pos;
            true
        } else {
            false
        }
    }

    /// The field's single visual line: tabs expanded, newlines collapsed
    /// to spaces, one trailing pad cell.
    pub fn text_line(&self) -> Option<String> {
        match &self.kind {
            NodeKind::TextField { text, .. } => Some(field_line(text)),
            _ => None,
        }
    }

    /// The scroll offset that keeps the line's tail visible.
    pub fn tail_scroll_x(&self) -> Option<usize> {
        let line = self.text_line()?;
        Some((grapheme_count(&line) + 1).saturating_sub(self.width as usize))
    }

    /// The window of the visual line currently shown.
    pub fn displayed_text(&self) -> Option<String> {
        let line = self.text_line()?;
        let NodeKind::TextField { scroll_x, .. } = self.kind else {
            return None;
        };
        Some(grapheme_window(&line, scroll_x, self.width as usize))
    }

    /// Whether the caret falls inside the displayed window.
    pub fn cursor_in_display(&self) -> bool {
        match self.kind {
            NodeKind::TextField {
                cursor, scroll_x, ..
            } => cursor >= scroll_x && cursor < scroll_x + self.width as usize,
            _ => false,
        }
    }

    /// The caret position relative to the displayed window, when inside.
    pub fn cursor_pos_in_display(&self) -> Option<usize> {
        if !self.cursor_in_display() {
            return None;
        }
        match self.kind {
            NodeKind::TextField {
                cursor, scroll_x, ..
            } => Some(cursor - scroll_x),
            _ => None,
        }
    }
}
