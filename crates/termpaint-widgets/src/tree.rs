#![forbid(unsafe_code)]

//! The node arena and its repaint traversal.
//!
//! The tree exclusively owns every node; [`NodeId`] values are plain
//! indices into the arena and parents hold non-owning back-references.
//! Repaint takes `&self`, so any number of threads may repaint
//! concurrently; attribute and topology mutation take `&mut self` and
//! therefore require external coordination (see
//! [`Root`](crate::root::Root) for the shared-context pattern).

use std::sync::Arc;

use termpaint_core::{Paint, Rect, TerminalWriter};
use termpaint_text::{display_width, grapheme_count, grapheme_window, wrap_hard};

use crate::error::{Error, Result};
use crate::node::{Node, NodeId, NodeKind, Position};
use crate::paint_lock::PaintLock;

/// A tree of paintable nodes, rooted at the node it was created with.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    paint_lock: Arc<PaintLock>,
}

impl Tree {
    /// Create a tree owning `root`, with a fresh paint lock.
    pub fn new(root: Node) -> Self {
        Self::with_paint_lock(root, Arc::new(PaintLock::new()))
    }

    /// Create a tree sharing an existing paint lock.
    pub fn with_paint_lock(root: Node, paint_lock: Arc<PaintLock>) -> Self {
        Self {
            nodes: vec![root],
            paint_lock,
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The lock serializing every node's own paint phase.
    pub fn paint_lock(&self) -> &Arc<PaintLock> {
        &self.paint_lock
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Borrow a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Attach `child` under `parent`, setting the back-reference once and
    /// appending to the paint order. This is the only topology mutation;
    /// there is no detach.
    pub fn attach(&mut self, parent: NodeId, mut child: Node) -> NodeId {
        debug_assert!(child.parent.is_none());
        let id = NodeId(self.nodes.len() as u32);
        child.parent = Some(parent);
        self.nodes.push(child);
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    // --- Coordinate transforms ---

    /// Global column of the node's origin, plus `offset`.
    ///
    /// A parentless node is its own origin. Relative nodes compound the
    /// parent's global origin and border thickness; absolute nodes ignore
    /// ancestors entirely.
    pub fn global_x(&self, id: NodeId, offset: u16) -> u16 {
        let node = self.node(id);
        match (node.parent, node.position) {
            (None, _) | (Some(_), Position::Absolute) => node.x.saturating_add(offset),
            (Some(parent), Position::Relative) => node
                .x
                .saturating_add(self.global_x(parent, 0))
                .saturating_add(self.node(parent).border_thickness())
                .saturating_add(offset),
        }
    }

    /// Global row of the node's origin, plus `offset`.
    pub fn global_y(&self, id: NodeId, offset: u16) -> u16 {
        let node = self.node(id);
        match (node.parent, node.position) {
            (None, _) | (Some(_), Position::Absolute) => node.y.saturating_add(offset),
            (Some(parent), Position::Relative) => node
                .y
                .saturating_add(self.global_y(parent, 0))
                .saturating_add(self.node(parent).border_thickness())
                .saturating_add(offset),
        }
    }

    /// Global origin of the node's outer rectangle.
    pub fn global_origin(&self, id: NodeId) -> (u16, u16) {
        (self.global_x(id, 0), self.global_y(id, 0))
    }

    /// The node's outer rectangle in terminal cells.
    pub fn global_rect(&self, id: NodeId) -> Rect {
        let (x, y) = self.global_origin(id);
        let node = self.node(id);
        Rect::new(x, y, node.width, node.height)
    }

    /// Map an interior coordinate to an absolute terminal cell.
    pub fn inner_to_global(&self, id: NodeId, inner_x: u16, inner_y: u16) -> (u16, u16) {
        let thickness = self.node(id).border_thickness();
        (
            self.global_x(id, 0)
                .saturating_add(thickness)
                .saturating_add(inner_x),
            self.global_y(id, 0)
                .saturating_add(thickness)
                .saturating_add(inner_y),
        )
    }

    /// Global origin of the node's interior.
    pub fn inner_origin(&self, id: NodeId) -> (u16, u16) {
        self.inner_to_global(id, 0, 0)
    }

    // --- Queries ---

    /// Depth-first pre-order search by exact id, from the root.
    pub fn find_by_id(&self, needle: &str) -> Option<NodeId> {
        self.find_by_id_in(self.root(), needle)
    }

    /// Depth-first pre-order search by exact id, within a subtree.
    pub fn find_by_id_in(&self, from: NodeId, needle: &str) -> Option<NodeId> {
        let node = self.node(from);
        if node.id() == Some(needle) {
            return Some(from);
        }
        for &child in node.children() {
            if let Some(found) = self.find_by_id_in(child, needle) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first pre-order search for the first focused node.
    ///
    /// Asks [`Node::focused`] of every node visited, so a non-focusable
    /// kind anywhere on the path fails with
    /// [`Error::FocusUnsupported`] — this operation is the
    /// acknowledged focus-lookup stub.
    pub fn find_focused(&self) -> Result<Option<NodeId>> {
        self.find_focused_in(self.root())
    }

    /// [`Tree::find_focused`], within a subtree.
    pub fn find_focused_in(&self, from: NodeId) -> Result<Option<NodeId>> {
        if self.node(from).focused()? {
            return Ok(Some(from));
        }
        for &child in self.node(from).children() {
            if let Some(found) = self.find_focused_in(child)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Whether the node or any descendant carries the advisory dirty flag.
    pub fn subtree_changed(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.changed() || node.children().iter().any(|&child| self.subtree_changed(child))
    }

    // --- Repaint ---

    /// Redraw the node and its subtree, then flush the writer.
    ///
    /// Each node's own background + border + content sequence runs under
    /// the tree's [`PaintLock`]; children are painted after release, in
    /// insertion order. An invisible node skips its entire subtree. A
    /// border failure aborts that node's repaint — the background it
    /// already painted stays on screen, and the flush still happens so
    /// the partial frame is observable rather than stuck in the queue.
    pub fn repaint<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let outcome = self.repaint_node(id, term);
        term.flush()?;
        outcome
    }

    fn repaint_node<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let node = self.node(id);
        if !node.visible() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?node.id(), "repaint");

        {
            let _guard = self.paint_lock.acquire();
            self.paint_background(id, term)?;
            self.paint_border(id, term)?;
            self.paint_content(id, term)?;
        }

        for &child in node.children() {
            self.repaint_node(child, term)?;
        }
        Ok(())
    }

    fn paint_background<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let node = self.node(id);
        if node.background().is_none() {
            return Ok(());
        }
        let paint = node.content_paint();
        let rect = self.global_rect(id);
        let blank = " ".repeat(rect.width as usize);
        for row in 0..rect.height {
            term.move_cursor_to(rect.x, rect.y.saturating_add(row))?;
            term.write_styled(&blank, paint)?;
        }
        Ok(())
    }

    fn paint_border<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let node = self.node(id);
        if !node.has_border() {
            return Ok(());
        }
        let glyph = node.border_glyph();
        if display_width(glyph) != 1 {
            return Err(Error::BorderGlyph(glyph.to_string()));
        }

        let mut paint = Paint::new();
        if let Some(color) = node.border_color() {
            paint = paint.with_fg(color);
        }

        let rect = self.global_rect(id);
        let horizontal = glyph.repeat(rect.width as usize);

        term.move_cursor_to(rect.x, rect.y)?;
        term.write_styled(&horizontal, paint)?;
        for row in 0..node.inner_height() {
            let y = rect.y.saturating_add(row + 1);
            term.move_cursor_to(rect.x, y)?;
            term.write_styled(glyph, paint)?;
            term.move_cursor_to(rect.right().saturating_sub(1), y)?;
            term.write_styled(glyph, paint)?;
        }
        term.move_cursor_to(rect.x, rect.bottom().saturating_sub(1))?;
        term.write_styled(&horizontal, paint)?;
        Ok(())
    }

    fn paint_content<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        match self.node(id).kind() {
            NodeKind::Box => Ok(()),
            NodeKind::TextPane { .. } => self.paint_pane(id, term),
            NodeKind::TextField { .. } => self.paint_field(id, term),
        }
    }

    fn paint_pane<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let node = self.node(id);
        let NodeKind::TextPane { text, scroll_y } = node.kind() else {
            return Ok(());
        };
        let lines = wrap_hard(text, node.inner_width() as usize);
        // Scrolled past the end: render nothing, not an error
        if *scroll_y > lines.len() {
            return Ok(());
        }
        let paint = node.content_paint();
        for (row, line) in lines[*scroll_y..]
            .iter()
            .take(node.inner_height() as usize)
            .enumerate()
        {
            let (x, y) = self.inner_to_global(id, 0, row as u16);
            term.move_cursor_to(x, y)?;
            term.write_styled(line, paint)?;
        }
        Ok(())
    }

    fn paint_field<W: TerminalWriter>(&self, id: NodeId, term: &mut W) -> Result<()> {
        let node = self.node(id);
        let NodeKind::TextField {
            cursor, scroll_x, ..
        } = *node.kind()
        else {
            return Ok(());
        };
        let Some(line) = node.text_line() else {
            return Ok(());
        };
        if scroll_x > grapheme_count(&line) {
            return Ok(());
        }

        let shown = grapheme_window(&line, scroll_x, node.width() as usize);
        let (x, y) = self.inner_origin(id);
        term.move_cursor_to(x, y)?;

        let paint = node.content_paint();
        if node.cursor_in_display() && matches!(node.focused(), Ok(true)) {
            let offset = cursor - scroll_x;
            let before = grapheme_window(&shown, 0, offset);
            let caret = grapheme_window(&shown, offset, 1);
            let after = grapheme_window(&shown, offset + 1, node.width() as usize);
            if !before.is_empty() {
                term.write_styled(&before, paint)?;
            }
            if !caret.is_empty() {
                term.write_styled(&caret, Paint::new().inverted())?;
            }
            if !after.is_empty() {
                term.write_styled(&after, paint)?;
            }
        } else {
            term.write_styled(&shown, paint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new(Node::new(0, 0, 40, 20));
        let panel = tree.attach(tree.root(), Node::new(2, 3, 10, 5));
        let leaf = tree.attach(panel, Node::new(1, 1, 4, 2).borderless());
        (tree, panel, leaf)
    }

    #[test]
    fn root_is_its_own_origin() {
        let tree = Tree::new(Node::new(5, 7, 10, 10));
        assert_eq!(tree.global_x(tree.root(), 0), 5);
        assert_eq!(tree.global_y(tree.root(), 0), 7);
        assert_eq!(tree.global_y(tree.root(), 3), 10);
    }

    #[test]
    fn relative_children_compound_border_offsets() {
        let (tree, panel, leaf) = sample_tree();
        // root is bordered, so panel shifts by its origin + 1
        assert_eq!(tree.global_x(panel, 0), 3);
        assert_eq!(tree.global_y(panel, 0), 4);
        // leaf compounds panel's global origin + panel's border
        assert_eq!(tree.global_x(leaf, 0), 5);
        assert_eq!(tree.global_y(leaf, 0), 6);
    }

    #[test]
    fn absolute_children_ignore_ancestors() {
        let (mut tree, panel, _) = sample_tree();
        let floating = tree.attach(panel, Node::new(8, 9, 3, 3).positioned(Position::Absolute));
        assert_eq!(tree.global_x(floating, 0), 8);
        assert_eq!(tree.global_y(floating, 0), 9);
    }

    #[test]
    fn inner_origin_accounts_for_border() {
        let (tree, panel, leaf) = sample_tree();
        assert_eq!(tree.inner_origin(panel), (4, 5));
        // borderless leaf: interior == exterior
        assert_eq!(tree.inner_origin(leaf), (5, 6));
        assert_eq!(tree.inner_to_global(panel, 2, 1), (6, 6));
    }

    #[test]
    fn global_rect_spans_the_outer_box() {
        let (tree, panel, _) = sample_tree();
        assert_eq!(tree.global_rect(panel), Rect::new(3, 4, 10, 5));
    }

    #[test]
    fn attach_sets_backref_once() {
        let (tree, panel, leaf) = sample_tree();
        assert_eq!(tree.node(panel).parent(), Some(tree.root()));
        assert_eq!(tree.node(leaf).parent(), Some(panel));
        assert_eq!(tree.node(panel).children(), &[leaf]);
    }

    #[test]
    fn find_by_id_prefers_preorder_first() {
        let mut tree = Tree::new(Node::new(0, 0, 40, 20));
        let first = tree.attach(tree.root(), Node::new(0, 0, 5, 5).with_id("x"));
        let _second = tree.attach(tree.root(), Node::new(6, 0, 5, 5).with_id("x"));
        assert_eq!(tree.find_by_id("x"), Some(first));
        assert_eq!(tree.find_by_id("missing"), None);
    }

    #[test]
    fn find_by_id_descends_before_siblings() {
        let mut tree = Tree::new(Node::new(0, 0, 40, 20));
        let left = tree.attach(tree.root(), Node::new(0, 0, 10, 10));
        let deep = tree.attach(left, Node::new(0, 0, 4, 4).with_id("y"));
        let _late = tree.attach(tree.root(), Node::new(12, 0, 5, 5).with_id("y"));
        assert_eq!(tree.find_by_id("y"), Some(deep));
    }

    #[test]
    fn find_focused_fails_on_unfocusable_kinds() {
        let (tree, _, _) = sample_tree();
        assert!(matches!(tree.find_focused(), Err(Error::FocusUnsupported)));
    }

    #[test]
    fn find_focused_finds_a_field_root() {
        let tree = Tree::new(Node::text_field(0, 0, 10));
        assert_eq!(tree.find_focused().unwrap(), Some(tree.root()));
    }

    #[test]
    fn subtree_changed_sees_descendants() {
        let (mut tree, panel, leaf) = sample_tree();
        assert!(!tree.subtree_changed(tree.root()));
        tree.node_mut(leaf).set_changed(true);
        assert!(tree.subtree_changed(tree.root()));
        assert!(tree.subtree_changed(panel));
        assert!(!tree.node(panel).changed());
    }

    #[test]
    fn shared_paint_lock_can_span_trees() {
        let lock = Arc::new(PaintLock::new());
        let a = Tree::with_paint_lock(Node::new(0, 0, 5, 5), Arc::clone(&lock));
        let b = Tree::with_paint_lock(Node::new(0, 0, 5, 5), Arc::clone(&lock));
        assert!(Arc::ptr_eq(a.paint_lock(), b.paint_lock()));
    }

    #[test]
    fn pane_setters_request_redraw() {
        let mut tree = Tree::new(Node::new(0, 0, 40, 20));
        let pane = tree.attach(tree.root(), Node::text_pane(0, 0, 10, 5));
        assert!(tree.node_mut(pane).set_text("hello"));
        assert!(tree.node_mut(pane).set_scroll_y(2));
        assert_eq!(tree.node(pane).scroll_y(), Some(2));
    }
}
