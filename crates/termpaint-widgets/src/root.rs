#![forbid(unsafe_code)]

//! The top-level node, sized to the terminal and bound to resize
//! notifications.

use std::io;
use std::sync::{Arc, PoisonError, RwLock};

use termpaint_core::{Color, ResizeNotifier, TerminalInfo, TerminalWriter};

use crate::error::Result;
use crate::node::{Node, NodeId};
use crate::tree::Tree;

/// Owns the tree behind a shared lock so workers, resize handlers, and
/// the main thread can reach it.
///
/// The root node is created at the terminal's current size with a black
/// background fill. Cloning yields another handle to the same tree.
#[derive(Debug, Clone)]
pub struct Root {
    tree: Arc<RwLock<Tree>>,
}

impl Root {
    /// Build a root sized to the terminal reported by `info`.
    pub fn new<I: TerminalInfo>(info: &I) -> Result<Self> {
        let (cols, rows) = (info.columns()?, info.rows()?);
        let node = Node::new(0, 0, cols, rows).with_background(Color::Black);
        Ok(Self {
            tree: Arc::new(RwLock::new(Tree::new(node))),
        })
    }

    /// A shareable handle to the tree.
    pub fn tree(&self) -> Arc<RwLock<Tree>> {
        Arc::clone(&self.tree)
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.with_tree(|tree| tree.root())
    }

    /// Attach a child under `parent`.
    pub fn attach(&self, parent: NodeId, node: Node) -> NodeId {
        self.with_tree_mut(|tree| tree.attach(parent, node))
    }

    /// Run `f` with shared access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&Tree) -> R) -> R {
        let guard = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access to the tree.
    pub fn with_tree_mut<R>(&self, f: impl FnOnce(&mut Tree) -> R) -> R {
        let mut guard = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Re-query the terminal size, resize the root node, and repaint the
    /// whole tree.
    pub fn handle_resize<I, W>(&self, info: &I, term: &mut W) -> Result<()>
    where
        I: TerminalInfo,
        W: TerminalWriter,
    {
        let (cols, rows) = (info.columns()?, info.rows()?);
        self.with_tree_mut(|tree| {
            let root = tree.root();
            tree.node_mut(root).resize_to(cols, rows);
            tree.repaint(root, term)
        })
    }

    /// Register with `notifier` so every size-change notification spawns
    /// an independent worker that resizes and repaints the tree.
    ///
    /// Workers overlap under rapid notifications; each repaint is
    /// serialized per node by the paint lock, and the last-applied
    /// geometry wins. Worker failures are logged under the `tracing`
    /// feature and otherwise discarded.
    pub fn bind_resize<N, I, W, F>(
        &self,
        notifier: &mut N,
        info: I,
        make_writer: F,
    ) -> io::Result<()>
    where
        N: ResizeNotifier + ?Sized,
        I: TerminalInfo + Send + Sync + 'static,
        W: TerminalWriter + 'static,
        F: Fn() -> W + Send + Sync + 'static,
    {
        let tree = Arc::clone(&self.tree);
        let info = Arc::new(info);
        let make_writer = Arc::new(make_writer);
        notifier.subscribe(Arc::new(move || {
            let tree = Arc::clone(&tree);
            let info = Arc::clone(&info);
            let make_writer = Arc::clone(&make_writer);
            std::thread::spawn(move || {
                let size = info.columns().and_then(|cols| info.rows().map(|rows| (cols, rows)));
                let Ok((cols, rows)) = size else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("resize: terminal size query failed");
                    return;
                };
                let mut term = make_writer();
                let mut tree = tree.write().unwrap_or_else(PoisonError::into_inner);
                let root = tree.root();
                tree.node_mut(root).resize_to(cols, rows);
                if let Err(_err) = tree.repaint(root, &mut term) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_err, "resize repaint failed");
                }
            });
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use termpaint_core::{RecordingWriter, ResizeCallback};

    use super::*;

    struct FakeInfo {
        size: Arc<Mutex<(u16, u16)>>,
    }

    impl FakeInfo {
        fn new(cols: u16, rows: u16) -> (Self, Arc<Mutex<(u16, u16)>>) {
            let size = Arc::new(Mutex::new((cols, rows)));
            (
                Self {
                    size: Arc::clone(&size),
                },
                size,
            )
        }
    }

    impl TerminalInfo for FakeInfo {
        fn columns(&self) -> io::Result<u16> {
            Ok(self.size.lock().unwrap().0)
        }

        fn rows(&self) -> io::Result<u16> {
            Ok(self.size.lock().unwrap().1)
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        callback: Option<ResizeCallback>,
    }

    impl FakeNotifier {
        fn fire(&self) {
            if let Some(callback) = &self.callback {
                callback();
            }
        }
    }

    impl ResizeNotifier for FakeNotifier {
        fn subscribe(&mut self, callback: ResizeCallback) -> io::Result<()> {
            self.callback = Some(callback);
            Ok(())
        }
    }

    #[test]
    fn new_root_samples_the_terminal() {
        let (info, _) = FakeInfo::new(80, 24);
        let root = Root::new(&info).unwrap();
        root.with_tree(|tree| {
            let node = tree.node(tree.root());
            assert_eq!((node.width(), node.height()), (80, 24));
            assert_eq!(node.background(), Some(Color::Black));
        });
    }

    #[test]
    fn handle_resize_applies_new_geometry() {
        let (info, size) = FakeInfo::new(80, 24);
        let root = Root::new(&info).unwrap();
        *size.lock().unwrap() = (100, 30);
        let mut term = RecordingWriter::new();
        root.handle_resize(&info, &mut term).unwrap();
        root.with_tree(|tree| {
            let node = tree.node(tree.root());
            assert_eq!((node.width(), node.height()), (100, 30));
        });
        assert!(!term.ops().is_empty());
    }

    #[test]
    fn bound_resize_repaints_from_a_worker() {
        let (info, size) = FakeInfo::new(80, 24);
        let root = Root::new(&info).unwrap();
        let mut notifier = FakeNotifier::default();
        let recording = RecordingWriter::new();
        let writer = recording.clone();
        root.bind_resize(&mut notifier, info, move || writer.fork())
            .unwrap();

        *size.lock().unwrap() = (120, 40);
        notifier.fire();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let applied = root.with_tree(|tree| tree.node(tree.root()).width() == 120);
            if applied {
                break;
            }
            assert!(Instant::now() < deadline, "resize worker never applied");
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!recording.ops().is_empty());
    }
}
