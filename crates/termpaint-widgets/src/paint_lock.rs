#![forbid(unsafe_code)]

//! The tree-wide paint mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes the erase-and-redraw phase of a single node's repaint.
///
/// One lock is shared by the whole tree; it guards exactly one node's
/// background + border + content sequence, never the recursion into
/// children. Tree-structure, geometry, and content mutation are outside
/// its protection.
#[derive(Debug, Default)]
pub struct PaintLock {
    inner: Mutex<()>,
}

impl PaintLock {
    /// Create an unheld lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the paint phase can begin.
    ///
    /// A painter that panicked while holding the lock must not wedge
    /// every later repaint, so poisoning is recovered.
    pub fn acquire(&self) -> PaintGuard<'_> {
        PaintGuard {
            _inner: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Held for the duration of one node's own paint work.
#[derive(Debug)]
pub struct PaintGuard<'a> {
    _inner: MutexGuard<'a, ()>,
}
