#![forbid(unsafe_code)]

//! Terminal resize notification delivery.
//!
//! The notifier carries no payload; subscribers re-query [`TerminalInfo`]
//! when invoked.
//!
//! [`TerminalInfo`]: crate::terminal::TerminalInfo

use std::io;
use std::sync::Arc;

/// Callback invoked on every terminal size change.
pub type ResizeCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Registration hook for terminal-resize notifications.
pub trait ResizeNotifier {
    /// Register `callback` to run on each size-change notification.
    ///
    /// The callback may be invoked from a different thread than the
    /// subscriber's.
    fn subscribe(&mut self, callback: ResizeCallback) -> io::Result<()>;
}

#[cfg(unix)]
pub use sigwinch::SigwinchNotifier;

#[cfg(unix)]
mod sigwinch {
    use std::io;
    use std::thread::JoinHandle;

    use signal_hook::consts::signal::SIGWINCH;
    use signal_hook::iterator::{Handle, Signals};

    use super::{ResizeCallback, ResizeNotifier};

    /// A [`ResizeNotifier`] driven by SIGWINCH.
    ///
    /// Subscribing spawns a signal-iterator thread that invokes the
    /// callback once per delivered signal. Dropping the notifier closes
    /// the iterator and joins the thread.
    #[derive(Debug, Default)]
    pub struct SigwinchNotifier {
        handle: Option<Handle>,
        thread: Option<JoinHandle<()>>,
    }

    impl SigwinchNotifier {
        /// Create an unsubscribed notifier.
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ResizeNotifier for SigwinchNotifier {
        fn subscribe(&mut self, callback: ResizeCallback) -> io::Result<()> {
            let mut signals = Signals::new([SIGWINCH]).map_err(io::Error::other)?;
            let handle = signals.handle();
            let thread = std::thread::spawn(move || {
                for _ in signals.forever() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("SIGWINCH received");
                    callback();
                }
            });
            self.handle = Some(handle);
            self.thread = Some(thread);
            Ok(())
        }
    }

    impl Drop for SigwinchNotifier {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.close();
            }
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::Arc;
        use std::sync::mpsc;
        use std::time::Duration;

        use super::*;

        #[test]
        fn sigwinch_invokes_callback() {
            let (tx, rx) = mpsc::channel::<()>();
            let mut notifier = SigwinchNotifier::new();
            notifier
                .subscribe(Arc::new(move || {
                    let _ = tx.send(());
                }))
                .unwrap();
            signal_hook::low_level::raise(SIGWINCH).unwrap();
            rx.recv_timeout(Duration::from_secs(5))
                .expect("resize callback not delivered");
        }
    }
}
