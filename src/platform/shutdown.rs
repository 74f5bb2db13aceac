//! Cooperative shutdown: a closed-channel broadcast token.
//!
//! The handle side cancels; every token clone observes the cancellation,
//! either by polling or by selecting on [`ShutdownToken::channel`] inside a
//! `crossbeam_channel::select!` loop.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use parking_lot::Mutex;

/// Create a linked handle/token pair.
#[must_use]
pub fn shutdown_pair() -> (ShutdownHandle, ShutdownToken) {
    let (tx, rx) = bounded::<()>(0);
    (
        ShutdownHandle {
            tx: Mutex::new(Some(tx)),
        },
        ShutdownToken { rx },
    )
}

/// Cancellation side. Dropping the handle also cancels.
pub struct ShutdownHandle {
    tx: Mutex<Option<Sender<()>>>,
}

impl ShutdownHandle {
    /// Cancel every linked token. Idempotent.
    pub fn shutdown(&self) {
        self.tx.lock().take();
    }
}

/// Observer side; cheap to clone and share across threads.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: Receiver<()>,
}

impl ShutdownToken {
    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Channel for `select!` integration; becomes ready once cancelled.
    ///
    /// The channel never carries messages; readiness always means the
    /// handle was dropped or [`ShutdownHandle::shutdown`] was called.
    #[must_use]
    pub fn channel(&self) -> &Receiver<()> {
        &self.rx
    }
}
