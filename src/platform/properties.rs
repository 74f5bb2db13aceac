//! Property/signal store seam and the in-process backend.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::platform::shutdown::ShutdownToken;

/// Outcome of a blocking readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The property reached the expected value.
    Satisfied,
    /// The shutdown token was cancelled before the value arrived.
    Cancelled,
}

/// Read/write/wait access to named string properties.
pub trait PropertyStore: Send + Sync {
    /// Non-blocking read with a fallback value.
    fn get(&self, key: &str, default: &str) -> String;

    /// Set `key`, waking any blocked waiters.
    fn set(&self, key: &str, value: &str);

    /// Block until `key` equals `expected` or `cancel` fires. No timeout:
    /// the moment the platform becomes ready is determined externally and
    /// may occur arbitrarily late.
    fn wait_until(&self, key: &str, expected: &str, cancel: &ShutdownToken) -> WaitOutcome;
}

// Cancellation is observed on a bounded poll: writers wake the condvar, the
// deadline caps how long a cancel can go unnoticed without one.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Mutex + condvar store; the provided backend for the standalone daemon and
/// for tests.
#[derive(Default)]
pub struct InMemoryPropertyStore {
    values: Mutex<HashMap<String, String>>,
    changed: Condvar,
}

impl InMemoryPropertyStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `pairs`.
    #[must_use]
    pub fn seeded<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        {
            let mut values = store.values.lock();
            for (key, value) in pairs {
                values.insert(key.into(), value.into());
            }
        }
        store
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .lock()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
        self.changed.notify_all();
    }

    fn wait_until(&self, key: &str, expected: &str, cancel: &ShutdownToken) -> WaitOutcome {
        let mut values = self.values.lock();
        loop {
            if values.get(key).is_some_and(|value| value == expected) {
                return WaitOutcome::Satisfied;
            }
            if cancel.is_cancelled() {
                return WaitOutcome::Cancelled;
            }
            let _ = self.changed.wait_for(&mut values, CANCEL_POLL);
        }
    }
}
