//! Interval-sampling monitor for extended-profile changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::select;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::monitor::Monitor;
use crate::platform::properties::PropertyStore;
use crate::platform::shutdown::ShutdownToken;

/// Property carrying the currently requested extended (ADPF) profile.
pub const ADPF_PROFILE_PROPERTY: &str = "powerhintd.adpf.profile";

const SAMPLE_INTERVAL: Duration = Duration::from_secs(2);

/// Samples the extended-profile property and logs transitions.
///
/// Starts at most once per instance; the sampling thread exits when the
/// shutdown token is cancelled.
pub struct ProfileMonitor {
    store: Arc<dyn PropertyStore>,
    cancel: ShutdownToken,
    interval: Duration,
    started: AtomicBool,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl ProfileMonitor {
    /// Monitor over `store`, bound to `cancel`, with the default interval.
    #[must_use]
    pub fn new(store: Arc<dyn PropertyStore>, cancel: ShutdownToken) -> Self {
        Self {
            store,
            cancel,
            interval: SAMPLE_INTERVAL,
            started: AtomicBool::new(false),
            thread: Mutex::new(None),
        }
    }

    /// Override the sampling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether a start has taken effect.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Monitor for ProfileMonitor {
    fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("profile monitor already started");
            return;
        }
        let store = Arc::clone(&self.store);
        let cancel = self.cancel.clone();
        let interval = self.interval;
        let handle = thread::spawn(move || sample_loop(store.as_ref(), &cancel, interval));
        *self.thread.lock() = Some(handle);
        info!("profile monitor started");
    }
}

fn sample_loop(store: &dyn PropertyStore, cancel: &ShutdownToken, interval: Duration) {
    let mut current = store.get(ADPF_PROFILE_PROPERTY, "");
    loop {
        select! {
            recv(cancel.channel()) -> _ => {
                debug!("profile monitor stopping");
                return;
            }
            default(interval) => {
                let next = store.get(ADPF_PROFILE_PROPERTY, "");
                if next != current {
                    info!(from = %current, to = %next, "extended profile changed");
                    current = next;
                }
            }
        }
    }
}
