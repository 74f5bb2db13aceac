//! Deferred hint activation: wait for platform readiness, then activate once.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::hints::manager::HintManager;
use crate::platform::properties::{PropertyStore, WaitOutcome};
use crate::platform::shutdown::ShutdownToken;

/// Readiness property the platform sets when hint enforcement may begin.
pub const READY_PROPERTY: &str = "powerhintd.init";
/// The single recognized readiness sentinel.
pub const READY_SENTINEL: &str = "1";

/// Spawn the background task that activates hint enforcement once the
/// readiness sentinel appears.
///
/// The wait has no timeout: if the platform never becomes ready the daemon
/// keeps serving ordinary requests with enforcement inactive, which is
/// accepted degraded behavior rather than a fault. Cancelling the shutdown
/// token makes the thread exit without activating.
pub fn spawn(
    store: Arc<dyn PropertyStore>,
    manager: Arc<HintManager>,
    cancel: ShutdownToken,
) -> JoinHandle<()> {
    thread::spawn(move || {
        match store.wait_until(READY_PROPERTY, READY_SENTINEL, &cancel) {
            WaitOutcome::Satisfied => {
                if manager.activate() {
                    info!("platform ready, hint enforcement activated");
                } else {
                    debug!("hint manager was already active");
                }
            }
            WaitOutcome::Cancelled => {
                debug!("shutdown before platform readiness, hints never activated");
            }
        }
    })
}
