//! Profile monitoring: launcher gate and the sampling monitor.

mod profile;

pub use profile::{ADPF_PROFILE_PROPERTY, ProfileMonitor};

use std::sync::Arc;

use tracing::debug;

use crate::hints::manager::HintManager;

/// A startable profile monitor with opaque internals.
pub trait Monitor: Send + Sync {
    /// Start the monitor. At most one start takes effect per instance.
    fn start(&self);
}

/// Start `monitor` iff the loaded hint manager carries an extended-profile
/// feature set. The flag is read once, at startup only; it is never
/// re-evaluated later.
pub fn maybe_start(manager: &Arc<HintManager>, monitor: &dyn Monitor) {
    if manager.is_extended_profile_enabled() {
        monitor.start();
    } else {
        debug!("extended profiles disabled, monitor not started");
    }
}
