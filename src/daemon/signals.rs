//! Signal wiring: SIGTERM/SIGINT cancel the shutdown token.

use std::io;
use std::sync::Arc;
use std::thread;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::info;

use crate::platform::shutdown::ShutdownHandle;

/// Install the termination-signal listener.
///
/// The listener thread cancels `handle` on the first SIGTERM/SIGINT and then
/// exits; teardown from there is the shutdown token's business.
pub fn install(handle: Arc<ShutdownHandle>) -> io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            info!(signal, "termination signal received, shutting down");
            handle.shutdown();
        }
    });
    Ok(())
}
