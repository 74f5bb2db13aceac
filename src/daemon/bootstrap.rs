//! Composition root: the linear bootstrap sequence and the serving anchor.
//!
//! Construction order is load-bearing. The hint-manager handle is fully
//! loaded before any service object shares it, the extension is attached
//! before the main handle is published, and the deferred initializer is
//! spawned only after registration completes. By program order, activation
//! can never precede discoverability.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{error, info};

use crate::core::errors::Result;
use crate::core::selector::{self, SelectionMode};
use crate::daemon::deferred;
use crate::hints::manager::HintManager;
use crate::monitor::{self, Monitor};
use crate::platform::properties::PropertyStore;
use crate::platform::registry::{IpcRegistry, IpcService, ServeOutcome, ServiceHandle};
use crate::platform::shutdown::ShutdownToken;
use crate::service::builder;

/// Instance-name suffix under which the main service is published.
const DEFAULT_INSTANCE_SUFFIX: &str = "/default";

/// Everything the bootstrap needs, injected by the caller.
pub struct Deps {
    /// Property/signal store.
    pub store: Arc<dyn PropertyStore>,
    /// Platform IPC registry and transport.
    pub registry: Arc<dyn IpcRegistry>,
    /// Profile monitor, started only if the config enables extended profiles.
    pub monitor: Arc<dyn Monitor>,
    /// Configuration-selection strategy.
    pub selection: SelectionMode,
    /// Directory holding the hint-definition files.
    pub config_dir: PathBuf,
}

/// Handles produced by a completed bootstrap, prior to serving.
pub struct BroughtUp {
    /// The shared hint-manager handle.
    pub manager: Arc<HintManager>,
    /// The registered main service.
    pub main: ServiceHandle,
    /// The attached extension service.
    pub ext: ServiceHandle,
    /// The deferred-activation task.
    pub deferred: JoinHandle<()>,
}

impl std::fmt::Debug for BroughtUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroughtUp")
            .field("manager", &self.manager)
            .field("main", &self.main.descriptor())
            .field("ext", &self.ext.descriptor())
            .field("deferred", &self.deferred)
            .finish()
    }
}

/// Run the sequential bootstrap: resolve → load → build → register →
/// maybe-start monitor → spawn the deferred initializer.
///
/// Any error is a fatal bootstrap condition for the caller to act on; no
/// retry or degraded mode exists. When `Err` is returned before the
/// registration step, nothing has been published.
pub fn bring_up(deps: &Deps, cancel: &ShutdownToken) -> Result<BroughtUp> {
    let path = selector::resolve_path(deps.selection, deps.store.as_ref(), &deps.config_dir);
    info!(path = %path.display(), "hint config resolved");

    // Parse the definitions but do not start enforcement.
    let manager = HintManager::load(&path, false)?;

    let (main, ext) = builder::build(deps.registry.as_ref(), &manager)?;

    let instance = format!("{}{DEFAULT_INSTANCE_SUFFIX}", main.descriptor());
    deps.registry.add_service(Arc::clone(&main), &instance)?;
    info!(%instance, "power service with extension registered");

    monitor::maybe_start(&manager, deps.monitor.as_ref());

    // Spawned strictly after registration, so activation happens-after the
    // service is discoverable.
    let deferred = deferred::spawn(
        Arc::clone(&deps.store),
        Arc::clone(&manager),
        cancel.clone(),
    );

    Ok(BroughtUp {
        manager,
        main,
        ext,
        deferred,
    })
}

/// Bootstrap, then anchor the calling thread in the request dispatch loop.
///
/// Under normal operation this call never returns. `Ok(ServeOutcome::Shutdown)`
/// follows a cancelled token; `Ok(ServeOutcome::Disconnected)` is an
/// unexpected serve return the caller reports as a failure; recreation of
/// the process is the external supervisor's job.
pub fn run(deps: &Deps, cancel: &ShutdownToken) -> Result<ServeOutcome> {
    let brought_up = bring_up(deps, cancel)?;
    let outcome = deps.registry.serve(cancel);
    if outcome == ServeOutcome::Shutdown {
        // Orderly teardown: the deferred task observes the same token.
        if brought_up.deferred.join().is_err() {
            error!("deferred initializer panicked during shutdown");
        }
    }
    // On Disconnected the deferred task stays detached; the process is about
    // to die and the runtime reclaims it.
    Ok(outcome)
}
