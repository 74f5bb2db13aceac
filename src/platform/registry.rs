//! Platform IPC seam: service objects, the registry contract, and the
//! in-process request/reply transport with its single-threaded dispatch loop.

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::core::errors::{PhdError, Result};
use crate::platform::shutdown::ShutdownToken;

/// Shared reference to an IPC-addressable service object.
pub type ServiceHandle = Arc<dyn IpcService>;

/// An object callable over the registry transport.
pub trait IpcService: Send + Sync {
    /// Stable interface identifier.
    fn descriptor(&self) -> &'static str;

    /// Handle one request. Dispatch errors travel back to the caller.
    fn dispatch(&self, method: &str, payload: &str) -> Result<String>;

    /// Attach an extension object. Only hosts with an extension slot accept one.
    fn attach_extension(&self, _ext: ServiceHandle) -> Result<()> {
        Err(PhdError::ExtensionAttach {
            descriptor: self.descriptor(),
            details: "no extension slot".to_string(),
        })
    }

    /// The attached extension, if any.
    fn extension(&self) -> Option<ServiceHandle> {
        None
    }
}

/// Non-realtime scheduling classes a service may request for its dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// Standard time-sharing; priority expressed as niceness.
    Normal,
    /// Batch scheduling.
    Batch,
}

/// Why the dispatch loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The shutdown token was cancelled; orderly exit.
    Shutdown,
    /// The request intake disconnected; unexpected in normal operation.
    Disconnected,
}

/// Registration and dispatch contract of the platform IPC layer.
pub trait IpcRegistry: Send + Sync {
    /// Publish `handle` under `instance`. Exactly one publication per instance.
    fn add_service(&self, handle: ServiceHandle, instance: &str) -> Result<()>;

    /// Attach `ext` into `host`'s extension slot.
    fn set_extension(&self, host: &ServiceHandle, ext: ServiceHandle) -> Result<()>;

    /// Request a scheduling class for `handle`'s dispatch. Best-effort.
    fn set_scheduling_priority(&self, handle: &ServiceHandle, policy: SchedulingPolicy, niceness: i32);

    /// Serve requests on the calling thread until shutdown or intake loss.
    /// No additional worker threads are spawned.
    fn serve(&self, cancel: &ShutdownToken) -> ServeOutcome;
}

struct RegistryRequest {
    instance: String,
    method: String,
    payload: String,
    reply: Sender<Result<String>>,
}

struct SchedRequest {
    descriptor: &'static str,
    policy: SchedulingPolicy,
    niceness: i32,
}

/// In-process registry and transport. All requests are processed by the one
/// thread that called [`IpcRegistry::serve`].
pub struct LocalRegistry {
    services: RwLock<HashMap<String, ServiceHandle>>,
    intake: Receiver<RegistryRequest>,
    connect: Mutex<Option<Sender<RegistryRequest>>>,
    sched: Mutex<Vec<SchedRequest>>,
}

impl LocalRegistry {
    /// Registry with an open intake and no published services.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            services: RwLock::new(HashMap::new()),
            intake: rx,
            connect: Mutex::new(Some(tx)),
            sched: Mutex::new(Vec::new()),
        }
    }

    /// A client handle for calling published services, or `None` once the
    /// intake has been closed.
    #[must_use]
    pub fn client(&self) -> Option<RegistryClient> {
        self.connect
            .lock()
            .as_ref()
            .map(|tx| RegistryClient { tx: tx.clone() })
    }

    /// Stop handing out client connections. Once existing clients drop, the
    /// dispatch loop returns [`ServeOutcome::Disconnected`].
    pub fn close_intake(&self) {
        self.connect.lock().take();
    }

    /// Whether `instance` is currently published.
    #[must_use]
    pub fn has_service(&self, instance: &str) -> bool {
        self.services.read().contains_key(instance)
    }

    fn handle(&self, request: &RegistryRequest) -> Result<String> {
        let service = self
            .services
            .read()
            .get(&request.instance)
            .cloned()
            .ok_or_else(|| PhdError::ServiceNotFound {
                instance: request.instance.clone(),
            })?;
        service.dispatch(&request.method, &request.payload)
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IpcRegistry for LocalRegistry {
    fn add_service(&self, handle: ServiceHandle, instance: &str) -> Result<()> {
        let mut services = self.services.write();
        if services.contains_key(instance) {
            return Err(PhdError::Registration {
                instance: instance.to_string(),
                details: "instance already published".to_string(),
            });
        }
        debug!(instance, descriptor = handle.descriptor(), "service published");
        services.insert(instance.to_string(), handle);
        Ok(())
    }

    fn set_extension(&self, host: &ServiceHandle, ext: ServiceHandle) -> Result<()> {
        host.attach_extension(ext)
    }

    fn set_scheduling_priority(&self, handle: &ServiceHandle, policy: SchedulingPolicy, niceness: i32) {
        // The in-process transport shares one dispatch thread across all
        // services; the request is recorded and surfaced in logs. Applying a
        // kernel scheduling class is a platform backend's concern.
        self.sched.lock().push(SchedRequest {
            descriptor: handle.descriptor(),
            policy,
            niceness,
        });
    }

    fn serve(&self, cancel: &ShutdownToken) -> ServeOutcome {
        for request in self.sched.lock().iter() {
            debug!(
                descriptor = request.descriptor,
                policy = ?request.policy,
                niceness = request.niceness,
                "dispatch scheduling class requested"
            );
        }
        info!("request dispatch loop entered");
        loop {
            select! {
                recv(self.intake) -> message => match message {
                    Ok(request) => {
                        let result = self.handle(&request);
                        if let Err(err) = &result {
                            debug!(instance = %request.instance, method = %request.method, %err, "request failed");
                        }
                        // A vanished caller is its own problem.
                        let _ = request.reply.send(result);
                    }
                    Err(_) => return ServeOutcome::Disconnected,
                },
                recv(cancel.channel()) -> _ => {
                    info!("shutdown requested, leaving dispatch loop");
                    return ServeOutcome::Shutdown;
                }
            }
        }
    }
}

/// Client side of the in-process transport.
#[derive(Clone)]
pub struct RegistryClient {
    tx: Sender<RegistryRequest>,
}

impl RegistryClient {
    /// Call `method` on the service published under `instance`.
    pub fn call(&self, instance: &str, method: &str, payload: &str) -> Result<String> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(RegistryRequest {
                instance: instance.to_string(),
                method: method.to_string(),
                payload: payload.to_string(),
                reply: reply_tx,
            })
            .map_err(|_| PhdError::ChannelClosed {
                component: "registry intake",
            })?;
        reply_rx.recv().map_err(|_| PhdError::ChannelClosed {
            component: "registry reply",
        })?
    }
}
