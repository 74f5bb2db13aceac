//! Main power service object.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::errors::{PhdError, Result};
use crate::hints::manager::HintManager;
use crate::platform::registry::{IpcService, ServiceHandle};

/// Interface identifier of the main power service.
pub const POWER_DESCRIPTOR: &str = "powerhint.IPower";

/// IPC-addressable wrapper around the hint-manager handle, carrying one
/// extension reference slot.
pub struct PowerService {
    manager: Arc<HintManager>,
    extension: RwLock<Option<ServiceHandle>>,
}

impl PowerService {
    /// Service sharing ownership of `manager`; extension slot empty.
    #[must_use]
    pub fn new(manager: Arc<HintManager>) -> Self {
        Self {
            manager,
            extension: RwLock::new(None),
        }
    }
}

impl IpcService for PowerService {
    fn descriptor(&self) -> &'static str {
        POWER_DESCRIPTOR
    }

    fn dispatch(&self, method: &str, _payload: &str) -> Result<String> {
        match method {
            "interfaceVersion" => Ok("1".to_string()),
            "hintEnforcementActive" => Ok(self.manager.is_active().to_string()),
            other => Err(PhdError::UnknownMethod {
                descriptor: POWER_DESCRIPTOR,
                method: other.to_string(),
            }),
        }
    }

    fn attach_extension(&self, ext: ServiceHandle) -> Result<()> {
        let mut slot = self.extension.write();
        if slot.is_some() {
            return Err(PhdError::ExtensionAttach {
                descriptor: POWER_DESCRIPTOR,
                details: "extension already attached".to_string(),
            });
        }
        *slot = Some(ext);
        Ok(())
    }

    fn extension(&self) -> Option<ServiceHandle> {
        self.extension.read().clone()
    }
}
