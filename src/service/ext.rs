//! Extension service object, attached into the main handle's extension slot.

use std::sync::Arc;

use crate::core::errors::{PhdError, Result};
use crate::hints::manager::HintManager;
use crate::platform::registry::IpcService;

/// Interface identifier of the extension service.
pub const POWER_EXT_DESCRIPTOR: &str = "powerhint.IPowerExt";

/// Second IPC-addressable object; reachable through the main handle's
/// extension slot, never registered independently.
pub struct PowerExtService {
    manager: Arc<HintManager>,
}

impl PowerExtService {
    /// Extension sharing ownership of `manager`.
    #[must_use]
    pub fn new(manager: Arc<HintManager>) -> Self {
        Self { manager }
    }
}

impl IpcService for PowerExtService {
    fn descriptor(&self) -> &'static str {
        POWER_EXT_DESCRIPTOR
    }

    fn dispatch(&self, method: &str, _payload: &str) -> Result<String> {
        match method {
            "interfaceVersion" => Ok("1".to_string()),
            "configPath" => Ok(self.manager.config_path().display().to_string()),
            other => Err(PhdError::UnknownMethod {
                descriptor: POWER_EXT_DESCRIPTOR,
                method: other.to_string(),
            }),
        }
    }
}
