//! Service construction and wiring.

use std::sync::Arc;

use tracing::debug;

use crate::core::errors::Result;
use crate::hints::manager::HintManager;
use crate::platform::registry::{IpcRegistry, IpcService, SchedulingPolicy, ServiceHandle};
use crate::service::ext::PowerExtService;
use crate::service::power::PowerService;

// High priority, non-realtime: hint dispatch latency matters, but the
// services must not starve the rest of the system.
const DISPATCH_NICENESS: i32 = -20;

/// Construct the main and extension service objects, request their dispatch
/// priority, and attach the extension into the main handle's slot.
///
/// Attachment happens before the main handle is ever published; a caller
/// discovering the service may immediately depend on the combined interface,
/// so there is no degraded mode without the extension wired.
pub fn build(
    registry: &dyn IpcRegistry,
    manager: &Arc<HintManager>,
) -> Result<(ServiceHandle, ServiceHandle)> {
    let main: ServiceHandle = Arc::new(PowerService::new(Arc::clone(manager)));
    registry.set_scheduling_priority(&main, SchedulingPolicy::Normal, DISPATCH_NICENESS);

    let ext: ServiceHandle = Arc::new(PowerExtService::new(Arc::clone(manager)));
    registry.set_scheduling_priority(&ext, SchedulingPolicy::Normal, DISPATCH_NICENESS);

    registry.set_extension(&main, Arc::clone(&ext))?;
    debug!(
        host = main.descriptor(),
        ext = ext.descriptor(),
        "extension attached"
    );
    Ok((main, ext))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use super::build;
    use crate::hints::manager::HintManager;
    use crate::platform::registry::{IpcService, LocalRegistry};
    use crate::service::ext::POWER_EXT_DESCRIPTOR;
    use crate::service::power::POWER_DESCRIPTOR;

    #[test]
    fn build_links_extension_into_main_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("powerhint.json");
        fs::write(
            &path,
            r#"{ "Nodes": [{ "Name": "N", "Path": "/a", "Values": ["1"] }] }"#,
        )
        .expect("write fixture");
        let manager = HintManager::load(&path, false).expect("valid config");

        let registry = LocalRegistry::new();
        let (main, ext) = build(&registry, &manager).expect("build services");
        assert_eq!(main.descriptor(), POWER_DESCRIPTOR);
        assert_eq!(ext.descriptor(), POWER_EXT_DESCRIPTOR);
        let attached = main.extension().expect("extension wired");
        assert_eq!(attached.descriptor(), POWER_EXT_DESCRIPTOR);
        // The extension is reachable through the slot only, and nothing is
        // published yet; registration is a later bootstrap step.
        assert!(ext.extension().is_none());
        assert!(!registry.has_service("powerhint.IPower/default"));
    }
}
