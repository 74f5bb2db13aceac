//! Hint-manager handle: load-without-start, one-shot activation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::core::errors::{PhdError, Result};
use crate::hints::config::HintConfig;

/// Shared handle over the parsed hint definitions and enforcement state.
///
/// The handle is `Loaded` after a successful [`HintManager::load`] and
/// becomes `Active` at most once via [`HintManager::activate`]. It is held
/// jointly by the service objects and the deferred initializer for the life
/// of the process.
#[derive(Debug)]
pub struct HintManager {
    config: HintConfig,
    path: PathBuf,
    active: AtomicBool,
}

impl HintManager {
    /// Parse the hint-definition file at `path`.
    ///
    /// With `start = false` the handle stays `Loaded`; enforcement begins
    /// only when [`activate`](Self::activate) is called. Read, parse, or
    /// validation failure is an error; the bootstrap treats it as fatal and
    /// never retries, since a broken config is not a transient condition.
    pub fn load(path: &Path, start: bool) -> Result<Arc<Self>> {
        let raw = fs::read_to_string(path).map_err(|source| PhdError::io(path, source))?;
        let config: HintConfig =
            serde_json::from_str(&raw).map_err(|err| PhdError::HintConfigParse {
                path: path.to_path_buf(),
                details: err.to_string(),
            })?;
        config
            .validate()
            .map_err(|details| PhdError::HintConfigInvalid {
                path: path.to_path_buf(),
                details,
            })?;
        debug!(
            path = %path.display(),
            nodes = config.nodes.len(),
            actions = config.actions.len(),
            "hint config loaded"
        );
        let manager = Arc::new(Self {
            config,
            path: path.to_path_buf(),
            active: AtomicBool::new(false),
        });
        if start {
            manager.activate();
        }
        Ok(manager)
    }

    /// Begin enforcing hints. Returns `true` only for the call that performed
    /// the `Loaded → Active` transition.
    pub fn activate(&self) -> bool {
        let transitioned = !self.active.swap(true, Ordering::SeqCst);
        if transitioned {
            info!(path = %self.path.display(), "hint enforcement active");
        }
        transitioned
    }

    /// Whether enforcement has been activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Whether the loaded config carries an extended-profile (ADPF) feature
    /// set. Read once at startup by the monitor launcher.
    #[must_use]
    pub fn is_extended_profile_enabled(&self) -> bool {
        self.config.has_extended_profiles()
    }

    /// Path the definitions were loaded from.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// The parsed definitions.
    #[must_use]
    pub fn config(&self) -> &HintConfig {
        &self.config
    }
}
