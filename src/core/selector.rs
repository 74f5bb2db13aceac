//! Hint-configuration selection: power-plan mapping or named-config lookup.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::platform::properties::PropertyStore;

/// Property holding the active power plan (plan mode).
pub const PLAN_PROPERTY: &str = "powerhintd.plan";
/// Property naming the hint-config file directly (named-config mode).
pub const CONFIG_PROPERTY: &str = "powerhintd.config";

const PLAN_DEFAULT_FILE: &str = "default.json";
const PLAN_POWERSAVE_FILE: &str = "powersave.json";
const PLAN_BALANCED_FILE: &str = "balanced.json";
const PLAN_PERFORMANCE_FILE: &str = "performance.json";
const NAMED_DEFAULT_FILE: &str = "powerhint.json";

/// Which selection strategy the daemon was started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Map the [`PLAN_PROPERTY`] value onto a fixed set of plan files.
    PowerPlan,
    /// Use the [`CONFIG_PROPERTY`] value verbatim as the filename.
    #[default]
    NamedConfig,
}

/// Resolve the hint-config path for `mode` under `base_dir`.
///
/// Never fails: a missing or bogus file is the loader's problem, not ours.
#[must_use]
pub fn resolve_path(mode: SelectionMode, store: &dyn PropertyStore, base_dir: &Path) -> PathBuf {
    let filename = match mode {
        SelectionMode::PowerPlan => plan_filename(&store.get(PLAN_PROPERTY, "")),
        SelectionMode::NamedConfig => store.get(CONFIG_PROPERTY, NAMED_DEFAULT_FILE),
    };
    base_dir.join(filename)
}

fn plan_filename(plan: &str) -> String {
    let filename = match plan {
        // No plan set: the default config, silently.
        "" => PLAN_DEFAULT_FILE,
        "powersave" => PLAN_POWERSAVE_FILE,
        "balanced" => PLAN_BALANCED_FILE,
        "performance" => PLAN_PERFORMANCE_FILE,
        other => {
            warn!(plan = other, "unknown power plan, using default config");
            PLAN_DEFAULT_FILE
        }
    };
    filename.to_string()
}
