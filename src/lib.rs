//! Power-hint management daemon: startup orchestration and runtime
//! composition.
//!
//! The crate resolves which hint configuration to load, constructs and
//! registers the externally callable power services in a fixed order, defers
//! activation of hint enforcement until the platform signals readiness,
//! optionally launches a profile monitor, and anchors the process in an
//! indefinite request-serving loop.
//!
//! Hint application itself lives behind [`hints::manager::HintManager`]; the
//! IPC transport is a seam behind [`platform::registry::IpcRegistry`]. The
//! composition root in [`daemon::bootstrap`] threads explicit handles to the
//! components that need them; there are no ambient singletons.

#[cfg(feature = "cli")]
pub mod cli_app;
pub mod core;
pub mod daemon;
pub mod hints;
pub mod monitor;
pub mod platform;
pub mod service;
