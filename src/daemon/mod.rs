//! Daemon subsystem: bootstrap composition root, deferred activation,
//! signal handling.

pub mod bootstrap;
pub mod deferred;
#[cfg(feature = "daemon")]
pub mod signals;
