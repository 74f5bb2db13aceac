//! Seams to the outside world: property store, IPC registry and transport,
//! shutdown token.

pub mod properties;
pub mod registry;
pub mod shutdown;
