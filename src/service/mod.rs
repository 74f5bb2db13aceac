//! The externally callable service objects and their construction.

pub mod builder;
pub mod ext;
pub mod power;
