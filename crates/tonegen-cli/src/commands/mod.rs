//! CLI command implementations.

pub mod bundle;
pub mod generators;
pub mod preview;
pub mod render;
