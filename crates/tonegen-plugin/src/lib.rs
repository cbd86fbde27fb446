//! LV2 plugin adapter for the tonegen generators.
//!
//! This crate exposes the two generators of `tonegen-core` to LV2 hosts. One
//! shared library carries both plugins; the host picks them through the
//! `lv2_descriptor` entry point.
//!
//! # Architecture
//!
//! The adapter maps tonegen types directly to LV2 concepts:
//!
//! | tonegen | LV2 |
//! |---------|-----|
//! | `GeneratorDescriptor::uri` | plugin URI |
//! | [`PortIndex`] | port index (0 = frequency, 1 = amplitude, 2 = output) |
//! | [`GeneratorInstance::process`] | `run` |
//! | [`GeneratorInstance::activate`] | `activate` |
//! | [`SharedSnapshot`] + `render_preview` | inline display `render` |
//! | [`DisplayCapability`] | `queue_draw` host feature |
//!
//! | Index | URI |
//! |-------|-----|
//! | 0 | `urn:ardour:singen` |
//! | 1 | `urn:ardour:squargen` |
//!
//! # Bundle
//!
//! Hosts also need Turtle metadata next to the library. [`manifest`]
//! generates it from the registry; `tonegen bundle <dir>` writes it out.

pub mod error;
pub mod instance;
pub mod lv2;
pub mod manifest;
pub mod ports;
pub mod shared;

pub use error::PluginError;
pub use instance::GeneratorInstance;
pub use lv2::{DisplayCapability, lv2_descriptor};
pub use ports::PortIndex;
pub use shared::SharedSnapshot;
