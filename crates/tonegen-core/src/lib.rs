//! Tonegen Core - oscillator DSP for the tonegen generators
//!
//! This crate holds everything the sine and square generators compute, with
//! no dependency on any plugin host. It is designed for real-time audio
//! processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Generators
//!
//! - [`Oscillator`] - Block-processed sine or band-limited square generator
//! - [`Waveform`] - Which of the two the oscillator produces
//! - [`WaveSnapshot`] - Smoothed parameters and phase at a block boundary
//!
//! ## Parameter Smoothing
//!
//! - [`BlockSmoother`] - One low-pass step per block, snapping within a limit
//!
//! ## Square Synthesis
//!
//! - [`HarmonicTable`] - Odd-harmonic coefficients summed by phasor rotation
//! - [`harmonic_count`] - Harmonics below Nyquist, capped at [`MAX_HARMONICS`]
//!
//! ## Registry
//!
//! - [`GeneratorRegistry`] - The built-in `singen` and `squargen` presets,
//!   looked up by id or plugin URI
//!
//! ## Preview
//!
//! - [`render_preview`] - Draws a [`WaveSnapshot`] into an ARGB32 [`Surface`]
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_coeff`], [`db_to_linear`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tonegen-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use tonegen_core::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::new();
//! let mut osc = registry.create("singen", 48000.0).unwrap();
//!
//! let mut block = vec![0.0f32; 512];
//! osc.process_block(440.0, -6.0, &mut block);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod harmonics;
pub mod math;
pub mod oscillator;
pub mod param;
pub mod preview;
pub mod registry;

// Re-export main types at crate root
pub use harmonics::{
    HarmonicTable, MAX_HARMONICS, MIN_FREQUENCY, harmonic_coefficient, harmonic_count,
};
pub use math::{
    CEILING_DB, MAX_AMPLITUDE_COEFF, SILENCE_FLOOR_DB, db_to_coeff, db_to_linear,
    phase_increment, wrap_phase,
};
pub use oscillator::{Oscillator, WaveSnapshot, Waveform};
pub use param::{BlockSmoother, SMOOTHING_RATE, smooth_step, smoothing_coeff};
pub use preview::{PREVIEW_HEIGHT, Surface, preview_trace, render_preview};
pub use registry::{
    AMPLITUDE_RANGE, ControlRange, FREQUENCY_RANGE, GeneratorDescriptor, GeneratorRegistry,
};
