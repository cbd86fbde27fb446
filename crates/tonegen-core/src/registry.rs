//! Registry of the built-in generators.
//!
//! Each generator is an [`Oscillator`] preset published under a stable id and
//! a globally unique plugin URI. The plugin adapter resolves URIs through the
//! registry; the CLI resolves ids.
//!
//! # Example
//!
//! ```rust
//! use tonegen_core::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::new();
//! for generator in registry.all_generators() {
//!     println!("{}: {}", generator.id, generator.uri);
//! }
//!
//! let mut osc = registry.create("squargen", 48000.0).unwrap();
//! let mut block = [0.0f32; 64];
//! osc.process_block(220.0, -6.0, &mut block);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::oscillator::{Oscillator, Waveform};

/// Range and default of a control port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    /// Lowest value the host should offer.
    pub min: f32,
    /// Highest value the host should offer.
    pub max: f32,
    /// Value used when the host has not bound the port.
    pub default: f32,
}

/// Frequency port range shared by the built-in generators, in Hz.
pub const FREQUENCY_RANGE: ControlRange = ControlRange {
    min: 1.0,
    max: 20000.0,
    default: 440.0,
};

/// Amplitude port range shared by the built-in generators, in dB.
pub const AMPLITUDE_RANGE: ControlRange = ControlRange {
    min: -80.0,
    max: 20.0,
    default: -18.0,
};

/// Describes a generator in the registry.
#[derive(Debug, Clone)]
pub struct GeneratorDescriptor {
    /// Unique identifier (lowercase, no spaces).
    pub id: &'static str,
    /// Globally unique plugin URI.
    pub uri: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Waveform the generator produces.
    pub waveform: Waveform,
    /// Snap threshold of the frequency and amplitude smoothers.
    pub smoothing_limit: f32,
    /// Frequency control port, in Hz.
    pub frequency: ControlRange,
    /// Amplitude control port, in dB.
    pub amplitude: ControlRange,
}

impl GeneratorDescriptor {
    /// Create an oscillator configured like this generator.
    pub fn create(&self, sample_rate: f32) -> Oscillator {
        Oscillator::with_smoothing(self.waveform, sample_rate, self.smoothing_limit)
    }
}

/// Registry of all available generators.
pub struct GeneratorRegistry {
    entries: Vec<GeneratorDescriptor>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorRegistry {
    /// Create a registry with the built-in generators registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(2),
        };
        registry.register_builtin_generators();
        registry
    }

    fn register_builtin_generators(&mut self) {
        self.register(GeneratorDescriptor {
            id: "singen",
            uri: "urn:ardour:singen",
            name: "Sine Generator",
            description: "Sine-wave oscillator with smoothed frequency and amplitude",
            waveform: Waveform::Sine,
            smoothing_limit: 0.02,
            frequency: FREQUENCY_RANGE,
            amplitude: AMPLITUDE_RANGE,
        });

        self.register(GeneratorDescriptor {
            id: "squargen",
            uri: "urn:ardour:squargen",
            name: "Square Generator",
            description: "Band-limited square-wave oscillator built from odd harmonics",
            waveform: Waveform::Square,
            smoothing_limit: 0.2,
            frequency: FREQUENCY_RANGE,
            amplitude: AMPLITUDE_RANGE,
        });
    }

    /// Register a generator. Lookups return the first entry with a matching
    /// id or URI.
    pub fn register(&mut self, descriptor: GeneratorDescriptor) {
        self.entries.push(descriptor);
    }

    /// All registered generators, in registration order.
    pub fn all_generators(&self) -> impl Iterator<Item = &GeneratorDescriptor> {
        self.entries.iter()
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generator at registration `index`.
    pub fn get(&self, index: usize) -> Option<&GeneratorDescriptor> {
        self.entries.get(index)
    }

    /// Look up a generator by id.
    pub fn descriptor(&self, id: &str) -> Option<&GeneratorDescriptor> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Look up a generator by plugin URI.
    pub fn descriptor_by_uri(&self, uri: &str) -> Option<&GeneratorDescriptor> {
        self.entries.iter().find(|d| d.uri == uri)
    }

    /// Create the generator `id` at `sample_rate`.
    pub fn create(&self, id: &str, sample_rate: f32) -> Option<Oscillator> {
        let descriptor = self.descriptor(id)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(id, sample_rate, "creating generator");
        Some(descriptor.create(sample_rate))
    }

    /// Create the generator registered under plugin `uri` at `sample_rate`.
    pub fn create_by_uri(&self, uri: &str, sample_rate: f32) -> Option<Oscillator> {
        let descriptor = self.descriptor_by_uri(uri)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(uri, sample_rate, "creating generator");
        Some(descriptor.create(sample_rate))
    }
}
