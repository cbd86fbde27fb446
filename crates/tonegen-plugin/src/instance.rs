//! Audio-side state of one plugin instance.
//!
//! [`GeneratorInstance`] is what the C entry points drive from the audio
//! thread once raw port pointers have been turned into `Option`s. It has no
//! knowledge of the host and can be exercised directly in tests.

use tonegen_core::{
    GeneratorDescriptor, GeneratorRegistry, Oscillator, SILENCE_FLOOR_DB, WaveSnapshot,
};

use crate::error::{PluginError, Result};

/// A generator bound to a sample rate, ready to run blocks.
#[derive(Debug, Clone)]
pub struct GeneratorInstance {
    descriptor: GeneratorDescriptor,
    oscillator: Oscillator,
}

impl GeneratorInstance {
    /// Create the generator published under plugin `uri`.
    ///
    /// Fails if the URI is unknown or the sample rate is not finite and
    /// positive.
    pub fn new(uri: &str, sample_rate: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(PluginError::InvalidSampleRate(sample_rate));
        }
        let registry = GeneratorRegistry::new();
        let descriptor = registry
            .descriptor_by_uri(uri)
            .ok_or_else(|| PluginError::UnknownUri(uri.to_owned()))?
            .clone();
        let oscillator = descriptor.create(sample_rate as f32);

        tracing::debug!(id = descriptor.id, sample_rate, "generator instance created");

        Ok(Self {
            descriptor,
            oscillator,
        })
    }

    /// Registry entry this instance was created from.
    pub fn descriptor(&self) -> &GeneratorDescriptor {
        &self.descriptor
    }

    /// Reset phase and smoothing history.
    pub fn activate(&mut self) {
        self.oscillator.reset();
    }

    /// Run one block.
    ///
    /// `frequency` and `amplitude_db` are the host's control values, `None`
    /// when the port is unbound: frequency then falls back to the descriptor
    /// default and amplitude to silence. With no `output` buffer nothing is
    /// synthesized and the state does not advance.
    ///
    /// Returns `true` if a block was produced.
    pub fn process(
        &mut self,
        frequency: Option<f32>,
        amplitude_db: Option<f32>,
        output: Option<&mut [f32]>,
    ) -> bool {
        let Some(output) = output else {
            return false;
        };
        let frequency = frequency.unwrap_or(self.descriptor.frequency.default);
        let amplitude_db = amplitude_db.unwrap_or(SILENCE_FLOOR_DB);
        self.oscillator.process_block(frequency, amplitude_db, output);
        true
    }

    /// Snapshot of the oscillator after the last block.
    pub fn snapshot(&self) -> WaveSnapshot {
        self.oscillator.snapshot()
    }

    /// Snapshot to show before the first block: descriptor defaults at
    /// phase 0.
    pub fn initial_snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            waveform: self.descriptor.waveform,
            sample_rate: self.oscillator.sample_rate(),
            frequency: self.descriptor.frequency.default,
            amplitude_db: self.descriptor.amplitude.default,
            phase: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonegen_core::Waveform;

    #[test]
    fn rejects_bad_sample_rates() {
        for sr in [0.0, -48000.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GeneratorInstance::new("urn:ardour:singen", sr),
                Err(PluginError::InvalidSampleRate(_))
            ));
        }
    }

    #[test]
    fn rejects_unknown_uri() {
        let err = GeneratorInstance::new("urn:ardour:sawgen", 48000.0).unwrap_err();
        assert!(matches!(err, PluginError::UnknownUri(ref uri) if uri == "urn:ardour:sawgen"));
    }

    #[test]
    fn unbound_amplitude_is_silent() {
        let mut inst = GeneratorInstance::new("urn:ardour:squargen", 48000.0).unwrap();
        let mut out = [1.0f32; 64];
        assert!(inst.process(Some(440.0), None, Some(&mut out)));
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn unbound_frequency_uses_default() {
        let mut inst = GeneratorInstance::new("urn:ardour:singen", 48000.0).unwrap();
        let mut out = [0.0f32; 64];
        inst.process(None, Some(0.0), Some(&mut out));
        assert_eq!(inst.snapshot().frequency, 440.0);
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn unbound_output_does_nothing() {
        let mut inst = GeneratorInstance::new("urn:ardour:singen", 48000.0).unwrap();
        assert!(!inst.process(Some(1000.0), Some(0.0), None));
        assert_eq!(inst.snapshot().phase, 0.0);
    }

    #[test]
    fn activate_resets_phase_and_smoothing() {
        let mut inst = GeneratorInstance::new("urn:ardour:singen", 48000.0).unwrap();
        let mut out = [0.0f32; 100];
        inst.process(Some(440.0), Some(0.0), Some(&mut out));
        inst.process(Some(880.0), Some(0.0), Some(&mut out));
        assert!(inst.snapshot().frequency < 880.0);

        inst.activate();
        assert_eq!(inst.snapshot().phase, 0.0);
        inst.process(Some(880.0), Some(0.0), Some(&mut out));
        assert_eq!(inst.snapshot().frequency, 880.0);
    }

    #[test]
    fn initial_snapshot_uses_defaults() {
        let inst = GeneratorInstance::new("urn:ardour:squargen", 96000.0).unwrap();
        let snap = inst.initial_snapshot();
        assert_eq!(snap.waveform, Waveform::Square);
        assert_eq!(snap.sample_rate, 96000.0);
        assert_eq!(snap.frequency, 440.0);
        assert_eq!(snap.amplitude_db, -18.0);
        assert_eq!(inst.descriptor().id, "squargen");
    }
}
