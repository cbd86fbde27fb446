//! Block-processed tone generators.
//!
//! [`Oscillator`] is the single component behind both plugins: a phase
//! accumulator, two block-rate smoothers (frequency and amplitude) and, for
//! the square waveform, a reusable [`HarmonicTable`].
//!
//! Per block:
//!
//! 1. The raw frequency and amplitude are passed through the smoothers once.
//! 2. The amplitude is mapped to a linear coefficient with [`db_to_coeff`].
//! 3. Every sample of the output is synthesized from the current phase, then
//!    the phase advances by `frequency / sample_rate`.
//!
//! Frequency and amplitude are constant within a block; interpolation happens
//! at block granularity only.
//!
//! # Example
//!
//! ```rust
//! use tonegen_core::{Oscillator, Waveform};
//!
//! let mut osc = Oscillator::with_smoothing(Waveform::Square, 48000.0, 0.2);
//! let mut block = [0.0f32; 256];
//! osc.process_block(440.0, -12.0, &mut block);
//! assert!(osc.phase() < 1.0);
//! ```

use core::f32::consts::TAU;
use libm::{floor, sinf};

use crate::harmonics::{HarmonicTable, MIN_FREQUENCY};
use crate::math::db_to_coeff;
use crate::param::BlockSmoother;

/// Waveform produced by an [`Oscillator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure sinusoid.
    #[default]
    Sine,
    /// Band-limited square built from odd harmonics.
    Square,
}

impl Waveform {
    /// Lowercase name of the waveform.
    pub const fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
        }
    }
}

/// Immutable copy of an oscillator's smoothed parameters and phase.
///
/// Taken at a block boundary; this is all the preview renderer reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSnapshot {
    /// Waveform of the oscillator.
    pub waveform: Waveform,
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Smoothed frequency in Hz.
    pub frequency: f32,
    /// Smoothed amplitude in dB.
    pub amplitude_db: f32,
    /// Phase at the end of the last block, in `[0, 1)`.
    pub phase: f32,
}

/// A mono tone generator with block-rate parameter smoothing.
///
/// Owns all of its state; several instances never interfere with each
/// other's smoothing history.
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Waveform type
    waveform: Waveform,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Current phase position [0.0, 1.0), accumulated in f64
    phase: f64,
    /// Smoothed frequency in Hz
    frequency: BlockSmoother,
    /// Smoothed amplitude in dB
    amplitude_db: BlockSmoother,
    /// Odd-harmonic coefficients, square waveform only
    harmonics: HarmonicTable,
}

impl Oscillator {
    /// Create an oscillator without smoothing: every block uses the raw
    /// frequency and amplitude it is given.
    pub fn new(waveform: Waveform, sample_rate: f32) -> Self {
        Self::build(waveform, sample_rate, f32::INFINITY)
    }

    /// Create an oscillator whose frequency and amplitude are smoothed with
    /// snap threshold `limit` (see [`BlockSmoother`]).
    pub fn with_smoothing(waveform: Waveform, sample_rate: f32, limit: f32) -> Self {
        Self::build(waveform, sample_rate, limit)
    }

    fn build(waveform: Waveform, sample_rate: f32, limit: f32) -> Self {
        Self {
            waveform,
            sample_rate,
            phase: 0.0,
            frequency: BlockSmoother::new(limit, sample_rate),
            amplitude_db: BlockSmoother::new(limit, sample_rate),
            harmonics: HarmonicTable::new(),
        }
    }

    /// Enable smoothing with threshold `limit`, or disable it with `None`.
    ///
    /// The smoothing history is kept.
    pub fn set_smoothing(&mut self, limit: Option<f32>) {
        let limit = limit.unwrap_or(f32::INFINITY);
        let freq = self.frequency.clone();
        let amp = self.amplitude_db.clone();

        self.frequency = BlockSmoother::new(limit, self.sample_rate);
        self.amplitude_db = BlockSmoother::new(limit, self.sample_rate);
        if freq.is_primed() {
            self.frequency.set_immediate(freq.get());
        }
        if amp.is_primed() {
            self.amplitude_db.set_immediate(amp.get());
        }
    }

    /// Snap threshold in use, or `None` when smoothing is off.
    pub fn smoothing(&self) -> Option<f32> {
        let limit = self.frequency.limit();
        limit.is_finite().then_some(limit)
    }

    /// Get the waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Get the sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set the sample rate and recalculate the smoothing coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.frequency.set_sample_rate(sample_rate);
        self.amplitude_db.set_sample_rate(sample_rate);
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        // A phase just below 1.0 can round up to 1.0 in f32.
        let phase = self.phase as f32;
        if phase < 1.0 { phase } else { 0.0 }
    }

    /// Set the phase directly. Wrapped into `[0, 1)`.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = if phase.is_finite() {
            fract(f64::from(phase))
        } else {
            0.0
        };
    }

    /// Smoothed frequency of the last block, in Hz.
    pub fn smoothed_frequency(&self) -> f32 {
        self.frequency.get()
    }

    /// Smoothed amplitude of the last block, in dB.
    pub fn smoothed_amplitude_db(&self) -> f32 {
        self.amplitude_db.get()
    }

    /// Harmonics summed in the last square block (0 for sine).
    pub fn harmonic_count(&self) -> usize {
        match self.waveform {
            Waveform::Sine => 0,
            Waveform::Square => self.harmonics.harmonic_count(),
        }
    }

    /// Reset phase and smoothing history.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.frequency.reset();
        self.amplitude_db.reset();
    }

    /// Copy of the smoothed parameters and phase.
    pub fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            waveform: self.waveform,
            sample_rate: self.sample_rate,
            frequency: self.frequency.get(),
            amplitude_db: self.amplitude_db.get(),
            phase: self.phase(),
        }
    }

    /// Fill `output` with one block of samples.
    ///
    /// # Arguments
    /// * `frequency` - Raw frequency control value in Hz
    /// * `amplitude_db` - Raw amplitude control value in dB
    /// * `output` - Buffer to overwrite
    ///
    /// Never allocates. Frequencies at or below zero run at
    /// [`MIN_FREQUENCY`]; non-finite control values are ignored.
    pub fn process_block(&mut self, frequency: f32, amplitude_db: f32, output: &mut [f32]) {
        let freq = self.frequency.next(frequency).max(MIN_FREQUENCY);
        let amp = db_to_coeff(self.amplitude_db.next(amplitude_db));

        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            output.fill(0.0);
            return;
        }

        // Only the fractional part of the increment moves the phase.
        let inc = fract(f64::from(freq) / f64::from(self.sample_rate));

        match self.waveform {
            Waveform::Sine => {
                for sample in output.iter_mut() {
                    *sample = amp * sinf(TAU * self.phase as f32);
                    self.advance_phase(inc);
                }
            }
            Waveform::Square => {
                self.harmonics.prepare_for(self.sample_rate, freq);
                let amp = f64::from(amp);
                for sample in output.iter_mut() {
                    *sample = (amp * self.harmonics.sample(self.phase)) as f32;
                    self.advance_phase(inc);
                }
            }
        }
    }

    #[inline]
    fn advance_phase(&mut self, inc: f64) {
        self.phase += inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }
}

/// Fractional part, in `[0, 1)`.
#[inline]
fn fract(x: f64) -> f64 {
    let f = x - floor(x);
    if f < 1.0 { f } else { 0.0 }
}
