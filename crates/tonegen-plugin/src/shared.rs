//! Lock-free hand-off of the wave snapshot from the audio thread to the
//! display thread.
//!
//! Each field is an `f32` bit-cast into an `AtomicU32`. The audio thread
//! publishes after every block; the display thread loads whenever the host
//! asks for a render. Fields are published individually, so a render racing a
//! publish may mix values from two consecutive blocks. The preview only draws
//! a few cycles from those values, which makes such a mix invisible.

use std::sync::atomic::{AtomicU32, Ordering};

use tonegen_core::{Surface, WaveSnapshot, Waveform, render_preview};

/// The most recently published [`WaveSnapshot`] of one plugin instance.
#[derive(Debug)]
pub struct SharedSnapshot {
    /// Waveform of the instance, fixed at creation.
    waveform: Waveform,
    sample_rate: AtomicU32,
    frequency: AtomicU32,
    amplitude_db: AtomicU32,
    phase: AtomicU32,
}

impl SharedSnapshot {
    /// Create a cell holding `initial`.
    pub fn new(initial: &WaveSnapshot) -> Self {
        Self {
            waveform: initial.waveform,
            sample_rate: AtomicU32::new(initial.sample_rate.to_bits()),
            frequency: AtomicU32::new(initial.frequency.to_bits()),
            amplitude_db: AtomicU32::new(initial.amplitude_db.to_bits()),
            phase: AtomicU32::new(initial.phase.to_bits()),
        }
    }

    /// Publish a snapshot (audio thread, lock-free).
    ///
    /// The waveform of `snapshot` is ignored; it cannot change.
    pub fn publish(&self, snapshot: &WaveSnapshot) {
        self.sample_rate
            .store(snapshot.sample_rate.to_bits(), Ordering::Relaxed);
        self.frequency
            .store(snapshot.frequency.to_bits(), Ordering::Relaxed);
        self.amplitude_db
            .store(snapshot.amplitude_db.to_bits(), Ordering::Relaxed);
        self.phase.store(snapshot.phase.to_bits(), Ordering::Release);
    }

    /// Read the latest snapshot (any thread, lock-free).
    pub fn load(&self) -> WaveSnapshot {
        let phase = f32::from_bits(self.phase.load(Ordering::Acquire));
        WaveSnapshot {
            waveform: self.waveform,
            sample_rate: f32::from_bits(self.sample_rate.load(Ordering::Relaxed)),
            frequency: f32::from_bits(self.frequency.load(Ordering::Relaxed)),
            amplitude_db: f32::from_bits(self.amplitude_db.load(Ordering::Relaxed)),
            phase,
        }
    }

    /// Draw the latest snapshot into `surface`.
    pub fn render(&self, width: u32, max_height: u32, surface: &mut Surface) {
        render_preview(&self.load(), width, max_height, surface);
    }
}
