//! Additive square-wave synthesis by odd-harmonic summation.
//!
//! A square wave is the Fourier series
//!
//! ```text
//! sum_k  sin(k·π/2) · 2/(k·π) · cos(k·θ)
//! ```
//!
//! where `sin(k·π/2)` is zero for even `k` and alternates `±1` for odd `k`.
//! Truncating the series at the highest harmonic below Nyquist gives a
//! band-limited square with no aliasing.
//!
//! Evaluating `cos(k·θ)` for every harmonic of every sample would cost one
//! transcendental call per harmonic. Instead [`HarmonicTable::sample`]
//! computes `cos θ` and `sin θ` once per sample and walks the harmonics by
//! rotating a phasor through the angle-addition identities:
//!
//! ```text
//! cos((k+1)θ) = cos kθ · cos θ − sin kθ · sin θ
//! sin((k+1)θ) = sin kθ · cos θ + cos kθ · sin θ
//! ```
//!
//! The sum runs in `f64` so that rounding in the rotation stays well below
//! the output resolution even at 800 harmonics.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use libm::{cos, floor, sin};

/// Hard ceiling on the number of harmonics summed per sample.
pub const MAX_HARMONICS: usize = 800;

/// Lowest frequency the generators run at, in Hz.
///
/// Zero, negative, and NaN frequencies are clamped up to this value.
pub const MIN_FREQUENCY: f32 = 0.01;

/// Number of harmonics to sum for `frequency` at `sample_rate`.
///
/// `min(800, floor(sample_rate / (2 × frequency)))`. The frequency is
/// clamped to [`MIN_FREQUENCY`] first, so this never divides by zero.
///
/// # Example
/// ```rust
/// use tonegen_core::harmonic_count;
///
/// assert_eq!(harmonic_count(48000.0, 12000.0), 2);
/// assert_eq!(harmonic_count(48000.0, 0.0), 800);
/// ```
pub fn harmonic_count(sample_rate: f32, frequency: f32) -> usize {
    let frequency = f64::from(frequency.max(MIN_FREQUENCY));
    let count = floor(f64::from(sample_rate) / (2.0 * frequency));
    if count.is_nan() || count < 1.0 {
        0
    } else if count >= MAX_HARMONICS as f64 {
        MAX_HARMONICS
    } else {
        count as usize
    }
}

/// Fourier coefficient of harmonic `index`: `sin(index·π/2) · 2/(index·π)`.
///
/// Index 0 (the DC term) is zero.
#[inline]
pub fn harmonic_coefficient(index: usize) -> f64 {
    if index == 0 {
        return 0.0;
    }
    let k = index as f64;
    sin(k * FRAC_PI_2) * 2.0 / (k * PI)
}

/// Coefficient table for the current harmonic count.
///
/// Holds `count + 1` entries (index 0 is the DC term). Capacity for
/// [`MAX_HARMONICS`] + 1 entries is reserved on construction, and clones
/// reserve the same, so resizing the table from the audio thread never
/// allocates.
#[derive(Debug)]
pub struct HarmonicTable {
    coeffs: Vec<f64>,
}

impl Clone for HarmonicTable {
    fn clone(&self) -> Self {
        let mut coeffs = Vec::with_capacity(MAX_HARMONICS + 1);
        coeffs.extend_from_slice(&self.coeffs);
        Self { coeffs }
    }
}

impl Default for HarmonicTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HarmonicTable {
    /// Create a table with room for [`MAX_HARMONICS`] harmonics, holding only
    /// the DC term.
    pub fn new() -> Self {
        let mut coeffs = Vec::with_capacity(MAX_HARMONICS + 1);
        coeffs.push(0.0);
        Self { coeffs }
    }

    /// Resize the table to hold harmonics `1..=count`.
    ///
    /// `count` is capped at [`MAX_HARMONICS`]. Coefficients depend only on
    /// their index, so entries already present are kept and only the new
    /// tail is computed.
    pub fn prepare(&mut self, count: usize) {
        let count = count.min(MAX_HARMONICS);
        let len = count + 1;
        if self.coeffs.len() > len {
            self.coeffs.truncate(len);
        } else {
            for index in self.coeffs.len()..len {
                self.coeffs.push(harmonic_coefficient(index));
            }
        }
    }

    /// Prepare the table for `frequency` at `sample_rate` and return the
    /// harmonic count.
    pub fn prepare_for(&mut self, sample_rate: f32, frequency: f32) -> usize {
        let count = harmonic_count(sample_rate, frequency);
        self.prepare(count);
        count
    }

    /// Number of harmonics currently in the table.
    #[inline]
    pub fn harmonic_count(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Number of coefficients the table holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.coeffs.capacity()
    }

    /// Coefficients, index 0 being the DC term.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Sum the series at `phase` (in cycles).
    ///
    /// One `cos`/`sin` pair per call; every further harmonic costs one phasor
    /// rotation.
    #[inline]
    pub fn sample(&self, phase: f64) -> f64 {
        let theta = phase * TAU;
        let base_cos = cos(theta);
        let base_sin = sin(theta);

        let mut phasor_cos = base_cos;
        let mut phasor_sin = base_sin;
        let mut sum = self.coeffs[0];

        for &coeff in &self.coeffs[1..] {
            sum += coeff * phasor_cos;
            let rotated_cos = phasor_cos * base_cos - phasor_sin * base_sin;
            phasor_sin = phasor_sin * base_cos + phasor_cos * base_sin;
            phasor_cos = rotated_cos;
        }

        sum
    }
}
