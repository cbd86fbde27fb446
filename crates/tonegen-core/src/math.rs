//! Level and phase math for the generators.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] - Unclamped dB to linear gain
//! - [`db_to_coeff`] - The amplitude mapper used by the generators: dB to a
//!   linear coefficient with a silence floor and a ceiling
//!
//! # Phase
//!
//! - [`phase_increment`] - Cycles advanced per sample
//! - [`wrap_phase`] - Reduce a phase accumulator into `[0, 1)`

use libm::{expf, floorf};

/// Amplitudes at or below this level are mapped to silence.
pub const SILENCE_FLOOR_DB: f32 = -80.0;

/// Amplitudes at or above this level are clamped to [`MAX_AMPLITUDE_COEFF`].
pub const CEILING_DB: f32 = 20.0;

/// Largest linear coefficient [`db_to_coeff`] returns (+20 dB).
pub const MAX_AMPLITUDE_COEFF: f32 = 10.0;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use tonegen_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Map an amplitude in decibels to the linear coefficient applied to the
/// oscillator output.
///
/// - `db <= -80` → `0.0` (silence floor)
/// - `db >= 20` → `10.0` (ceiling)
/// - otherwise `10^(0.05 * db)`
///
/// NaN maps to silence. The result is always in `[0, 10]`.
///
/// # Example
/// ```rust
/// use tonegen_core::db_to_coeff;
///
/// assert_eq!(db_to_coeff(-120.0), 0.0);
/// assert_eq!(db_to_coeff(40.0), 10.0);
/// assert!((db_to_coeff(0.0) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn db_to_coeff(db: f32) -> f32 {
    if db.is_nan() || db <= SILENCE_FLOOR_DB {
        0.0
    } else if db >= CEILING_DB {
        MAX_AMPLITUDE_COEFF
    } else {
        db_to_linear(db).min(MAX_AMPLITUDE_COEFF)
    }
}

/// Phase advanced per sample, in cycles, for `freq_hz` at `sample_rate`.
#[inline]
pub fn phase_increment(freq_hz: f32, sample_rate: f32) -> f32 {
    freq_hz / sample_rate
}

/// Reduce a phase accumulator into `[0, 1)`.
///
/// Negative phases wrap from the top, matching a Euclidean remainder.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - floorf(phase);
    // `phase - floor(phase)` can round up to exactly 1.0 for tiny negatives.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
