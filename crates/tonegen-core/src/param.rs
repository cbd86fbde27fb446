//! Block-rate parameter smoothing.
//!
//! Control ports are read once per audio block, so a jump on the frequency or
//! amplitude port would otherwise be heard as a step at the block boundary.
//! [`BlockSmoother`] moves a value one low-pass step per block toward its
//! target and snaps straight to the target once the two are within a
//! threshold.
//!
//! ## Usage
//!
//! ```rust
//! use tonegen_core::BlockSmoother;
//!
//! let mut freq = BlockSmoother::new(0.02, 48000.0);
//!
//! // The first value is adopted as-is.
//! assert_eq!(freq.next(440.0), 440.0);
//!
//! // Later changes move by one step per block.
//! let stepped = freq.next(880.0);
//! assert!(stepped > 440.0 && stepped < 880.0);
//! ```

/// Numerator of the per-block one-pole coefficient: `coeff = 2048 / sample_rate`.
///
/// Convergence time therefore scales inversely with the sample rate.
pub const SMOOTHING_RATE: f32 = 2048.0;

/// One smoothing step.
///
/// Returns `target` unchanged if `|old - target| < limit`, otherwise
/// `old + coeff * (target - old)`.
///
/// # Arguments
/// * `old` - Previous smoothed value
/// * `target` - New raw value
/// * `limit` - Snap threshold
/// * `coeff` - One-pole coefficient in `(0, 1]`
#[inline]
pub fn smooth_step(old: f32, target: f32, limit: f32, coeff: f32) -> f32 {
    if (old - target).abs() < limit {
        target
    } else {
        old + coeff * (target - old)
    }
}

/// One-pole coefficient for `sample_rate`, clamped to `(0, 1]`.
///
/// Sample rates below [`SMOOTHING_RATE`] would give a coefficient above one,
/// which overshoots the target, so they are clamped to an instant step.
#[inline]
pub fn smoothing_coeff(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > SMOOTHING_RATE {
        SMOOTHING_RATE / sample_rate
    } else {
        1.0
    }
}

/// A block-rate smoothed parameter owned by one oscillator instance.
///
/// A new smoother is unprimed: the first target it sees is taken as the
/// current value. Non-finite targets are ignored so a bad control value
/// cannot poison the smoothing history.
#[derive(Debug, Clone)]
pub struct BlockSmoother {
    /// Current smoothed value
    current: f32,
    /// Snap threshold
    limit: f32,
    /// One-pole coefficient, `2048 / sample_rate` clamped to `(0, 1]`
    coeff: f32,
    /// Whether `current` holds a real value yet
    primed: bool,
}

impl BlockSmoother {
    /// Create an unprimed smoother.
    ///
    /// # Arguments
    /// * `limit` - Snap threshold (0.02 for the sine generator, 0.2 for square)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// A limit that is not a positive finite number turns smoothing off:
    /// every target is adopted as-is and [`limit`](Self::limit) reports
    /// infinity.
    pub fn new(limit: f32, sample_rate: f32) -> Self {
        Self {
            current: 0.0,
            limit: if limit.is_finite() && limit > 0.0 {
                limit
            } else {
                f32::INFINITY
            },
            coeff: smoothing_coeff(sample_rate),
            primed: false,
        }
    }

    /// Update the sample rate and recalculate the coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.coeff = smoothing_coeff(sample_rate);
    }

    /// Advance by one block toward `target` and return the smoothed value.
    #[inline]
    pub fn next(&mut self, target: f32) -> f32 {
        if !target.is_finite() {
            return self.current;
        }
        if self.primed {
            self.current = smooth_step(self.current, target, self.limit, self.coeff);
        } else {
            self.current = target;
            self.primed = true;
        }
        self.current
    }

    /// Set the value immediately, bypassing smoothing.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        if value.is_finite() {
            self.current = value;
            self.primed = true;
        }
    }

    /// Forget the smoothing history. The next target is adopted as-is.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.primed = false;
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Whether the smoother has seen a value since creation or reset.
    #[inline]
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Snap threshold, infinite when smoothing is off.
    #[inline]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// One-pole coefficient in use.
    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_step_snaps_within_limit() {
        assert_eq!(smooth_step(440.0, 440.01, 0.02, 0.5), 440.01);
        assert_eq!(smooth_step(-18.0, -18.15, 0.2, 0.5), -18.15);
    }

    #[test]
    fn smooth_step_moves_one_step_outside_limit() {
        let coeff = smoothing_coeff(48000.0);
        let out = smooth_step(0.0, 100.0, 0.02, coeff);
        assert!((out - 100.0 * 2048.0 / 48000.0).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn coeff_scales_with_sample_rate() {
        assert!((smoothing_coeff(48000.0) - 0.042_666_668).abs() < 1e-7);
        assert!((smoothing_coeff(96000.0) - 0.021_333_334).abs() < 1e-7);
        assert_eq!(smoothing_coeff(1000.0), 1.0);
        assert_eq!(smoothing_coeff(0.0), 1.0);
        assert_eq!(smoothing_coeff(f32::NAN), 1.0);
    }

    #[test]
    fn smoother_adopts_first_value() {
        let mut param = BlockSmoother::new(0.02, 48000.0);
        assert!(!param.is_primed());
        assert_eq!(param.next(440.0), 440.0);
        assert!(param.is_primed());
    }

    #[test]
    fn smoother_converges_and_snaps() {
        let mut param = BlockSmoother::new(0.2, 48000.0);
        param.set_immediate(0.0);

        let mut prev = param.get();
        let mut blocks = 0;
        while param.get() != 10.0 {
            let val = param.next(10.0);
            assert!(val >= prev, "not monotone: {prev} -> {val}");
            prev = val;
            blocks += 1;
            assert!(blocks < 10_000, "never snapped");
        }
        assert_eq!(param.get(), 10.0);
    }

    #[test]
    fn smoother_ignores_non_finite() {
        let mut param = BlockSmoother::new(0.02, 48000.0);
        param.next(220.0);
        assert_eq!(param.next(f32::NAN), 220.0);
        assert_eq!(param.next(f32::INFINITY), 220.0);
        assert_eq!(param.get(), 220.0);
    }

    #[test]
    fn smoother_reset_forgets_history() {
        let mut param = BlockSmoother::new(0.02, 48000.0);
        param.next(220.0);
        param.reset();
        assert!(!param.is_primed());
        assert_eq!(param.next(880.0), 880.0);
    }

    #[test]
    fn degenerate_limit_turns_smoothing_off() {
        for limit in [f32::NAN, 0.0, -0.2, f32::NEG_INFINITY] {
            let mut param = BlockSmoother::new(limit, 48000.0);
            assert_eq!(param.limit(), f32::INFINITY, "limit {limit}");
            param.next(440.0);
            assert_eq!(param.next(880.0), 880.0, "limit {limit}");
            assert_eq!(param.next(440.000_03), 440.000_03, "limit {limit}");
        }
    }
}
