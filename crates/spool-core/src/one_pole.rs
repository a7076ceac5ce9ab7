//! One-pole lowpass in the tape-emulation form.
//!
//! ```text
//! y[n] = y[n-1] * (1 - f) + x[n] * f
//! ```
//!
//! Unlike a cutoff-in-Hz filter, the coefficient `f` is a raw blend amount
//! that the caller derives once per block (typically a tuning constant divided
//! by the sample-rate scale). Several tape stages share one coefficient across
//! both channels and across two trackers, so the filter only stores its state.
//!
//! # Usage
//!
//! ```rust
//! use spool_core::OnePole;
//!
//! let mut lp = OnePole::new();
//! let y = lp.process(1.0, 0.25);
//! assert_eq!(y, 0.25);
//! ```

/// One-pole lowpass state.
///
/// # Invariants
///
/// - For `f` in [0, 1] the filter is stable and its output stays within the
///   range of its inputs and initial state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnePole {
    state: f64,
}

impl OnePole {
    /// Create a filter at rest (state 0).
    pub const fn new() -> Self {
        Self { state: 0.0 }
    }

    /// Create a filter whose state starts at `value`.
    pub const fn with_state(value: f64) -> Self {
        Self { state: value }
    }

    /// Feed one sample with blend coefficient `f`, returning the new state.
    #[inline]
    pub fn process(&mut self, input: f64, f: f64) -> f64 {
        self.state = (self.state * (1.0 - f)) + (input * f);
        self.state
    }

    /// Set the state to `value`.
    pub fn reset_to(&mut self, value: f64) {
        self.state = value;
    }

    /// Reset state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut lp = OnePole::new();
        let mut out = 0.0;
        for _ in 0..10_000 {
            out = lp.process(1.0, 0.01);
        }
        assert!((out - 1.0).abs() < 1e-9, "DC should pass through, got {out}");
    }

    #[test]
    fn zero_coefficient_freezes_state() {
        let mut lp = OnePole::with_state(0.4);
        for _ in 0..100 {
            assert_eq!(lp.process(1.0, 0.0), 0.4);
        }
    }

    #[test]
    fn unit_coefficient_follows_input() {
        let mut lp = OnePole::new();
        assert_eq!(lp.process(-0.7, 1.0), -0.7);
        assert_eq!(lp.process(0.2, 1.0), 0.2);
    }

    #[test]
    fn attenuates_nyquist() {
        let mut lp = OnePole::new();
        let mut sum = 0.0;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input, 0.01).abs();
        }
        let avg = sum / 4800.0;
        assert!(avg < 0.02, "Nyquist should be heavily attenuated, avg = {avg}");
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::new();
        lp.process(1.0, 0.5);
        lp.reset();
        assert_eq!(lp, OnePole::new());
        lp.reset_to(1.0);
        assert_eq!(lp, OnePole::with_state(1.0));
    }
}
