//! Encode/decode companding around the tape core.
//!
//! The encode side boosts highs ahead of the nonlinear stages and the
//! decode side removes them afterwards, so saturation lands mostly on the
//! emphasised band.

use libm::log;
use spool_core::OnePole;

/// Log normaliser of the compression curve.
const LOG_NORM: f64 = 2.40823996531;

/// High-band gain constants for one side of the compander.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanderCurve {
    /// Gain applied to the current high band.
    pub high_gain: f64,
    /// Gain of the high band carried into the next sample.
    pub carry_gain: f64,
}

/// Encode-side curve.
pub const ENCODE: CompanderCurve = CompanderCurve {
    high_gain: 2.848,
    carry_gain: 1.152,
};

/// Decode-side curve.
pub const DECODE: CompanderCurve = CompanderCurve {
    high_gain: 2.628,
    carry_gain: 1.372,
};

/// Single-channel compander state.
#[derive(Debug, Clone, PartialEq)]
pub struct Compander {
    lowpass: OnePole,
    carry: f64,
    compression: OnePole,
}

impl Compander {
    /// Quiescent state: zero signal, unity compression.
    pub const fn new() -> Self {
        Self {
            lowpass: OnePole::new(),
            carry: 0.0,
            compression: OnePole::with_state(1.0),
        }
    }

    /// Process one sample.
    ///
    /// `freq` is the one-pole coefficient shared by the split and the
    /// compression follower; `amount` scales the compressed high band added
    /// back to the input (negative on the decode side).
    #[inline]
    pub fn process(&mut self, input: f64, freq: f64, amount: f64, curve: CompanderCurve) -> f64 {
        let low = self.lowpass.process(input, freq);
        let mut high = (input - low) * curve.high_gain;
        high += self.carry;
        self.carry = (input - low) * curve.carry_gain;
        high = high.clamp(-1.0, 1.0);

        let mut level = high.abs();
        if level > 0.0 {
            let adjust = log(1.0 + (255.0 * level)) / LOG_NORM;
            if adjust > 0.0 {
                level /= adjust;
            }
            let comp = self.compression.process(level, freq);
            return input + ((high * comp) * amount);
        }
        input
    }

    /// Return to the quiescent state.
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.carry = 0.0;
        self.compression.reset_to(1.0);
    }
}

impl Default for Compander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_passes_untouched() {
        let mut comp = Compander::new();
        for _ in 0..64 {
            assert_eq!(comp.process(0.0, 0.5, 1.0, ENCODE), 0.0);
        }
    }

    #[test]
    fn zero_amount_is_transparent() {
        let mut comp = Compander::new();
        for i in 0..64 {
            let x = (f64::from(i) * 0.3).sin() * 0.5;
            assert_eq!(comp.process(x, 0.5, 0.0, ENCODE), x);
        }
    }

    #[test]
    fn encode_emphasises_a_step() {
        let mut comp = Compander::new();
        let y = comp.process(0.5, 0.5, 1.0, ENCODE);
        assert!(y > 0.5, "encode should add high band, got {y}");
    }

    #[test]
    fn decode_pulls_a_step_back() {
        let mut comp = Compander::new();
        let y = comp.process(0.5, 0.5, -1.0, DECODE);
        assert!(y < 0.5, "decode should subtract high band, got {y}");
    }

    #[test]
    fn reset_restores_unity_compression() {
        let mut comp = Compander::new();
        for i in 0..32 {
            comp.process(f64::from(i % 3) - 1.0, 0.3, 1.0, DECODE);
        }
        comp.reset();
        assert_eq!(comp, Compander::new());
    }
}
