//! Band split with low-band saturation and high-band thinning.

use libm::{cos, sin};
use spool_core::OnePole;

const HALF_PI: f64 = 1.57079633;

/// One channel's band splitter.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSplit {
    mid_roller: OnePole,
    sub_cut: OnePole,
}

impl BandSplit {
    /// Quiescent state.
    pub const fn new() -> Self {
        Self {
            mid_roller: OnePole::new(),
            sub_cut: OnePole::new(),
        }
    }

    /// Split `input` and shape both halves, returning `(lows, highs)`.
    ///
    /// Lows get the sub-bass cut (when `sub_freq > 0`) then a sine
    /// saturator; highs lose a cosine-shaped amount that grows with level.
    #[inline]
    pub fn process(&mut self, input: f64, mid_freq: f64, sub_freq: f64) -> (f64, f64) {
        let roller = self.mid_roller.process(input, mid_freq);
        let mut highs = input - roller;
        let mut lows = roller;

        if sub_freq > 0.0 {
            let cut = self.sub_cut.process(lows, sub_freq);
            lows -= cut;
        }

        lows = sin(lows.clamp(-HALF_PI, HALF_PI));

        let mut thinned = (highs.abs() * HALF_PI).min(HALF_PI);
        thinned = 1.0 - cos(thinned);
        if highs < 0.0 {
            thinned = -thinned;
        }
        highs -= thinned;

        (lows, highs)
    }

    /// Return to the quiescent state.
    pub fn reset(&mut self) {
        self.mid_roller.reset();
        self.sub_cut.reset();
    }
}

impl Default for BandSplit {
    fn default() -> Self {
        Self::new()
    }
}
