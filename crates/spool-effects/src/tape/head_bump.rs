//! Head bump: a soft-limited integrator on the low band feeding two
//! staggered bandpasses.

use spool_core::Biquad;

use super::coefficients::{BlockCoefficients, HEAD_BUMP_Q, HEAD_BUMP_SPREAD};

/// Stereo head-bump resonator.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadBump {
    integrator: [f64; 2],
    first: Biquad,
    second: Biquad,
}

impl HeadBump {
    /// Quiescent state with zeroed filters.
    pub const fn new() -> Self {
        Self {
            integrator: [0.0; 2],
            first: Biquad::new(),
            second: Biquad::new(),
        }
    }

    /// Refresh both bandpasses for this block. Filter memory is kept.
    pub fn configure(&mut self, coefficients: &BlockCoefficients) {
        let ratio = coefficients.head_bump_freq_ratio;
        self.first.set_bandpass(ratio, HEAD_BUMP_Q);
        self.second
            .set_bandpass(self.first.freq_ratio() * HEAD_BUMP_SPREAD, HEAD_BUMP_Q);
    }

    /// First and second bandpass filters.
    pub fn filters(&self) -> (&Biquad, &Biquad) {
        (&self.first, &self.second)
    }

    /// Feed one stereo frame of lows and return the unmixed bump signal.
    ///
    /// Returns silence without touching state when `mix` is not positive.
    pub fn process(
        &mut self,
        lows: (f64, f64),
        drive: f64,
        damping: f64,
        mix: f64,
    ) -> (f64, f64) {
        if mix <= 0.0 {
            return (0.0, 0.0);
        }

        for (acc, low) in self.integrator.iter_mut().zip([lows.0, lows.1]) {
            *acc += low * drive;
            *acc -= *acc * *acc * *acc * damping;
        }

        let mut out = [0.0; 2];
        for (ch, y) in out.iter_mut().enumerate() {
            let a = self.first.process(ch, self.integrator[ch]);
            *y = self.second.process(ch, a);
        }
        (out[0], out[1])
    }

    /// Return to the quiescent state, clearing coefficients as well as taps.
    pub fn reset(&mut self) {
        self.integrator = [0.0; 2];
        self.first.clear();
        self.second.clear();
    }
}

impl Default for HeadBump {
    fn default() -> Self {
        Self::new()
    }
}
