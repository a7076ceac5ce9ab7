//! Stereo bandpass biquad.
//!
//! One set of coefficients shared by two channels, each channel with its own
//! two delay taps. Structure is transposed direct form II:
//!
//! ```text
//! y[n]  = b0*x[n] + s1
//! s1'   = b1*x[n] - a1*y[n] + s2
//! s2'   = b2*x[n] - a2*y[n]
//! ```
//!
//! Coefficients come from the bilinear-transform bandpass with
//! `K = tan(π·fc)` where `fc` is the centre frequency as a fraction of the
//! sample rate.

use core::f64::consts::PI;
use libm::tan;

/// Biquad coefficients plus per-channel delay taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    /// Centre frequency as a fraction of the sample rate.
    freq_ratio: f64,
    /// Resonance.
    q: f64,

    /// Feedforward coefficients
    b0: f64,
    b1: f64,
    b2: f64,

    /// Feedback coefficients (a0 normalized to 1)
    a1: f64,
    a2: f64,

    /// Delay taps `[s1, s2]` for each channel.
    taps: [[f64; 2]; 2],
}

impl Biquad {
    /// Create a biquad with all coefficients and taps at zero.
    ///
    /// A zeroed biquad outputs silence until [`set_bandpass`](Self::set_bandpass)
    /// is called.
    pub const fn new() -> Self {
        Self {
            freq_ratio: 0.0,
            q: 0.0,
            b0: 0.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            taps: [[0.0; 2]; 2],
        }
    }

    /// Compute bandpass coefficients for `freq_ratio` (centre / sample rate) and `q`.
    ///
    /// Delay taps are left untouched so coefficients can be refreshed every
    /// block without clicks.
    pub fn set_bandpass(&mut self, freq_ratio: f64, q: f64) {
        self.freq_ratio = freq_ratio;
        self.q = q;

        let k = tan(PI * freq_ratio);
        let norm = 1.0 / (1.0 + k / q + k * k);
        self.b0 = k / q * norm;
        self.b1 = 0.0;
        self.b2 = -self.b0;
        self.a1 = 2.0 * (k * k - 1.0) * norm;
        self.a2 = (1.0 - k / q + k * k) * norm;
    }

    /// Process one sample on `channel` (0 = left, 1 = right).
    #[inline]
    pub fn process(&mut self, channel: usize, input: f64) -> f64 {
        let taps = &mut self.taps[channel];
        let output = (input * self.b0) + taps[0];
        taps[0] = (input * self.b1) - (output * self.a1) + taps[1];
        taps[1] = (input * self.b2) - (output * self.a2);
        output
    }

    /// Centre frequency as a fraction of the sample rate.
    pub fn freq_ratio(&self) -> f64 {
        self.freq_ratio
    }

    /// Resonance.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Coefficients as `(b0, b1, b2, a1, a2)`.
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64) {
        (self.b0, self.b1, self.b2, self.a1, self.a2)
    }

    /// Zero coefficients and taps.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_gain(bq: &mut Biquad, freq_ratio: f64) -> f64 {
        let mut peak: f64 = 0.0;
        for i in 0..20_000 {
            let x = libm::sin(2.0 * PI * freq_ratio * i as f64);
            let y = bq.process(0, x);
            if i > 15_000 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn zeroed_biquad_is_silent() {
        let mut bq = Biquad::new();
        for _ in 0..10 {
            assert_eq!(bq.process(0, 1.0), 0.0);
        }
    }

    #[test]
    fn unity_gain_at_centre() {
        let mut bq = Biquad::new();
        bq.set_bandpass(1000.0 / 48000.0, 0.618);
        let gain = sine_gain(&mut bq, 1000.0 / 48000.0);
        assert!((gain - 1.0).abs() < 0.01, "centre gain {gain}");
    }

    #[test]
    fn rejects_dc() {
        let mut bq = Biquad::new();
        bq.set_bandpass(60.0 / 44100.0, 0.618);
        let mut y = 1.0;
        for _ in 0..200_000 {
            y = bq.process(0, 1.0);
        }
        assert!(y.abs() < 1e-6, "DC leaked: {y}");
    }

    #[test]
    fn channels_are_independent() {
        let mut bq = Biquad::new();
        bq.set_bandpass(0.01, 0.7);
        bq.process(0, 1.0);
        bq.process(0, 0.5);
        assert_eq!(bq.process(1, 0.0), 0.0);
    }

    #[test]
    fn coefficients_are_antisymmetric() {
        let mut bq = Biquad::new();
        bq.set_bandpass(0.002, 0.618);
        let (b0, b1, b2, _, _) = bq.coefficients();
        assert_eq!(b1, 0.0);
        assert_eq!(b2, -b0);
    }

    #[test]
    fn clear_restores_new() {
        let mut bq = Biquad::new();
        bq.set_bandpass(0.002, 0.618);
        bq.process(0, 1.0);
        bq.clear();
        assert_eq!(bq, Biquad::new());
    }
}
