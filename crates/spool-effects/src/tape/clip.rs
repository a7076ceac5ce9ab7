//! Hysteresis soft clipper with rate-tracking delay.
//!
//! Samples past the threshold are replaced by a blend of the previous
//! output, and the clipper stays latched on that side until the signal
//! turns around. Output leaves through a FIFO of `spacing` samples so the
//! look-behind spans the same time at every sample rate.

use spool_core::MAX_SPACING;

/// Level above which a sample is clipped.
pub const CLIP_THRESHOLD: f64 = 0.9549925859;
/// Hard input bound applied before clipping.
const HARD_LIMIT: f64 = 4.0;

/// Which side the clipper is latched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipLatch {
    /// No clip on the previous sample.
    #[default]
    Clear,
    /// Previous sample clipped positive.
    Positive,
    /// Previous sample clipped negative.
    Negative,
}

/// One channel of the hysteresis clipper.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipStage {
    last_sample: f64,
    latch: ClipLatch,
    fifo: [f64; MAX_SPACING + 1],
}

impl ClipStage {
    /// Quiescent state.
    pub const fn new() -> Self {
        Self {
            last_sample: 0.0,
            latch: ClipLatch::Clear,
            fifo: [0.0; MAX_SPACING + 1],
        }
    }

    /// Current latch state.
    pub fn latch(&self) -> ClipLatch {
        self.latch
    }

    /// Process one sample. `spacing` must be in `1..=MAX_SPACING`.
    #[inline]
    pub fn process(&mut self, input: f64, spacing: usize) -> f64 {
        let spacing = spacing.clamp(1, MAX_SPACING);
        let mut x = input.clamp(-HARD_LIMIT, HARD_LIMIT);
        let entering = self.latch;
        self.latch = ClipLatch::Clear;

        if entering == ClipLatch::Positive {
            if x < self.last_sample {
                self.last_sample = 0.7058208 + (x * 0.2609148);
            } else {
                self.last_sample = 0.2491717 + (self.last_sample * 0.7390851);
            }
        }
        if x > CLIP_THRESHOLD {
            self.latch = ClipLatch::Positive;
            x = 0.7058208 + (self.last_sample * 0.2609148);
        }

        if entering == ClipLatch::Negative {
            if x > self.last_sample {
                self.last_sample = -0.7058208 + (x * 0.2609148);
            } else {
                self.last_sample = -0.2491717 + (self.last_sample * 0.7390851);
            }
        }
        if x < -CLIP_THRESHOLD {
            self.latch = ClipLatch::Negative;
            x = -0.7058208 + (self.last_sample * 0.2609148);
        }

        self.fifo[spacing] = x;
        let out = self.last_sample;
        for i in 0..spacing {
            self.fifo[i] = self.fifo[i + 1];
        }
        self.last_sample = self.fifo[0];
        out
    }

    /// Return to the quiescent state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ClipStage {
    fn default() -> Self {
        Self::new()
    }
}
