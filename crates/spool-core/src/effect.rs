//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between DSP code and whatever drives it
//! (a plugin host, the offline renderer, tests). It is stereo-first: tape
//! emulation couples its two channels, so the primary entry points take a
//! left/right pair.
//!
//! ## Design Decisions
//!
//! - **Block-aware**: Effects whose control-rate state advances once per host
//!   block (rather than per sample) override [`Effect::process_block_stereo`];
//!   the per-sample methods then behave like one-frame blocks.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch; generic dispatch
//!   is preferred in hot loops.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use spool_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (left * self.gain, right * self.gain)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut g = Gain { gain: 2.0 };
/// assert_eq!(g.process(0.25), 0.5);
/// ```
pub trait Effect {
    /// Process one stereo frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a single mono sample.
    ///
    /// Default implementation feeds the sample to both channels and returns
    /// the left output.
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_stereo(input, input).0
    }

    /// Process a block of stereo samples.
    ///
    /// Default implementation calls [`process_stereo`](Self::process_stereo)
    /// per frame. All four buffers must have the same length; extra samples in
    /// longer buffers are left untouched.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(right_in.len(), right_out.len());
        for (((&l, &r), lo), ro) in left_in
            .iter()
            .zip(right_in)
            .zip(left_out.iter_mut())
            .zip(right_out.iter_mut())
        {
            let (ol, or) = self.process_stereo(l, r);
            *lo = ol;
            *ro = or;
        }
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate any sample-rate-dependent derived values here. This
    /// does not clear signal state; call [`reset`](Self::reset) for that.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal signal state to its quiescent values.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.0, right * self.0)
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    struct Swap;

    impl Effect for Swap {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (right, left)
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn mono_process_uses_left_output() {
        let mut g = Gain(3.0);
        assert_eq!(g.process(1.0), 3.0);
    }

    #[test]
    fn default_block_processing_runs_every_frame() {
        let mut s = Swap;
        let left = [1.0, 2.0, 3.0];
        let right = [-1.0, -2.0, -3.0];
        let mut out_l = [0.0; 3];
        let mut out_r = [0.0; 3];
        s.process_block_stereo(&left, &right, &mut out_l, &mut out_r);
        assert_eq!(out_l, right);
        assert_eq!(out_r, left);
    }

    #[test]
    fn default_latency_is_zero() {
        assert_eq!(Gain(1.0).latency_samples(), 0);
    }
}
