//! Block-rate parameter smoothing.
//!
//! Tape morphing moves nine coefficients at once. Each one follows its target
//! with a fixed halfway step per processed block:
//!
//! ```text
//! current = current * 0.5 + target * 0.5
//! ```
//!
//! The step is tied to the host block, not to wall-clock time, so the audible
//! morph speed scales with block size. That is the reference behaviour and is
//! reproduced as-is.
//!
//! ## Usage
//!
//! ```rust
//! use spool_core::BlockSmoothed;
//!
//! let mut flutter = BlockSmoothed::new(0.0);
//! flutter.set_target(0.3);
//!
//! // Once per host block, before any sample is processed
//! let depth = flutter.advance();
//! assert_eq!(depth, 0.15);
//! ```

/// A value that approaches its target by half the remaining distance each block.
///
/// Because `current * 0.5 + target * 0.5` always lands between `current` and
/// `target`, trajectories are monotonic and never overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSmoothed {
    /// Current smoothed value
    current: f64,
    /// Target value we're smoothing towards
    target: f64,
}

impl BlockSmoothed {
    /// Create a parameter resting at `initial` (current == target).
    pub const fn new(initial: f64) -> Self {
        Self {
            current: initial,
            target: initial,
        }
    }

    /// Set the value the parameter moves towards.
    #[inline]
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance one block and return the new smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f64 {
        self.current = (self.current * 0.5) + (self.target * 0.5);
        self.current
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Jump straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// True once the value is within 1e-6 of its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }
}

impl Default for BlockSmoothed {
    fn default() -> Self {
        Self::new(0.0)
    }
}
