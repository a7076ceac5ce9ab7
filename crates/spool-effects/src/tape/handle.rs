//! Lock-free Drive handoff between a control thread and the audio thread.
//!
//! The macro value is stored as `f64` bits in an [`AtomicU64`]. Writers
//! publish with `Release`; the engine polls once per block with `Acquire`
//! and only recomputes targets when the bits change.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use super::morph::clamp_macro;

/// Shared Drive value for cross-thread control.
///
/// Cloning is cheap; every clone refers to the same engine.
///
/// # Example
///
/// ```rust
/// use spool_effects::TapeEngine;
///
/// let mut engine = TapeEngine::new(44100.0);
/// let handle = engine.macro_handle();
///
/// std::thread::spawn(move || handle.set(0.75)).join().unwrap();
///
/// let silence = [0.0f32; 32];
/// let mut out_l = [0.0f32; 32];
/// let mut out_r = [0.0f32; 32];
/// engine.process_block(
///     &[&silence[..], &silence[..]],
///     &mut [&mut out_l[..], &mut out_r[..]],
///     32,
/// );
/// assert_eq!(engine.macro_value(), 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct MacroHandle {
    bits: Arc<AtomicU64>,
}

impl MacroHandle {
    pub(crate) fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(clamp_macro(value).to_bits())),
        }
    }

    /// Publish a new Drive value in [0, 1]; out-of-range values are clamped.
    pub fn set(&self, value: f64) {
        self.bits
            .store(clamp_macro(value).to_bits(), Ordering::Release);
    }

    /// Most recently published Drive value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.load_bits())
    }

    #[inline]
    pub(crate) fn load_bits(&self) -> u64 {
        self.bits.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = MacroHandle::new(0.0);
        let b = a.clone();
        b.set(0.4);
        assert_eq!(a.get(), 0.4);
    }

    #[test]
    fn values_are_clamped() {
        let h = MacroHandle::new(2.0);
        assert_eq!(h.get(), 1.0);
        h.set(-1.0);
        assert_eq!(h.get(), 0.0);
        h.set(f64::NAN);
        assert_eq!(h.get(), 0.0);
    }
}
