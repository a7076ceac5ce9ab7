//! 32-bit xorshift noise source.
//!
//! The tape engine keeps one generator per channel and draws from it for
//! three purposes: the denormal-guard noise floor, flutter rate selection,
//! and output dither. The state must never reach zero (xorshift's only fixed
//! point), so seeding goes through a floor check.
//!
//! # Example
//!
//! ```rust
//! use spool_core::XorShift32;
//!
//! let mut rng = XorShift32::seeded(0, 0xDEADBEEF);
//! assert_ne!(rng.state(), 0);
//! let a = rng.advance();
//! let b = rng.advance();
//! assert_ne!(a, b);
//! ```

/// Seeds below this value are replaced by the fallback seed.
pub const MIN_SEED: u32 = 16386;

/// Marsaglia xorshift generator with the (13, 17, 5) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Seed the generator and step it once.
    ///
    /// If `seed` is below [`MIN_SEED`] the `fallback` seed is used instead.
    /// `fallback` itself must be at least [`MIN_SEED`].
    pub fn seeded(seed: u32, fallback: u32) -> Self {
        debug_assert!(fallback >= MIN_SEED);
        let mut rng = Self {
            state: if seed < MIN_SEED { fallback } else { seed },
        };
        rng.advance();
        rng
    }

    /// Step the generator and return the new state.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Current state without advancing.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Current state mapped onto [0, 1].
    #[inline]
    pub fn unit(&self) -> f64 {
        f64::from(self.state) / f64::from(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_seed_uses_fallback() {
        let a = XorShift32::seeded(5, 0x0BADF00D);
        let b = XorShift32::seeded(0x0BADF00D, 0x0BADF00D);
        assert_eq!(a, b);
    }

    #[test]
    fn seeding_steps_once() {
        let rng = XorShift32::seeded(0xDEADBEEF, 0xDEADBEEF);
        let mut manual = XorShift32 { state: 0xDEADBEEF };
        manual.advance();
        assert_eq!(rng, manual);
    }

    #[test]
    fn never_hits_zero() {
        let mut rng = XorShift32::seeded(0x0BADF00D, 0x0BADF00D);
        for _ in 0..100_000 {
            assert_ne!(rng.advance(), 0);
        }
    }

    #[test]
    fn unit_is_in_range() {
        let mut rng = XorShift32::seeded(0xDEADBEEF, 0xDEADBEEF);
        for _ in 0..10_000 {
            rng.advance();
            let u = rng.unit();
            assert!((0.0..=1.0).contains(&u));
        }
    }

    #[test]
    fn identical_seeds_give_identical_streams() {
        let mut a = XorShift32::seeded(123_456, 0xDEADBEEF);
        let mut b = XorShift32::seeded(123_456, 0xDEADBEEF);
        for _ in 0..1000 {
            assert_eq!(a.advance(), b.advance());
        }
    }
}
