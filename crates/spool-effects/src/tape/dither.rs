//! Denormal guard on the way in, noise-shaped dither on the way out.

use spool_core::XorShift32;

/// Input magnitude below which the sample is replaced by noise.
pub const DENORMAL_FLOOR: f64 = 1.18e-23;
/// Scale of the replacement noise.
const FLOOR_NOISE: f64 = 1.18e-17;
/// 2^62, exact.
const TWO_POW_62: f64 = 4_611_686_018_427_387_904.0;
/// Centre of the 32-bit generator range.
const RNG_CENTRE: f64 = 2_147_483_647.0;

/// Replace near-denormal input with low-level noise from `rng`.
///
/// The generator is read but not advanced.
#[inline]
pub fn guard_denormal(x: f64, rng: &XorShift32) -> f64 {
    if x.abs() < DENORMAL_FLOOR {
        f64::from(rng.state()) * FLOOR_NOISE
    } else {
        x
    }
}

/// Advance `rng` and, if `enabled`, add output dither at roughly 2^-62 of
/// the generator range.
///
/// The generator advances whether or not dither is applied so the random
/// stream seen by the flutter stage does not depend on this setting.
#[inline]
pub fn apply_dither(x: f64, rng: &mut XorShift32, enabled: bool) -> f64 {
    let state = rng.advance();
    if enabled {
        x + (((f64::from(state) - RNG_CENTRE) * 5.5e-36) * TWO_POW_62)
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_replaces_only_tiny_values() {
        let rng = XorShift32::seeded(0xDEAD_BEEF, 0xDEAD_BEEF);
        assert_eq!(guard_denormal(0.5, &rng), 0.5);
        assert_eq!(guard_denormal(-1e-20, &rng), -1e-20);
        let y = guard_denormal(0.0, &rng);
        assert!(y > 0.0 && y < 1e-7);
        assert_eq!(y, guard_denormal(1e-30, &rng));
    }

    #[test]
    fn dither_is_tiny() {
        let mut rng = XorShift32::seeded(0x0BAD_F00D, 0x0BAD_F00D);
        for _ in 0..10_000 {
            let y = apply_dither(0.0, &mut rng, true);
            assert!(y.abs() < 1e-7);
        }
    }

    #[test]
    fn disabled_dither_still_advances() {
        let mut a = XorShift32::seeded(0x0BAD_F00D, 0x0BAD_F00D);
        let mut b = a;
        assert_eq!(apply_dither(0.25, &mut a, false), 0.25);
        apply_dither(0.25, &mut b, true);
        assert_eq!(a, b);
    }
}
