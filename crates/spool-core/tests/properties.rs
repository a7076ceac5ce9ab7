//! Property-based tests for spool-core DSP primitives.
//!
//! Tests filter stability, smoothing convergence, and noise-source integrity
//! using proptest for randomized input generation.

use proptest::prelude::*;
use spool_core::{BlockSmoothed, Biquad, OnePole, XorShift32, oversampling_spacing};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any head-bump-range centre frequency and resonance, the stereo
    /// bandpass produces finite output for random finite input.
    #[test]
    fn biquad_bandpass_stability(
        freq in 20.0f64..500.0f64,
        q in 0.3f64..4.0f64,
        sample_rate in prop::sample::select(vec![44100.0f64, 48000.0, 88200.0, 96000.0, 192000.0]),
        input in prop::array::uniform32(-1.0f64..=1.0f64),
    ) {
        let mut bq = Biquad::new();
        bq.set_bandpass(freq / sample_rate, q);

        for &sample in &input {
            let l = bq.process(0, sample);
            let r = bq.process(1, -sample);
            prop_assert!(
                l.is_finite() && r.is_finite(),
                "Biquad (freq={}, q={}, sr={}) produced non-finite output ({}, {})",
                freq, q, sample_rate, l, r
            );
        }
    }

    /// A one-pole with coefficient in [0, 1] never leaves the hull of its
    /// inputs and initial state.
    #[test]
    fn one_pole_stays_in_input_hull(
        f in 0.0f64..=1.0f64,
        input in prop::array::uniform32(-1.0f64..=1.0f64),
    ) {
        let mut lp = OnePole::new();
        for &sample in &input {
            let y = lp.process(sample, f);
            prop_assert!(y.abs() <= 1.0 + 1e-12, "one-pole escaped: {}", y);
        }
    }

    /// Block smoothing approaches its target monotonically and settles within
    /// 40 blocks for any morph-range step.
    #[test]
    fn block_smoothing_monotonic_convergence(
        initial in -100.0f64..100.0f64,
        target in -100.0f64..100.0f64,
    ) {
        let mut param = BlockSmoothed::new(initial);
        param.set_target(target);

        let mut prev_distance = (initial - target).abs();
        for _ in 0..40 {
            let distance = (param.advance() - target).abs();
            prop_assert!(distance <= prev_distance, "overshoot or reversal");
            prev_distance = distance;
        }
        prop_assert!(
            (param.get() - target).abs() < 1e-6 * (1.0 + (initial - target).abs() / 100.0),
            "did not converge: initial={}, target={}, got={}",
            initial, target, param.get()
        );
    }

    /// Any seed, including zero, yields a generator that never degenerates.
    #[test]
    fn xorshift_never_degenerates(seed in any::<u32>()) {
        let mut rng = XorShift32::seeded(seed, 0xDEADBEEF);
        for _ in 0..256 {
            prop_assert_ne!(rng.advance(), 0);
        }
    }

    /// Spacing always equals clamp(floor(sr / 44100), 1, 16).
    #[test]
    fn spacing_formula(sample_rate in 1.0f64..2_000_000.0f64) {
        let expected = ((sample_rate / 44100.0).floor() as usize).clamp(1, 16);
        prop_assert_eq!(oversampling_spacing(sample_rate), expected);
    }
}
