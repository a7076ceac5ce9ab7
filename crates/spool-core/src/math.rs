//! Mathematical utility functions and constants for tape DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Sample-Rate Scaling
//!
//! The tape algorithms are tuned at 44.1 kHz. Every rate-dependent constant is
//! divided by [`sample_rate_scale`], and the output clipper's integer delay uses
//! [`oversampling_spacing`].

use libm::{floor, log10, pow};

/// Reference sample rate the tape constants are tuned at.
pub const BASE_SAMPLE_RATE: f64 = 44100.0;

/// Largest integer delay the output clipper's FIFO can realize.
pub const MAX_SPACING: usize = 16;

/// Golden ratio, the geometric step between bias slew cells.
pub const GOLDEN_RATIO: f64 = 1.618033988749894848204586;

/// Convert decibels to linear gain.
///
/// Computed as `10^(db/20)` with `libm::pow` so results are bit-stable.
///
/// # Example
/// ```rust
/// use spool_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
/// assert!((db_to_linear(-6.0) - 0.501187).abs() < 1e-6);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    pow(10.0, db / 20.0)
}

/// Convert linear gain to decibels.
///
/// Values at or below zero map to -120 dB.
///
/// # Example
/// ```rust
/// use spool_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-12);
/// assert_eq!(linear_to_db(0.0), -120.0);
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * log10(linear)
    }
}

/// Ratio of `sample_rate` to the 44.1 kHz reference.
#[inline]
pub fn sample_rate_scale(sample_rate: f64) -> f64 {
    sample_rate / BASE_SAMPLE_RATE
}

/// Integer oversampling factor: `clamp(floor(sample_rate / 44100), 1, 16)`.
///
/// Non-finite or non-positive rates fall back to 1.
///
/// # Example
/// ```rust
/// use spool_core::oversampling_spacing;
///
/// assert_eq!(oversampling_spacing(48000.0), 1);
/// assert_eq!(oversampling_spacing(96000.0), 2);
/// assert_eq!(oversampling_spacing(1_000_000.0), 16);
/// ```
#[inline]
pub fn oversampling_spacing(sample_rate: f64) -> usize {
    let scale = floor(sample_rate_scale(sample_rate));
    if scale.is_nan() || scale < 1.0 {
        1
    } else if scale > MAX_SPACING as f64 {
        MAX_SPACING
    } else {
        scale as usize
    }
}
