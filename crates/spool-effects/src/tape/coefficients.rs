//! Per-block derived values.
//!
//! Everything the per-sample loop needs that depends only on the smoothed
//! parameters and the sample rate is computed once here.

use core::f64::consts::PI;
use libm::{pow, sin, sqrt};
use spool_core::{GOLDEN_RATIO, oversampling_spacing, sample_rate_scale};

use super::morph::TapeParams;

/// Resonance shared by both head-bump bandpasses (1/φ).
pub const HEAD_BUMP_Q: f64 = 0.618033988749894848204586;
/// Second head-bump bandpass centre as a fraction of the first.
pub const HEAD_BUMP_SPREAD: f64 = 0.9375;
/// Upper bound on flutter excursion, in samples.
pub const MAX_FLUTTER_DEPTH: f64 = 498.0;

/// Values derived from [`TapeParams`] at the top of each block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockCoefficients {
    /// Sample-rate ratio against 44.1 kHz.
    pub scale: f64,
    /// Clip-stage FIFO length.
    pub spacing: usize,
    /// Linear input gain.
    pub input_gain: f64,
    /// Encode compander amount.
    pub dubly_amount: f64,
    /// Decode compander amount (never below -1).
    pub outly_amount: f64,
    /// Encode one-pole coefficient.
    pub iir_enc_freq: f64,
    /// Decode one-pole coefficient.
    pub iir_dec_freq: f64,
    /// Band-split one-pole coefficient.
    pub iir_mid_freq: f64,
    /// Flutter excursion in samples; zero bypasses the stage.
    pub flutter_depth: f64,
    /// Flutter phase increment before rate scaling.
    pub flutter_frequency: f64,
    /// Bias in [-1, 1].
    pub bias: f64,
    /// Under-bias stickiness width (zero when bias is positive).
    pub under_bias: f64,
    /// Over-bias slew width of the last cell.
    pub over_bias: f64,
    /// Head-bump integrator drive.
    pub head_bump_drive: f64,
    /// Head-bump integrator cubic damping.
    pub head_bump_damping: f64,
    /// Head-bump wet mix.
    pub head_bump_mix: f64,
    /// Sub-bass cut one-pole coefficient; zero disables the cut.
    pub iir_sub_freq: f64,
    /// First head-bump bandpass centre as a fraction of the sample rate.
    pub head_bump_freq_ratio: f64,
    /// Output compensation multiplier.
    pub output_gain: f64,
    /// Loudness compensation multiplier.
    pub auto_gain: f64,
}

impl BlockCoefficients {
    /// Derive coefficients for one block.
    pub fn derive(params: &TapeParams, sample_rate: f64) -> Self {
        let scale = sample_rate_scale(sample_rate);
        let spacing = oversampling_spacing(sample_rate);

        let bias = (params.bias * 2.0) - 1.0;
        let mut under_bias = (pow(bias, 4.0) * 0.25) / scale;
        let mut over_bias = pow(1.0 - bias, 3.0) / scale;
        if bias > 0.0 {
            under_bias = 0.0;
        }
        if bias < 0.0 {
            over_bias = 1.0 / scale;
        }

        Self {
            scale,
            spacing,
            input_gain: pow(params.input * 2.0, 2.0),
            dubly_amount: params.tilt * 2.0,
            outly_amount: ((1.0 - params.tilt) * -2.0).max(-1.0),
            iir_enc_freq: (1.0 - params.shape) / scale,
            iir_dec_freq: params.shape / scale,
            iir_mid_freq: ((params.shape * 0.618) + 0.382) / scale,
            flutter_depth: (pow(params.flutter, 6.0) * scale * 50.0).min(MAX_FLUTTER_DEPTH),
            flutter_frequency: (0.02 * pow(params.flutter_speed, 3.0)) / scale,
            bias,
            under_bias,
            over_bias,
            head_bump_drive: (params.head_bump * 0.1) / scale,
            head_bump_damping: 0.0618 / sqrt(scale),
            head_bump_mix: params.head_bump * 0.5,
            iir_sub_freq: (sin(params.head_bump * PI) * 0.008) / scale,
            head_bump_freq_ratio: params.head_freq / sample_rate,
            output_gain: params.output * 2.0,
            auto_gain: params.auto_gain,
        }
    }

    /// Slew widths for the nine bias cells, widest first.
    ///
    /// The last cell gets `over_bias`; each earlier cell is φ times wider.
    pub fn slew_widths(&self) -> [f64; 9] {
        let mut widths = [0.0; 9];
        let mut width = self.over_bias;
        for w in widths.iter_mut().rev() {
            *w = width;
            width *= GOLDEN_RATIO;
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_settings_at_base_rate() {
        let c = BlockCoefficients::derive(&TapeParams::for_macro(0.0), 44100.0);
        assert_eq!(c.scale, 1.0);
        assert_eq!(c.spacing, 1);
        assert_eq!(c.input_gain, 1.0);
        assert_eq!(c.dubly_amount, 1.0);
        assert_eq!(c.outly_amount, -1.0);
        assert_eq!(c.iir_enc_freq, 0.5);
        assert_eq!(c.iir_dec_freq, 0.5);
        assert_eq!(c.flutter_depth, 0.0);
        assert_eq!(c.bias, 0.0);
        assert_eq!(c.head_bump_mix, 0.25);
        assert_eq!(c.output_gain, 1.0);
        assert_eq!(c.auto_gain, 1.0);
    }

    #[test]
    fn positive_bias_disables_stickiness() {
        let c = BlockCoefficients::derive(&TapeParams::for_macro(1.0), 44100.0);
        assert!(c.bias > 0.0);
        assert_eq!(c.under_bias, 0.0);
        assert!(c.over_bias > 0.0 && c.over_bias < 1.0);
    }

    #[test]
    fn negative_bias_opens_slew() {
        let params = TapeParams {
            bias: 0.2,
            ..TapeParams::default()
        };
        let c = BlockCoefficients::derive(&params, 88200.0);
        assert!(c.bias < 0.0);
        assert_eq!(c.over_bias, 0.5);
        assert!(c.under_bias > 0.0);
    }

    #[test]
    fn flutter_depth_is_capped() {
        let params = TapeParams {
            flutter: 1.0,
            ..TapeParams::default()
        };
        let c = BlockCoefficients::derive(&params, 44100.0 * 16.0);
        assert_eq!(c.flutter_depth, MAX_FLUTTER_DEPTH);
    }

    #[test]
    fn slew_widths_grow_by_golden_ratio() {
        let c = BlockCoefficients::derive(&TapeParams::for_macro(0.5), 48000.0);
        let widths = c.slew_widths();
        assert_eq!(widths[8], c.over_bias);
        for i in 0..8 {
            assert!((widths[i] / widths[i + 1] - GOLDEN_RATIO).abs() < 1e-12);
        }
    }

    #[test]
    fn spacing_tracks_sample_rate() {
        let p = TapeParams::default();
        assert_eq!(BlockCoefficients::derive(&p, 48000.0).spacing, 1);
        assert_eq!(BlockCoefficients::derive(&p, 96000.0).spacing, 2);
        assert_eq!(BlockCoefficients::derive(&p, 192000.0).spacing, 4);
    }
}
