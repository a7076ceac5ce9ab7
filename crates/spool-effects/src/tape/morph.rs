//! Drive macro to tape parameters.
//!
//! One knob in [0, 1] sets nine internal parameters (A–I) and an output
//! auto-gain. Every parameter follows its target through a
//! [`BlockSmoothed`] halfway step, advanced once at the top of each block.

use libm::pow;
use spool_core::{BlockSmoothed, db_to_linear};

/// Attenuation applied at full Drive, in dB.
const MAX_COMP_DB: f64 = -6.0;
/// Ease-in exponent so low Drive settings stay almost untouched.
const COMP_CURVE: f64 = 1.35;

/// Clamp a macro value into [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_macro(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// The nine tape parameters plus auto-gain, as targets or smoothed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeParams {
    /// A: input level.
    pub input: f64,
    /// B: encode/decode tilt.
    pub tilt: f64,
    /// C: companding filter shape.
    pub shape: f64,
    /// D: flutter depth.
    pub flutter: f64,
    /// E: flutter speed.
    pub flutter_speed: f64,
    /// F: bias (0.5 is centred).
    pub bias: f64,
    /// G: head-bump amount.
    pub head_bump: f64,
    /// H: head-bump frequency in Hz.
    pub head_freq: f64,
    /// I: output compensation.
    pub output: f64,
    /// Loudness compensation multiplier.
    pub auto_gain: f64,
}

impl TapeParams {
    /// Targets for a Drive macro position `k`, clamped to [0, 1] first.
    pub fn for_macro(k: f64) -> Self {
        let knob = clamp_macro(k);
        let comp_db = MAX_COMP_DB * pow(knob, COMP_CURVE);
        Self {
            input: 0.5 + (knob * 0.5),
            tilt: 0.5 - (knob * 0.173),
            shape: 0.5 + (knob * 0.5),
            flutter: knob * 0.300,
            flutter_speed: 0.200,
            bias: 0.5 + (knob * 0.320),
            head_bump: 0.5 + (knob * 0.042),
            head_freq: 50.0 + (knob * 44.5),
            output: 0.5,
            auto_gain: db_to_linear(comp_db),
        }
    }

    /// Values as an array in A–I order followed by auto-gain.
    pub fn to_array(&self) -> [f64; 10] {
        [
            self.input,
            self.tilt,
            self.shape,
            self.flutter,
            self.flutter_speed,
            self.bias,
            self.head_bump,
            self.head_freq,
            self.output,
            self.auto_gain,
        ]
    }
}

impl Default for TapeParams {
    fn default() -> Self {
        Self::for_macro(0.0)
    }
}

/// Smoothed tape parameters following the Drive macro.
///
/// # Example
///
/// ```rust
/// use spool_effects::MorphEngine;
///
/// let mut morph = MorphEngine::new();
/// morph.set_macro(1.0);
/// let params = morph.advance();
/// assert_eq!(params.head_freq, 72.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MorphEngine {
    macro_value: f64,
    input: BlockSmoothed,
    tilt: BlockSmoothed,
    shape: BlockSmoothed,
    flutter: BlockSmoothed,
    flutter_speed: BlockSmoothed,
    bias: BlockSmoothed,
    head_bump: BlockSmoothed,
    head_freq: BlockSmoothed,
    output: BlockSmoothed,
    auto_gain: BlockSmoothed,
}

impl MorphEngine {
    /// Create a morph engine settled at Drive = 0.
    pub fn new() -> Self {
        let p = TapeParams::for_macro(0.0);
        Self {
            macro_value: 0.0,
            input: BlockSmoothed::new(p.input),
            tilt: BlockSmoothed::new(p.tilt),
            shape: BlockSmoothed::new(p.shape),
            flutter: BlockSmoothed::new(p.flutter),
            flutter_speed: BlockSmoothed::new(p.flutter_speed),
            bias: BlockSmoothed::new(p.bias),
            head_bump: BlockSmoothed::new(p.head_bump),
            head_freq: BlockSmoothed::new(p.head_freq),
            output: BlockSmoothed::new(p.output),
            auto_gain: BlockSmoothed::new(p.auto_gain),
        }
    }

    /// Recompute all targets for a new macro position.
    pub fn set_macro(&mut self, value: f64) {
        self.macro_value = clamp_macro(value);
        let t = TapeParams::for_macro(self.macro_value);
        self.input.set_target(t.input);
        self.tilt.set_target(t.tilt);
        self.shape.set_target(t.shape);
        self.flutter.set_target(t.flutter);
        self.flutter_speed.set_target(t.flutter_speed);
        self.bias.set_target(t.bias);
        self.head_bump.set_target(t.head_bump);
        self.head_freq.set_target(t.head_freq);
        self.output.set_target(t.output);
        self.auto_gain.set_target(t.auto_gain);
    }

    /// Current (clamped) macro position.
    pub fn macro_value(&self) -> f64 {
        self.macro_value
    }

    /// Advance every parameter one block and return the smoothed set.
    pub fn advance(&mut self) -> TapeParams {
        TapeParams {
            input: self.input.advance(),
            tilt: self.tilt.advance(),
            shape: self.shape.advance(),
            flutter: self.flutter.advance(),
            flutter_speed: self.flutter_speed.advance(),
            bias: self.bias.advance(),
            head_bump: self.head_bump.advance(),
            head_freq: self.head_freq.advance(),
            output: self.output.advance(),
            auto_gain: self.auto_gain.advance(),
        }
    }

    /// Smoothed values without advancing.
    pub fn current(&self) -> TapeParams {
        TapeParams {
            input: self.input.get(),
            tilt: self.tilt.get(),
            shape: self.shape.get(),
            flutter: self.flutter.get(),
            flutter_speed: self.flutter_speed.get(),
            bias: self.bias.get(),
            head_bump: self.head_bump.get(),
            head_freq: self.head_freq.get(),
            output: self.output.get(),
            auto_gain: self.auto_gain.get(),
        }
    }

    /// Current targets.
    pub fn targets(&self) -> TapeParams {
        TapeParams::for_macro(self.macro_value)
    }

    /// Jump every parameter to its target.
    pub fn snap_to_targets(&mut self) {
        self.input.snap_to_target();
        self.tilt.snap_to_target();
        self.shape.snap_to_target();
        self.flutter.snap_to_target();
        self.flutter_speed.snap_to_target();
        self.bias.snap_to_target();
        self.head_bump.snap_to_target();
        self.head_freq.snap_to_target();
        self.output.snap_to_target();
        self.auto_gain.snap_to_target();
    }

    /// True once every parameter is within 1e-6 of its target.
    pub fn is_settled(&self) -> bool {
        [
            &self.input,
            &self.tilt,
            &self.shape,
            &self.flutter,
            &self.flutter_speed,
            &self.bias,
            &self.head_bump,
            &self.head_freq,
            &self.output,
            &self.auto_gain,
        ]
        .iter()
        .all(|p| p.is_settled())
    }
}

impl Default for MorphEngine {
    fn default() -> Self {
        Self::new()
    }
}
