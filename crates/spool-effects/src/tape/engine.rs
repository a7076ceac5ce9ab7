//! The complete tape chain.

use spool_core::{
    Effect, ParamDescriptor, ParamId, ParameterInfo, Sample, XorShift32,
    oversampling_spacing,
};

use super::bands::BandSplit;
use super::bias::BiasSlew;
use super::clip::ClipStage;
use super::coefficients::BlockCoefficients;
use super::dither::{apply_dither, guard_denormal};
use super::dubly::{Compander, DECODE, ENCODE};
use super::flutter::Flutter;
use super::handle::MacroHandle;
use super::head_bump::HeadBump;
use super::morph::{MorphEngine, TapeParams, clamp_macro};

/// Default left-channel dither seed.
pub const DEFAULT_SEED_LEFT: u32 = 0x0BAD_F00D;
/// Default right-channel dither seed.
pub const DEFAULT_SEED_RIGHT: u32 = 0xDEAD_BEEF;
/// Block size assumed until [`TapeEngine::init`] is called.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

const DRIVE_PARAM: ParamDescriptor =
    ParamDescriptor::percent("Drive", "Drive", 0.0).with_id(ParamId(2000), "tape_drive");

/// Construction-time engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Add output dither. The random streams advance either way.
    pub dither: bool,
    /// Left-channel seed; values below 16386 fall back to the default.
    pub seed_left: u32,
    /// Right-channel seed; values below 16386 fall back to the default.
    pub seed_right: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            dither: true,
            seed_left: DEFAULT_SEED_LEFT,
            seed_right: DEFAULT_SEED_RIGHT,
        }
    }
}

/// Analog tape emulation driven by a single Drive macro.
///
/// Signal flow per sample:
///
/// ```text
/// in → denormal guard → input gain → encode → flutter → bias
///    → band split (sub cut, sine lows, thinned highs) + head bump
///    → decode → hysteresis clip → output gain → auto-gain → dither → out
/// ```
///
/// Parameters are smoothed once per block, so a Drive change reaches its
/// target over a few dozen blocks regardless of block size.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0–100% | 0.0 |
///
/// # Example
///
/// ```rust
/// use spool_effects::TapeEngine;
/// use spool_core::Effect;
///
/// let mut tape = TapeEngine::new(48000.0);
/// tape.set_macro(0.5);
/// tape.reset();
///
/// let (l, r) = tape.process_stereo(0.3, -0.3);
/// assert!(l.is_finite() && r.is_finite());
/// ```
#[derive(Debug)]
pub struct TapeEngine {
    settings: EngineSettings,
    sample_rate: f64,
    block_size: usize,
    spacing: usize,

    morph: MorphEngine,
    handle: MacroHandle,
    /// Macro bits last applied to the morph targets.
    applied_bits: u64,
    coefficients: BlockCoefficients,

    encode: [Compander; 2],
    flutter: Flutter,
    bias: BiasSlew,
    bands: [BandSplit; 2],
    head_bump: HeadBump,
    decode: [Compander; 2],
    clip: [ClipStage; 2],
    rng: [XorShift32; 2],
}

impl Default for TapeEngine {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl TapeEngine {
    /// Create an engine with default settings.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_settings(sample_rate, EngineSettings::default())
    }

    /// Create an engine with explicit dither and seed settings.
    pub fn with_settings(sample_rate: f64, settings: EngineSettings) -> Self {
        let morph = MorphEngine::new();
        let handle = MacroHandle::new(morph.macro_value());
        let mut engine = Self {
            settings,
            sample_rate,
            block_size: DEFAULT_BLOCK_SIZE,
            spacing: oversampling_spacing(sample_rate),
            applied_bits: handle.load_bits(),
            coefficients: BlockCoefficients::derive(&morph.current(), sample_rate),
            morph,
            handle,
            encode: [Compander::new(), Compander::new()],
            flutter: Flutter::new(),
            bias: BiasSlew::new(),
            bands: [BandSplit::new(), BandSplit::new()],
            head_bump: HeadBump::new(),
            decode: [Compander::new(), Compander::new()],
            clip: [ClipStage::new(), ClipStage::new()],
            rng: Self::seed(&settings),
        };
        engine.reset();
        engine
    }

    fn seed(settings: &EngineSettings) -> [XorShift32; 2] {
        [
            XorShift32::seeded(settings.seed_left, DEFAULT_SEED_LEFT),
            XorShift32::seeded(settings.seed_right, DEFAULT_SEED_RIGHT),
        ]
    }

    /// Record the host sample rate and maximum block size.
    ///
    /// Does not clear signal state; hosts call [`reset`](Self::reset) for that.
    pub fn init(&mut self, sample_rate: f64, block_size: usize) {
        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.spacing = oversampling_spacing(sample_rate);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, block_size, spacing = self.spacing, "tape engine init");
    }

    /// Return every stage to its quiescent state and re-seed the dither
    /// generators. Smoothed parameters jump to their targets.
    ///
    /// Calling `reset` twice in a row is the same as calling it once.
    pub fn reset(&mut self) {
        self.poll_handle();
        self.morph.snap_to_targets();

        for stage in &mut self.encode {
            stage.reset();
        }
        for stage in &mut self.decode {
            stage.reset();
        }
        for stage in &mut self.bands {
            stage.reset();
        }
        for stage in &mut self.clip {
            stage.reset();
        }
        self.flutter.reset();
        self.bias.reset();
        self.head_bump.reset();
        self.rng = Self::seed(&self.settings);

        #[cfg(feature = "tracing")]
        tracing::debug!(macro_value = self.morph.macro_value(), "tape engine reset");
    }

    /// Set the Drive macro in [0, 1]. Out-of-range values are clamped.
    pub fn set_macro(&mut self, value: f64) {
        let value = clamp_macro(value);
        self.handle.set(value);
        self.applied_bits = value.to_bits();
        self.morph.set_macro(value);
    }

    /// Current Drive macro in [0, 1].
    pub fn macro_value(&self) -> f64 {
        self.morph.macro_value()
    }

    /// Host parameter entry point. Index 0 is Drive; other indices are ignored.
    pub fn set_parameter(&mut self, index: usize, normalized: f64) {
        if index == 0 {
            self.set_macro(normalized);
        }
    }

    /// Handle for publishing Drive changes from another thread.
    ///
    /// Published values are picked up at the start of the next block.
    pub fn macro_handle(&self) -> MacroHandle {
        self.handle.clone()
    }

    /// Engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Block size recorded by [`init`](Self::init).
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Clip-stage FIFO length, also the engine latency in samples.
    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Coefficients derived for the most recent block.
    pub fn coefficients(&self) -> &BlockCoefficients {
        &self.coefficients
    }

    /// Smoothed parameter values.
    pub fn params(&self) -> TapeParams {
        self.morph.current()
    }

    /// Parameter targets for the current macro.
    pub fn targets(&self) -> TapeParams {
        self.morph.targets()
    }

    fn poll_handle(&mut self) {
        let bits = self.handle.load_bits();
        if bits != self.applied_bits {
            self.applied_bits = bits;
            self.morph.set_macro(f64::from_bits(bits));
        }
    }

    /// Smooth parameters and derive this block's coefficients.
    fn begin_block(&mut self) {
        self.poll_handle();
        let params = self.morph.advance();
        self.coefficients = BlockCoefficients::derive(&params, self.sample_rate);
        self.bias.configure(&self.coefficients);
        self.head_bump.configure(&self.coefficients);
    }

    /// Process `frames` samples of up to two channels.
    ///
    /// With no input channels the engine is fed silence; with one, the
    /// right channel duplicates the left. Only the first two outputs are
    /// written. The call is a no-op when there are no outputs or no frames.
    /// `frames` is capped at the shortest channel slice.
    pub fn process_block<S: Sample>(
        &mut self,
        inputs: &[&[S]],
        outputs: &mut [&mut [S]],
        frames: usize,
    ) {
        let inputs = &inputs[..inputs.len().min(2)];
        let n_out = outputs.len().min(2);
        let frames = inputs
            .iter()
            .map(|ch| ch.len())
            .chain(outputs[..n_out].iter().map(|ch| ch.len()))
            .fold(frames, usize::min);
        if n_out == 0 || frames == 0 {
            return;
        }

        self.begin_block();
        let c = self.coefficients;
        let spacing = c.spacing;
        let dither = self.settings.dither;

        for i in 0..frames {
            let mut left = inputs.first().map_or(0.0, |ch| ch[i].to_f64());
            let mut right = inputs.get(1).map_or(left, |ch| ch[i].to_f64());

            left = guard_denormal(left, &self.rng[0]);
            right = guard_denormal(right, &self.rng[1]);

            if c.input_gain != 1.0 {
                left *= c.input_gain;
                right *= c.input_gain;
            }

            left = self.encode[0].process(left, c.iir_enc_freq, c.dubly_amount, ENCODE);
            right = self.encode[1].process(right, c.iir_enc_freq, c.dubly_amount, ENCODE);

            (left, right) = self.flutter.process(
                left,
                right,
                c.flutter_depth,
                c.flutter_frequency,
                &mut self.rng,
            );

            (left, right) = self.bias.process(left, right, c.bias, c.under_bias);

            let (lows_l, highs_l) = self.bands[0].process(left, c.iir_mid_freq, c.iir_sub_freq);
            let (lows_r, highs_r) = self.bands[1].process(right, c.iir_mid_freq, c.iir_sub_freq);

            let (bump_l, bump_r) = self.head_bump.process(
                (lows_l, lows_r),
                c.head_bump_drive,
                c.head_bump_damping,
                c.head_bump_mix,
            );
            left = lows_l + highs_l + (bump_l * c.head_bump_mix);
            right = lows_r + highs_r + (bump_r * c.head_bump_mix);

            left = self.decode[0].process(left, c.iir_dec_freq, c.outly_amount, DECODE);
            right = self.decode[1].process(right, c.iir_dec_freq, c.outly_amount, DECODE);

            left = self.clip[0].process(left, spacing);
            right = self.clip[1].process(right, spacing);

            left *= c.output_gain;
            right *= c.output_gain;
            left *= c.auto_gain;
            right *= c.auto_gain;

            left = apply_dither(left, &mut self.rng[0], dither);
            right = apply_dither(right, &mut self.rng[1], dither);

            outputs[0][i] = S::from_f64(left);
            if n_out > 1 {
                outputs[1][i] = S::from_f64(right);
            }
        }
    }
}

impl Effect for TapeEngine {
    /// One-frame block: parameters advance one smoothing step per call.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (in_l, in_r) = ([left], [right]);
        let mut out_l = [0.0f32];
        let mut out_r = [0.0f32];
        self.process_block(&[&in_l[..], &in_r[..]], &mut [&mut out_l[..], &mut out_r[..]], 1);
        (out_l[0], out_r[0])
    }

    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        let frames = left_in.len();
        self.process_block(&[left_in, right_in], &mut [left_out, right_out], frames);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.init(f64::from(sample_rate), self.block_size);
    }

    fn reset(&mut self) {
        TapeEngine::reset(self);
    }

    fn latency_samples(&self) -> usize {
        self.spacing
    }
}

impl ParameterInfo for TapeEngine {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(DRIVE_PARAM),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => (self.macro_value() * 100.0) as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_macro(f64::from(DRIVE_PARAM.clamp(value)) / 100.0);
        }
    }
}
