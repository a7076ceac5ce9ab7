//! Bias modelling as a chain of golden-ratio slew limiters.
//!
//! Over-bias narrows the allowed per-sample change, rounding off highs.
//! Under-bias makes small movements stick to the previous value.

use super::coefficients::BlockCoefficients;

/// Number of cascaded slew cells.
pub const SLEW_CELLS: usize = 9;

/// Leak applied to each cell's memory.
const MEMORY_LEAK: f64 = 0.975;
/// Bias magnitude below which the stage is skipped.
const BIAS_THRESHOLD: f64 = 0.001;

/// Stereo bias slew network.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasSlew {
    widths: [f64; SLEW_CELLS],
    memory: [[f64; SLEW_CELLS]; 2],
}

impl BiasSlew {
    /// Quiescent state.
    pub const fn new() -> Self {
        Self {
            widths: [0.0; SLEW_CELLS],
            memory: [[0.0; SLEW_CELLS]; 2],
        }
    }

    /// Refresh the cell widths for this block.
    pub fn configure(&mut self, coefficients: &BlockCoefficients) {
        self.widths = coefficients.slew_widths();
    }

    /// Current cell widths, widest first.
    pub fn widths(&self) -> &[f64; SLEW_CELLS] {
        &self.widths
    }

    /// Process one stereo frame.
    pub fn process(&mut self, left: f64, right: f64, bias: f64, under_bias: f64) -> (f64, f64) {
        if bias.abs() <= BIAS_THRESHOLD {
            return (left, right);
        }

        let mut frame = [left, right];
        for cell in 0..SLEW_CELLS {
            let width = self.widths[cell];
            for (x, memory) in frame.iter_mut().zip(self.memory.iter_mut()) {
                let held = memory[cell] / MEMORY_LEAK;
                if under_bias > 0.0 {
                    let stuck = (*x - held).abs() / under_bias;
                    if stuck < 1.0 {
                        *x = (*x * stuck) + (held * (1.0 - stuck));
                    }
                }
                if (*x - memory[cell]) > width {
                    *x = memory[cell] + width;
                }
                if -(*x - memory[cell]) > width {
                    *x = memory[cell] - width;
                }
                memory[cell] = *x * MEMORY_LEAK;
            }
        }
        (frame[0], frame[1])
    }

    /// Return to the quiescent state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BiasSlew {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::morph::TapeParams;

    fn configured(bias_param: f64) -> (BiasSlew, BlockCoefficients) {
        let params = TapeParams {
            bias: bias_param,
            ..TapeParams::default()
        };
        let c = BlockCoefficients::derive(&params, 44100.0);
        let mut slew = BiasSlew::new();
        slew.configure(&c);
        (slew, c)
    }

    #[test]
    fn centred_bias_is_bypassed() {
        let (mut slew, c) = configured(0.5);
        for i in 0..32 {
            let x = f64::from(i) * 0.1 - 1.0;
            assert_eq!(slew.process(x, x, c.bias, c.under_bias), (x, x));
        }
    }

    #[test]
    fn over_bias_limits_step_rise() {
        let (mut slew, c) = configured(0.9);
        let (y, _) = slew.process(1.0, 1.0, c.bias, c.under_bias);
        assert!(y <= c.over_bias + 1e-12, "step {y} exceeds last cell width");
        assert!(y > 0.0);
    }

    #[test]
    fn under_bias_sticks_small_moves() {
        let (mut slew, c) = configured(0.1);
        assert!(c.under_bias > 0.0);
        let (y, _) = slew.process(1e-4, 1e-4, c.bias, c.under_bias);
        assert!(y.abs() < 1e-4);
    }

    #[test]
    fn channels_are_independent() {
        let (mut slew, c) = configured(0.8);
        let (l, r) = slew.process(0.5, -0.5, c.bias, c.under_bias);
        assert_eq!(l, -r);
    }
}
