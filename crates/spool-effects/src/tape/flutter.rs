//! Wow and flutter.
//!
//! Each channel writes into a 1000-sample circular buffer and reads back at
//! a sinusoidally modulated offset. The sweep rate of each channel is
//! re-picked once per cycle from two random candidates, choosing whichever
//! sits closer to the other channel's current position so the two sides
//! wander together without locking.

use core::f64::consts::PI;
use libm::{floor, sin};
use spool_core::XorShift32;

/// Addressable length of each delay line.
pub const FLUTTER_BUFFER_LEN: usize = 1000;
/// Allocated length including guard slots.
const FLUTTER_STORAGE_LEN: usize = FLUTTER_BUFFER_LEN + 2;

const TWO_PI: f64 = PI * 2.0;

/// Stereo flutter state.
#[derive(Debug, Clone, PartialEq)]
pub struct Flutter {
    delay: [[f64; FLUTTER_STORAGE_LEN]; 2],
    cursor: usize,
    sweep: [f64; 2],
    next_max: [f64; 2],
}

impl Flutter {
    /// Quiescent state: empty buffers, both sweeps at π.
    pub fn new() -> Self {
        Self {
            delay: [[0.0; FLUTTER_STORAGE_LEN]; 2],
            cursor: 0,
            sweep: [PI; 2],
            next_max: [0.5; 2],
        }
    }

    /// Write cursor, always in `0..FLUTTER_BUFFER_LEN`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current sweep phases `[left, right]`.
    pub fn sweeps(&self) -> [f64; 2] {
        self.sweep
    }

    /// Process one stereo frame.
    ///
    /// A non-positive `depth` bypasses the stage and leaves all state
    /// untouched. `rng` supplies the per-channel random streams used to pick
    /// the next sweep rate.
    pub fn process(
        &mut self,
        left: f64,
        right: f64,
        depth: f64,
        frequency: f64,
        rng: &mut [XorShift32; 2],
    ) -> (f64, f64) {
        if depth <= 0.0 {
            return (left, right);
        }

        let left = self.process_channel(0, left, depth, frequency, &mut rng[0]);
        let right = self.process_channel(1, right, depth, frequency, &mut rng[1]);

        self.cursor = if self.cursor == 0 {
            FLUTTER_BUFFER_LEN - 1
        } else {
            self.cursor - 1
        };
        (left, right)
    }

    fn process_channel(
        &mut self,
        ch: usize,
        input: f64,
        depth: f64,
        frequency: f64,
        rng: &mut XorShift32,
    ) -> f64 {
        let other = 1 - ch;
        self.delay[ch][self.cursor] = input;

        let offset = depth + (depth * sin(self.sweep[ch]));
        self.sweep[ch] += self.next_max[ch] * frequency;
        if self.sweep[ch] > TWO_PI {
            self.sweep[ch] -= TWO_PI;
            rng.advance();
            let flut_a = 0.24 + (rng.unit() * 0.74);
            rng.advance();
            let flut_b = 0.24 + (rng.unit() * 0.74);
            let partner = sin(self.sweep[other] + self.next_max[other]);
            self.next_max[ch] = if (flut_a - partner).abs() < (flut_b - partner).abs() {
                flut_a
            } else {
                flut_b
            };
        }

        let whole = floor(offset);
        let frac = offset - whole;
        let first = (self.cursor + whole as usize) % FLUTTER_BUFFER_LEN;
        let second = (first + 1) % FLUTTER_BUFFER_LEN;
        (self.delay[ch][first] * (1.0 - frac)) + (self.delay[ch][second] * frac)
    }

    /// Return to the quiescent state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Flutter {
    fn default() -> Self {
        Self::new()
    }
}
