//! Tape chain stages and the engine that runs them.
//!
//! Each stage keeps its own state and exposes `new`/`process`/`reset`:
//!
//! | Module | Stage |
//! |--------|-------|
//! | [`dither`] | Denormal guard and output dither |
//! | [`dubly`] | Encode/decode companding |
//! | [`flutter`] | Wow and flutter delay |
//! | [`bias`] | Golden-ratio slew network |
//! | [`bands`] | Band split, sine lows, thinned highs |
//! | [`head_bump`] | Integrator plus twin bandpass |
//! | [`clip`] | Hysteresis clipper with delay FIFO |
//!
//! [`morph`] maps the Drive macro to parameters and [`coefficients`]
//! derives per-block values from them.

pub mod bands;
pub mod bias;
pub mod clip;
pub mod coefficients;
pub mod dither;
pub mod dubly;
mod engine;
pub mod flutter;
mod handle;
pub mod head_bump;
pub mod morph;

pub use coefficients::BlockCoefficients;
pub use engine::{
    DEFAULT_BLOCK_SIZE, DEFAULT_SEED_LEFT, DEFAULT_SEED_RIGHT, EngineSettings, TapeEngine,
};
pub use handle::MacroHandle;
pub use morph::{MorphEngine, TapeParams};
