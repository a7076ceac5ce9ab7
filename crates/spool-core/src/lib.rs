//! Spool Core - DSP primitives for tape emulation
//!
//! This crate provides the building blocks the spool tape engine is made of,
//! designed for real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for stereo audio effects
//! - [`Sample`] - Buffer sample type (`f32` or `f64`), processed internally as `f64`
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Discoverable host parameters
//! - [`BlockSmoothed`] - Block-rate halfway follower for morph targets
//!
//! ## Filters
//!
//! - [`OnePole`] - Tape-style one-pole lowpass with an externally supplied coefficient
//! - [`Biquad`] - Stereo bandpass biquad (transposed direct form II)
//!
//! ## Noise
//!
//! - [`XorShift32`] - 32-bit xorshift generator used for dither, denormal guarding,
//!   and flutter rate selection
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`sample_rate_scale`],
//!   [`oversampling_spacing`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! spool-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **Bit-stable math**: `libm` double-precision functions everywhere, with or without std
//! - **Fixed-size state**: Every buffer is a plain array sized at compile time

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod effect;
pub mod math;
pub mod one_pole;
pub mod param;
pub mod param_info;
pub mod rng;
pub mod sample;

// Re-export main types at crate root
pub use biquad::Biquad;
pub use effect::Effect;
pub use math::{
    BASE_SAMPLE_RATE, GOLDEN_RATIO, MAX_SPACING, db_to_linear, linear_to_db, oversampling_spacing,
    sample_rate_scale,
};
pub use one_pole::OnePole;
pub use param::BlockSmoothed;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use rng::XorShift32;
pub use sample::Sample;
