//! Spool Effects - analog tape emulation
//!
//! This crate provides the tape engine built on spool-core:
//!
//! - [`TapeEngine`] - The complete stereo tape chain driven by one Drive macro
//! - [`MorphEngine`] - Macro-to-parameter mapping with block-rate smoothing
//! - [`MacroHandle`] - Lock-free Drive handoff from a control thread
//!
//! The individual chain stages live in [`tape`] and can be used on their own.
//!
//! ## Example
//!
//! ```rust
//! use spool_effects::TapeEngine;
//!
//! let mut engine = TapeEngine::new(48000.0);
//! engine.set_macro(0.6);
//!
//! let left = [0.1f32; 64];
//! let right = [0.1f32; 64];
//! let mut out_l = [0.0f32; 64];
//! let mut out_r = [0.0f32; 64];
//! engine.process_block(&[&left[..], &right[..]], &mut [&mut out_l[..], &mut out_r[..]], 64);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod tape;

// Re-export main types at crate root
pub use tape::{
    BlockCoefficients, EngineSettings, MacroHandle, MorphEngine, TapeEngine, TapeParams,
};
