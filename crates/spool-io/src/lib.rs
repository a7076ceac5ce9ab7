//! Audio file I/O for the spool tape engine.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for
//!   loading and saving two-channel audio
//! - **Offline rendering**: [`render_stereo`] for running any
//!   [`Effect`](spool_core::Effect) over a whole file in fixed blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spool_io::{read_wav_stereo, render_stereo, write_wav_stereo};
//! use spool_effects::TapeEngine;
//!
//! let (input, spec) = read_wav_stereo("input.wav")?;
//!
//! let mut tape = TapeEngine::new(f64::from(spec.sample_rate));
//! tape.set_macro(0.6);
//! let output = render_stereo(&mut tape, &input, 512, |_| {})?;
//!
//! write_wav_stereo("output.wav", &output, spec)?;
//! ```

mod render;
mod wav;

pub use render::render_stereo;
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested output bit depth is not supported.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Rendering was asked to use a zero-length block.
    #[error("Block size must be at least 1")]
    InvalidBlockSize,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
