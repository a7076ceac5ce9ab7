//! Test signal generation command.

use clap::Args;
use spool_io::{StereoSamples, WavSpec, write_wav_stereo};
use std::f64::consts::TAU;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f64,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f64,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,
}

/// Sine wave of `frames` samples.
fn sine(frames: usize, freq: f64, amplitude: f64, sample_rate: f64) -> Vec<f32> {
    let step = TAU * freq / sample_rate;
    (0..frames)
        .map(|i| (amplitude * (step * i as f64).sin()) as f32)
        .collect()
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("duration must be a positive number of seconds");
    }
    if !(0.0..=1.0).contains(&args.amplitude) {
        anyhow::bail!("amplitude {} is outside 0.0..=1.0", args.amplitude);
    }
    if !(args.freq.is_finite() && args.freq > 0.0) {
        anyhow::bail!("frequency must be positive");
    }

    let sample_rate = f64::from(args.sample_rate);
    let frames = (args.duration * sample_rate).round() as usize;

    println!(
        "Generating {:.0} Hz sine, {:.2}s @ {} Hz...",
        args.freq, args.duration, args.sample_rate
    );

    let samples = StereoSamples::from_mono(sine(frames, args.freq, args.amplitude, sample_rate));
    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    write_wav_stereo(&args.output, &samples, spec)?;

    println!("Saved to {}", args.output.display());
    Ok(())
}
