//! File-based tape processing command.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use spool_config::SpoolConfig;
use spool_core::linear_to_db;
use spool_effects::TapeEngine;
use spool_io::{StereoSamples, WavSpec, read_wav_stereo, render_stereo, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Drive macro (0.0 - 1.0), overrides the config file
    #[arg(short, long)]
    drive: Option<f64>,

    /// Processing block size, overrides the config file
    #[arg(long)]
    block_size: Option<usize>,

    /// Render config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable output dither
    #[arg(long)]
    no_dither: bool,

    /// Output bit depth (16, 24, or 32), overrides the config file
    #[arg(long)]
    bit_depth: Option<u16>,
}

impl ProcessArgs {
    /// Load the config file (or defaults) and apply command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<SpoolConfig> {
        let mut config = match &self.config {
            Some(path) => SpoolConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SpoolConfig::default(),
        };

        if let Some(drive) = self.drive {
            config.engine.drive = drive;
        }
        if let Some(block_size) = self.block_size {
            config.engine.block_size = block_size;
        }
        if let Some(bit_depth) = self.bit_depth {
            config.output.bit_depth = bit_depth;
        }
        if self.no_dither {
            config.dither.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn print_levels(label: &str, samples: &StereoSamples) {
    println!(
        "  {label}: RMS {:.1} dB, peak {:.1} dB",
        linear_to_db(f64::from(samples.rms())),
        linear_to_db(f64::from(samples.peak()))
    );
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if input.is_empty() {
        anyhow::bail!("{} contains no audio", args.input.display());
    }

    let sample_rate = spec.sample_rate;
    println!(
        "  {} frames, {} Hz, {:.2}s",
        input.len(),
        sample_rate,
        input.len() as f64 / f64::from(sample_rate)
    );
    print_levels("input", &input);

    if let Some(hint) = config.engine.sample_rate
        && hint != sample_rate
    {
        tracing::warn!(
            hint,
            file_rate = sample_rate,
            "config sample rate differs from input, using the file's rate"
        );
    }

    let block_size = config.engine.block_size;
    let mut engine =
        TapeEngine::with_settings(f64::from(sample_rate), config.engine_settings());
    engine.init(f64::from(sample_rate), block_size);
    engine.set_macro(config.engine.drive);
    engine.reset();

    println!(
        "Tape: drive {:.2}, block {}, latency {} samples{}",
        config.engine.drive,
        block_size,
        engine.spacing(),
        if config.dither.enabled { "" } else { ", no dither" }
    );

    let pb = ProgressBar::new(input.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = render_stereo(&mut engine, &input, block_size, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_and_clear();

    print_levels("output", &output);

    let out_spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: config.output.bit_depth,
    };
    println!("Writing {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Done!");
    Ok(())
}
