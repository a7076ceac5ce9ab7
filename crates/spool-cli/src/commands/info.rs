//! Engine information command.

use clap::Args;
use serde_json::json;
use spool_core::{ParamFlags, ParameterInfo};
use spool_effects::{BlockCoefficients, TapeEngine, TapeParams};

#[derive(Args)]
pub struct InfoArgs {
    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Drive macro (0.0 - 1.0) to derive settings for
    #[arg(short, long, default_value = "0.0")]
    drive: f64,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

const PARAM_LABELS: [&str; 10] = [
    "input",
    "tilt",
    "shape",
    "flutter",
    "flutter_speed",
    "bias",
    "head_bump",
    "head_freq",
    "output",
    "auto_gain",
];

/// Engine settled at `drive`, with one silent block run so the block
/// coefficients reflect the settled parameters.
fn settled_engine(sample_rate: u32, drive: f64) -> TapeEngine {
    let mut engine = TapeEngine::new(f64::from(sample_rate));
    engine.set_macro(drive);
    engine.reset();

    let silence = [0.0f32; 64];
    let mut out_l = [0.0f32; 64];
    let mut out_r = [0.0f32; 64];
    engine.process_block(
        &[&silence[..], &silence[..]],
        &mut [&mut out_l[..], &mut out_r[..]],
        silence.len(),
    );
    engine
}

fn params_json(params: &TapeParams) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = PARAM_LABELS
        .iter()
        .zip(params.to_array())
        .map(|(label, value)| ((*label).to_string(), json!(value)))
        .collect();
    serde_json::Value::Object(map)
}

fn coefficients_json(c: &BlockCoefficients) -> serde_json::Value {
    json!({
        "scale": c.scale,
        "spacing": c.spacing,
        "input_gain": c.input_gain,
        "dubly_amount": c.dubly_amount,
        "outly_amount": c.outly_amount,
        "iir_enc_freq": c.iir_enc_freq,
        "iir_dec_freq": c.iir_dec_freq,
        "iir_mid_freq": c.iir_mid_freq,
        "flutter_depth": c.flutter_depth,
        "flutter_frequency": c.flutter_frequency,
        "bias": c.bias,
        "under_bias": c.under_bias,
        "over_bias": c.over_bias,
        "head_bump_drive": c.head_bump_drive,
        "head_bump_damping": c.head_bump_damping,
        "head_bump_mix": c.head_bump_mix,
        "iir_sub_freq": c.iir_sub_freq,
        "head_bump_freq_ratio": c.head_bump_freq_ratio,
        "output_gain": c.output_gain,
        "auto_gain": c.auto_gain,
    })
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }
    if !args.drive.is_finite() || !(0.0..=1.0).contains(&args.drive) {
        anyhow::bail!("drive {} is outside 0.0..=1.0", args.drive);
    }

    let engine = settled_engine(args.sample_rate, args.drive);
    let Some(drive) = engine.param_info(0) else {
        anyhow::bail!("engine exposes no drive parameter");
    };
    let params = engine.params();
    let coefficients = engine.coefficients();

    if args.json {
        let info = json!({
            "sample_rate": args.sample_rate,
            "drive": args.drive,
            "latency_samples": engine.spacing(),
            "parameter": {
                "name": drive.name,
                "id": drive.id.0,
                "string_id": drive.string_id,
                "min": drive.min,
                "max": drive.max,
                "default": drive.default,
                "step": drive.step,
                "automatable": drive.flags.contains(ParamFlags::AUTOMATABLE),
                "unit": drive.unit.suffix().trim(),
            },
            "params": params_json(&params),
            "coefficients": coefficients_json(coefficients),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    println!("  Spool tape engine @ {} Hz", args.sample_rate);
    println!("{}", "=".repeat(60));
    println!(
        "\n  Parameter: {} [{}] {}..{}{} (default {})",
        drive.name,
        drive.string_id,
        drive.min,
        drive.max,
        drive.unit.suffix(),
        drive.default
    );
    if drive.flags.contains(ParamFlags::AUTOMATABLE) {
        println!("             automatable, step {}", drive.step);
    }
    println!("  Latency:   {} samples", engine.spacing());

    println!("\n  Settled parameters at drive {:.2}:", args.drive);
    for (label, value) in PARAM_LABELS.iter().zip(params.to_array()) {
        println!("    {label:<14} {value:.6}");
    }

    println!("\n  Block coefficients:");
    let rows = [
        ("input_gain", coefficients.input_gain),
        ("dubly_amount", coefficients.dubly_amount),
        ("outly_amount", coefficients.outly_amount),
        ("iir_enc_freq", coefficients.iir_enc_freq),
        ("iir_dec_freq", coefficients.iir_dec_freq),
        ("iir_mid_freq", coefficients.iir_mid_freq),
        ("flutter_depth", coefficients.flutter_depth),
        ("flutter_freq", coefficients.flutter_frequency),
        ("bias", coefficients.bias),
        ("under_bias", coefficients.under_bias),
        ("over_bias", coefficients.over_bias),
        ("bump_drive", coefficients.head_bump_drive),
        ("bump_damping", coefficients.head_bump_damping),
        ("bump_mix", coefficients.head_bump_mix),
        ("iir_sub_freq", coefficients.iir_sub_freq),
        ("bump_ratio", coefficients.head_bump_freq_ratio),
        ("output_gain", coefficients.output_gain),
        ("auto_gain", coefficients.auto_gain),
    ];
    for (label, value) in rows {
        println!("    {label:<14} {value:.6}");
    }
    println!();

    Ok(())
}
