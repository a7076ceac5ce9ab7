//! Integration tests for spool-config.
//!
//! These tests exercise file round trips and the hand-off into the engine.

use spool_config::{ConfigError, SpoolConfig};
use spool_effects::TapeEngine;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("render.toml");

    let mut config = SpoolConfig::default();
    config.engine.drive = 0.4;
    config.engine.block_size = 1024;
    config.dither.enabled = false;
    config.output.bit_depth = 16;

    config.save(&path).expect("save should create parent directories");
    let loaded = SpoolConfig::load(&path).expect("load should succeed");
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = SpoolConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[engine]\nblock_size = 100000\n").unwrap();

    let err = SpoolConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "engine.block_size", .. }));
}

#[test]
fn test_config_drives_engine() {
    let config = SpoolConfig::from_toml(
        "[engine]\ndrive = 0.8\n[dither]\nseed_left = 99999\nseed_right = 99999\n",
    )
    .unwrap();

    let mut engine = TapeEngine::with_settings(48000.0, config.engine_settings());
    engine.set_macro(config.engine.drive);
    engine.reset();

    assert_eq!(engine.macro_value(), 0.8);
    assert_eq!(engine.settings().seed_left, engine.settings().seed_right);

    let input = [0.4f32; 64];
    let mut out_l = [0.0f32; 64];
    let mut out_r = [0.0f32; 64];
    engine.process_block(
        &[&input[..], &input[..]],
        &mut [&mut out_l[..], &mut out_r[..]],
        64,
    );
    assert!(out_l.iter().all(|x| x.is_finite()));
}
