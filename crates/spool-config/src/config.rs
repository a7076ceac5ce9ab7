//! Config file format and operations.

use serde::{Deserialize, Serialize};
use spool_effects::tape::{DEFAULT_BLOCK_SIZE, DEFAULT_SEED_LEFT, DEFAULT_SEED_RIGHT};
use spool_effects::EngineSettings;
use std::path::Path;

use crate::error::ConfigError;

/// Largest accepted block size.
pub const MAX_BLOCK_SIZE: usize = 65536;
/// Largest accepted sample-rate hint in Hz.
pub const MAX_SAMPLE_RATE: u32 = 768_000;
/// Output bit depths the WAV writer supports.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Render configuration for the tape engine.
///
/// Every section and field is optional in the file; missing values take
/// their defaults.
///
/// # TOML Format
///
/// ```toml
/// [engine]
/// sample_rate = 96000
/// block_size = 256
/// drive = 0.6
///
/// [dither]
/// enabled = true
/// seed_left = 195948557
/// seed_right = 3735928559
///
/// [output]
/// bit_depth = 24
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpoolConfig {
    /// Engine settings.
    pub engine: EngineSection,
    /// Dither settings.
    pub dither: DitherSection,
    /// Output file settings.
    pub output: OutputSection,
}

/// `[engine]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSection {
    /// Sample rate hint; the input file's rate is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Frames per processing block.
    pub block_size: usize,
    /// Drive macro in [0, 1].
    pub drive: f64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            sample_rate: None,
            block_size: DEFAULT_BLOCK_SIZE,
            drive: 0.0,
        }
    }
}

/// `[dither]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DitherSection {
    /// Add output dither.
    pub enabled: bool,
    /// Left-channel generator seed.
    pub seed_left: u32,
    /// Right-channel generator seed.
    pub seed_right: u32,
}

impl Default for DitherSection {
    fn default() -> Self {
        Self {
            enabled: true,
            seed_left: DEFAULT_SEED_LEFT,
            seed_right: DEFAULT_SEED_RIGHT,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSection {
    /// Bits per sample: 16 or 24 (integer PCM) or 32 (float).
    pub bit_depth: u16,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { bit_depth: 32 }
    }
}

impl SpoolConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SpoolConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if let Some(rate) = engine.sample_rate
            && (rate == 0 || rate > MAX_SAMPLE_RATE)
        {
            return Err(ConfigError::invalid(
                "engine.sample_rate",
                format!("{rate} is outside 1..={MAX_SAMPLE_RATE}"),
            ));
        }
        if !(1..=MAX_BLOCK_SIZE).contains(&engine.block_size) {
            return Err(ConfigError::invalid(
                "engine.block_size",
                format!("{} is outside 1..={MAX_BLOCK_SIZE}", engine.block_size),
            ));
        }
        if !engine.drive.is_finite() || !(0.0..=1.0).contains(&engine.drive) {
            return Err(ConfigError::invalid(
                "engine.drive",
                format!("{} is outside 0.0..=1.0", engine.drive),
            ));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.output.bit_depth) {
            return Err(ConfigError::invalid(
                "output.bit_depth",
                format!("{} is not one of 16, 24, 32", self.output.bit_depth),
            ));
        }
        Ok(())
    }

    /// Engine construction settings from the `[dither]` section.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings::from(self.dither)
    }
}

impl From<DitherSection> for EngineSettings {
    fn from(dither: DitherSection) -> Self {
        EngineSettings {
            dither: dither.enabled,
            seed_left: dither.seed_left,
            seed_right: dither.seed_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SpoolConfig::from_toml("").unwrap();
        assert_eq!(config, SpoolConfig::default());
        assert_eq!(config.engine.block_size, 512);
        assert_eq!(config.engine.drive, 0.0);
        assert!(config.dither.enabled);
        assert_eq!(config.dither.seed_left, 0x0BAD_F00D);
        assert_eq!(config.dither.seed_right, 0xDEAD_BEEF);
        assert_eq!(config.output.bit_depth, 32);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config = SpoolConfig::from_toml("[engine]\ndrive = 0.25\n").unwrap();
        assert_eq!(config.engine.drive, 0.25);
        assert_eq!(config.engine.block_size, 512);
        assert_eq!(config.engine.sample_rate, None);
    }

    #[test]
    fn rejects_out_of_range_drive() {
        let err = SpoolConfig::from_toml("[engine]\ndrive = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.drive", .. }));
    }

    #[test]
    fn rejects_zero_block_size() {
        let err = SpoolConfig::from_toml("[engine]\nblock_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.block_size", .. }));
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let err = SpoolConfig::from_toml("[output]\nbit_depth = 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "output.bit_depth", .. }));
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let err = SpoolConfig::from_toml("[engine]\nsample_rate = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.sample_rate", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SpoolConfig::from_toml("[engine\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn dither_section_converts_to_settings() {
        let config = SpoolConfig::from_toml(
            "[dither]\nenabled = false\nseed_left = 40000\nseed_right = 50000\n",
        )
        .unwrap();
        let settings = config.engine_settings();
        assert!(!settings.dither);
        assert_eq!(settings.seed_left, 40000);
        assert_eq!(settings.seed_right, 50000);
    }

    #[test]
    fn to_toml_round_trips() {
        let mut config = SpoolConfig::default();
        config.engine.sample_rate = Some(96000);
        config.engine.drive = 0.75;
        config.output.bit_depth = 24;
        let text = config.to_toml().unwrap();
        assert_eq!(SpoolConfig::from_toml(&text).unwrap(), config);
    }
}
