//! Configuration for offline rendering with the spool tape engine.
//!
//! A [`SpoolConfig`] is a small TOML file that fixes everything about a
//! render except the input: block size, Drive, dither seeds, and output
//! bit depth. Values are validated on load so the engine never sees an
//! out-of-range setting from a file.
//!
//! # Example
//!
//! ```rust
//! use spool_config::SpoolConfig;
//!
//! let config = SpoolConfig::from_toml(
//!     r#"
//!     [engine]
//!     block_size = 128
//!     drive = 0.6
//!
//!     [dither]
//!     enabled = false
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.engine.block_size, 128);
//! assert!(!config.engine_settings().dither);
//! ```

mod config;
mod error;

pub use config::{
    DitherSection, EngineSection, MAX_BLOCK_SIZE, MAX_SAMPLE_RATE, OutputSection,
    SUPPORTED_BIT_DEPTHS, SpoolConfig,
};
pub use error::ConfigError;
