//! Configuration System
//!
//! Two levels, as in most runs only the first is needed:
//! - Level 1: Preset - one-liner (`DetectionConfig::preset(Preset::Fast)`)
//! - Level 2: YAML/builder overrides of individual sections
//!
//! # Examples
//!
//! ```rust
//! use simcheck_core::config::{DetectionConfig, Preset};
//!
//! let config = DetectionConfig::preset(Preset::Fast);
//! assert!(config.validate().is_ok());
//!
//! let config = DetectionConfig::from_yaml_str("version: 1\nalgorithm: suffixtree\n").unwrap();
//! assert_eq!(config.algorithm, "suffixtree");
//! ```

pub mod detection_config;
pub mod error;
pub mod preset;
pub mod stage_configs;

// Re-exports
pub use detection_config::{DetectionConfig, SUPPORTED_VERSIONS};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use stage_configs::{FailurePolicy, ParallelConfig, SmithWatermanConfig, SuffixTreeConfig};
