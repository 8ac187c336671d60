//! Top-level detection configuration and YAML I/O
//!
//! # YAML schema (v1)
//!
//! ```yaml
//! version: 1
//! preset: balanced          # optional base, defaults to balanced
//! algorithm: suffixtree     # optional overrides below
//! token_kind: whitespace
//! preprocessors: [deduplicate]
//! smith_waterman:
//!   overlap_threshold: 8
//! suffix_tree:
//!   match_size_threshold: 6
//! parallel:
//!   num_workers: 4
//!   failure_policy: collect_errors
//! ```

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::stage_configs::{ParallelConfig, SmithWatermanConfig, SuffixTreeConfig};
use crate::features::preprocessing::WHITESPACE_DEDUP_NAME;
use crate::features::similarity::infrastructure::{
    LINE_COMPARE_NAME, SMITH_WATERMAN_NAME, SUFFIX_TREE_NAME,
};
use crate::shared::models::TokenKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Complete configuration of one detection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Registered detector name
    pub algorithm: String,

    /// Token kind override; `None` uses the detector's default kind
    pub token_kind: Option<TokenKind>,

    /// Registered preprocessor names, applied in order
    pub preprocessors: Vec<String>,

    pub smith_waterman: SmithWatermanConfig,

    pub suffix_tree: SuffixTreeConfig,

    pub parallel: ParallelConfig,
}

impl DetectionConfig {
    /// Complete configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        let (algorithm, preprocessors) = match preset {
            Preset::Fast => (LINE_COMPARE_NAME, vec![]),
            Preset::Balanced => (SMITH_WATERMAN_NAME, vec![]),
            Preset::Thorough => (SUFFIX_TREE_NAME, vec![WHITESPACE_DEDUP_NAME.to_string()]),
        };

        Self {
            algorithm: algorithm.to_string(),
            token_kind: None,
            preprocessors,
            smith_waterman: SmithWatermanConfig::default(),
            suffix_tree: SuffixTreeConfig::default(),
            parallel: ParallelConfig::from_preset(preset),
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_token_kind(mut self, kind: TokenKind) -> Self {
        self.token_kind = Some(kind);
        self
    }

    pub fn with_preprocessor(mut self, name: impl Into<String>) -> Self {
        self.preprocessors.push(name.into());
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        if self.algorithm.trim().is_empty() {
            return Err(ConfigError::Custom(
                "algorithm name must not be empty".to_string(),
            ));
        }
        self.smith_waterman.validate()?;
        self.suffix_tree.validate()?;
        self.parallel.validate()?;
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Export as a v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: None,
            algorithm: Some(self.algorithm.clone()),
            token_kind: self.token_kind,
            preprocessors: Some(self.preprocessors.clone()),
            smith_waterman: Some(self.smith_waterman),
            suffix_tree: Some(self.suffix_tree),
            parallel: Some(self.parallel),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    preset: Option<Preset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    algorithm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_kind: Option<TokenKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    preprocessors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    smith_waterman: Option<SmithWatermanConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    suffix_tree: Option<SuffixTreeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallel: Option<ParallelConfig>,
}

impl ConfigFileV1 {
    fn into_config(self) -> DetectionConfig {
        let mut config = DetectionConfig::preset(self.preset.unwrap_or_default());

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if self.token_kind.is_some() {
            config.token_kind = self.token_kind;
        }
        if let Some(preprocessors) = self.preprocessors {
            config.preprocessors = preprocessors;
        }
        if let Some(sw) = self.smith_waterman {
            config.smith_waterman = sw;
        }
        if let Some(st) = self.suffix_tree {
            config.suffix_tree = st;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }

        config
    }
}
