//! Per-stage configuration: detectors and parallel execution

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

// ============================================================================
// Smith-Waterman
// ============================================================================

/// Smith-Waterman local alignment parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmithWatermanConfig {
    /// Score added on a token match `h` (1..=1000)
    pub match_bonus: u32,

    /// Score removed on a mismatch `d` (1..=1000)
    pub mismatch_penalty: u32,

    /// Gap penalty `r`. Accepted and validated, not used by the recurrence.
    pub gap_penalty: u32,

    /// Run-vs-score gap at which a cell is reset (1..=100000)
    pub overlap_threshold: usize,

    /// Keep aligning while the latest match is at least this long (1..=100000)
    pub match_size_threshold: usize,
}

impl SmithWatermanConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_range(
            "smith_waterman.match_bonus",
            self.match_bonus as usize,
            1,
            1000,
            "Match bonus must be positive",
        )?;
        ConfigError::check_range(
            "smith_waterman.mismatch_penalty",
            self.mismatch_penalty as usize,
            1,
            1000,
            "Mismatch penalty must be positive",
        )?;
        ConfigError::check_range(
            "smith_waterman.gap_penalty",
            self.gap_penalty as usize,
            0,
            1000,
            "Gap penalty must be reasonable",
        )?;
        ConfigError::check_range(
            "smith_waterman.overlap_threshold",
            self.overlap_threshold,
            1,
            100_000,
            "Overlap threshold must be positive",
        )?;
        ConfigError::check_range(
            "smith_waterman.match_size_threshold",
            self.match_size_threshold,
            1,
            100_000,
            "A zero threshold would never stop matching",
        )?;
        Ok(())
    }
}

impl Default for SmithWatermanConfig {
    fn default() -> Self {
        Self {
            match_bonus: 1,
            mismatch_penalty: 1,
            gap_penalty: 1,
            overlap_threshold: 5,
            match_size_threshold: 5,
        }
    }
}

// ============================================================================
// Suffix Tree
// ============================================================================

/// Suffix-tree longest-common-substring parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuffixTreeConfig {
    /// Keep searching while the latest match is at least this long (1..=100000)
    pub match_size_threshold: usize,
}

impl SuffixTreeConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_range(
            "suffix_tree.match_size_threshold",
            self.match_size_threshold,
            1,
            100_000,
            "A zero threshold would never stop matching",
        )
    }
}

impl Default for SuffixTreeConfig {
    fn default() -> Self {
        Self {
            match_size_threshold: 5,
        }
    }
}

// ============================================================================
// Parallel execution
// ============================================================================

/// What a batch does when one pair fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// First failing pair aborts the batch; no results are returned
    #[default]
    AbortBatch,

    /// Failing pairs are reported next to the successful results
    CollectErrors,
}

/// Parallel execution configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Batch behavior on per-pair failure
    pub failure_policy: FailurePolicy,
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "parallel.num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast | Preset::Balanced => Self {
                num_workers: 0,
                failure_policy: FailurePolicy::AbortBatch,
            },
            Preset::Thorough => Self {
                num_workers: 0,
                failure_policy: FailurePolicy::CollectErrors,
            },
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
