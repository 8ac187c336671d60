//! Pairwise Similarity Detection
//!
//! Three detectors over same-kind submissions:
//! - Line hash: content-hash buckets, every shared token matches
//! - Smith-Waterman: repeated local alignment
//! - Suffix tree: repeated longest common substring
//!
//! # Hexagonal Architecture
//!
//! ```text
//! External (pipeline / usecases)
//!           ↓
//! domain/ (AlgorithmResult, TokenMatch, repeat loop)
//!           ↓
//! infrastructure/ (detectors)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use crate::features::similarity::{SimilarityDetector, SuffixTreeDetector};
//!
//! let result = SuffixTreeDetector::default().detect(&a, &b)?;
//! println!("{:.1}%", result.percent_matched_a() * 100.0);
//! ```

pub mod domain;
pub mod infrastructure;

// Re-export domain types
pub use domain::{match_repeatedly, AlgorithmResult, PairSummary, TokenMatch};

// Re-export detectors
pub use infrastructure::{
    Alignment, CommonSubstring, LineHashDetector, SharedSuffixTrie, SimilarityDetector,
    SmithWatermanDetector, SuffixTreeDetector, LINE_COMPARE_NAME, SMITH_WATERMAN_NAME,
    SUFFIX_TREE_NAME,
};
