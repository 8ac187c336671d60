//! Similarity Detection Domain Models
//!
//! Pure result types and the matching loop shared by the alignment-based
//! detectors.
//!
//! ```text
//! domain/
//! ├── algorithm_result.rs  # Per-pair result with invalidated clones
//! └── token_match.rs       # Matched positions + repeat-until-threshold loop
//! ```

pub mod algorithm_result;
pub mod token_match;

pub use algorithm_result::{AlgorithmResult, PairSummary};
pub use token_match::{match_repeatedly, TokenMatch};
