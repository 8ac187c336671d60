//! Similarity Detection Infrastructure
//!
//! Implements the three pairwise detectors:
//! - Line hash: SHA-512 buckets of token content, O(n)
//! - Smith-Waterman: local alignment over score tables, O(n·m) per pass
//! - Suffix tree: longest common substring over a shared suffix trie

use crate::errors::{Result, SimcheckError};
use crate::features::similarity::domain::AlgorithmResult;
use crate::shared::models::{Submission, TokenKind};
use std::sync::Arc;

pub mod line_hash;
pub mod smith_waterman;
pub mod suffix_tree;

pub use line_hash::LineHashDetector;
pub use smith_waterman::{Alignment, SmithWatermanDetector};
pub use suffix_tree::{CommonSubstring, SharedSuffixTrie, SuffixTreeDetector};

/// Registry name of the line hash detector
pub const LINE_COMPARE_NAME: &str = "linecompare";
/// Registry name of the Smith-Waterman detector
pub const SMITH_WATERMAN_NAME: &str = "smithwaterman";
/// Registry name of the suffix-tree detector
pub const SUFFIX_TREE_NAME: &str = "suffixtree";

/// Similarity detector trait
///
/// All detectors implement this interface for uniform API. Operands must
/// share a token kind; detectors check this before any work.
pub trait SimilarityDetector: Send + Sync {
    /// Get detector name
    fn name(&self) -> &'static str;

    /// Token kind submissions should be tokenized with for this detector
    fn default_token_kind(&self) -> TokenKind;

    /// Compare two submissions
    fn detect(&self, a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult>;
}

/// Fail with `TokenTypeMismatch` unless both operands share a kind
pub(crate) fn ensure_same_kind(a: &Submission, b: &Submission) -> Result<()> {
    if a.token_kind() != b.token_kind() {
        return Err(SimcheckError::type_mismatch(a.token_kind(), b.token_kind()));
    }
    Ok(())
}

/// Same submission on both sides (by identity or default equality)
pub(crate) fn is_same_submission(a: &Arc<Submission>, b: &Arc<Submission>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}

/// Every token matched on both sides
pub(crate) fn full_match(a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult> {
    let mut final_a = a.tokens_copy();
    let mut final_b = b.tokens_copy();
    final_a.invalidate_all();
    final_b.invalidate_all();

    AlgorithmResult::new(
        Arc::clone(a),
        Arc::clone(b),
        final_a,
        final_b,
        a.num_tokens(),
        b.num_tokens(),
    )
}

/// Nothing matched; both final lists are untouched copies
pub(crate) fn no_match(a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult> {
    AlgorithmResult::new(
        Arc::clone(a),
        Arc::clone(b),
        a.tokens_copy(),
        b.tokens_copy(),
        0,
        0,
    )
}
