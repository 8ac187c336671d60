//! Suffix-Tree Longest-Common-Substring Detector
//!
//! Builds one [`SharedSuffixTrie`] per pair, then repeatedly takes the longest
//! common run of still-valid tokens, invalidates it on both sides, and
//! searches again while runs stay at or above the size threshold.
//!
//! ```text
//! suffix_tree/
//! ├── trie.rs  # Shared suffix trie, validity runs, maxSharedDepth
//! └── lcs.rs   # Deterministic longest-common-substring descent
//! ```

pub mod lcs;
pub mod trie;

pub use lcs::{find_lcs, CommonSubstring};
pub use trie::{SharedSuffixTrie, TrieNode, ValidRuns};

use super::{
    ensure_same_kind, full_match, is_same_submission, no_match, SimilarityDetector,
    SUFFIX_TREE_NAME,
};
use crate::config::SuffixTreeConfig;
use crate::errors::Result;
use crate::features::similarity::domain::{match_repeatedly, AlgorithmResult};
use crate::shared::models::{Submission, TokenKind};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SuffixTreeDetector {
    config: SuffixTreeConfig,
}

impl SuffixTreeDetector {
    pub fn new(config: SuffixTreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuffixTreeConfig {
        &self.config
    }
}

impl SimilarityDetector for SuffixTreeDetector {
    fn name(&self) -> &'static str {
        SUFFIX_TREE_NAME
    }

    fn default_token_kind(&self) -> TokenKind {
        TokenKind::Whitespace
    }

    fn detect(&self, a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult> {
        ensure_same_kind(a, b)?;

        if a.num_tokens() == 0 || b.num_tokens() == 0 {
            return no_match(a, b);
        }
        if is_same_submission(a, b) {
            return full_match(a, b);
        }

        let trie = SharedSuffixTrie::build(a.tokens(), b.tokens())?;
        debug!(
            a = a.name(),
            b = b.name(),
            nodes = trie.node_count(),
            "built shared suffix trie"
        );

        let mut final_a = a.tokens_copy();
        let mut final_b = b.tokens_copy();
        let total = match_repeatedly(
            &mut final_a,
            &mut final_b,
            self.config.match_size_threshold,
            |ta, tb| match find_lcs(&trie, ta, tb)? {
                Some(lcs) => lcs.into_token_match().map(Some),
                None => Ok(None),
            },
        )?;

        debug!(a = a.name(), b = b.name(), total, "suffix tree comparison");

        AlgorithmResult::new(Arc::clone(a), Arc::clone(b), final_a, final_b, total, total)
    }
}
