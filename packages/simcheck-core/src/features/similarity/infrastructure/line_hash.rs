//! Line Hash Detector
//!
//! Buckets every token of both operands by the SHA-512 digest of its
//! content. A bucket holding occurrences from both sides marks all of its
//! tokens as identical; one-sided buckets are ignored.
//!
//! # Performance
//!
//! - O(n + m) bucketing, one digest per distinct lexeme
//! - Collision risk of SHA-512 treated as negligible

use super::{
    ensure_same_kind, full_match, is_same_submission, no_match, SimilarityDetector,
    LINE_COMPARE_NAME,
};
use crate::errors::{Result, SimcheckError};
use crate::features::similarity::domain::AlgorithmResult;
use crate::shared::models::{LexemeId, LexemeInterner, Submission, TokenKind, TokenList};
use rustc_hash::FxHashMap;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    index: usize,
    side: Side,
}

type ContentDigest = Vec<u8>;

/// Hash-bucket line comparison
#[derive(Debug, Clone)]
pub struct LineHashDetector {
    interner: Arc<LexemeInterner>,
}

impl LineHashDetector {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }

    fn bucket_tokens(
        &self,
        tokens: &TokenList,
        side: Side,
        digests: &mut FxHashMap<LexemeId, ContentDigest>,
        buckets: &mut FxHashMap<ContentDigest, Vec<Occurrence>>,
    ) -> Result<()> {
        for (index, token) in tokens.iter().enumerate() {
            let digest = match digests.get(&token.lexeme()) {
                Some(digest) => digest.clone(),
                None => {
                    let content = self.interner.resolve(token.lexeme())?;
                    let digest = Sha512::digest(content.as_bytes()).to_vec();
                    digests.insert(token.lexeme(), digest.clone());
                    digest
                }
            };
            buckets.entry(digest).or_default().push(Occurrence { index, side });
        }
        Ok(())
    }
}

impl SimilarityDetector for LineHashDetector {
    fn name(&self) -> &'static str {
        LINE_COMPARE_NAME
    }

    fn default_token_kind(&self) -> TokenKind {
        TokenKind::Line
    }

    fn detect(&self, a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult> {
        ensure_same_kind(a, b)?;

        if a.num_tokens() == 0 || b.num_tokens() == 0 {
            return no_match(a, b);
        }
        if is_same_submission(a, b) {
            return full_match(a, b);
        }

        let mut digests = FxHashMap::default();
        let mut buckets: FxHashMap<ContentDigest, Vec<Occurrence>> = FxHashMap::default();
        self.bucket_tokens(a.tokens(), Side::A, &mut digests, &mut buckets)?;
        self.bucket_tokens(b.tokens(), Side::B, &mut digests, &mut buckets)?;

        let mut final_a = a.tokens_copy();
        let mut final_b = b.tokens_copy();
        let mut identical_a = 0;
        let mut identical_b = 0;

        for occurrences in buckets.values() {
            let in_a = occurrences.iter().any(|o| o.side == Side::A);
            let in_b = occurrences.iter().any(|o| o.side == Side::B);
            if !(in_a && in_b) {
                continue;
            }

            for occurrence in occurrences {
                match occurrence.side {
                    Side::A => {
                        identical_a += 1;
                        final_a.set_valid(occurrence.index, false)?;
                    }
                    Side::B => {
                        identical_b += 1;
                        final_b.set_valid(occurrence.index, false)?;
                    }
                }
            }
        }

        let invalid_a = final_a.count_invalid();
        let invalid_b = final_b.count_invalid();
        if invalid_a != identical_a || invalid_b != identical_b {
            return Err(SimcheckError::internal(format!(
                "line hash invariant violated: {} invalid vs {} identical in '{}', {} vs {} in '{}'",
                invalid_a,
                identical_a,
                a.name(),
                invalid_b,
                identical_b,
                b.name()
            )));
        }

        debug!(
            a = a.name(),
            b = b.name(),
            identical_a,
            identical_b,
            buckets = buckets.len(),
            "line hash comparison"
        );

        AlgorithmResult::new(
            Arc::clone(a),
            Arc::clone(b),
            final_a,
            final_b,
            identical_a,
            identical_b,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::similarity::infrastructure::test_support::submission;

    fn detector(interner: &Arc<LexemeInterner>) -> LineHashDetector {
        LineHashDetector::new(Arc::clone(interner))
    }

    #[test]
    fn test_duplicated_line() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\nA\nB\nC\n");
        let b = submission(&interner, "b", TokenKind::Line, "A\nB\nC\n");

        let result = detector(&interner).detect(&a, &b).unwrap();
        assert_eq!(result.identical_tokens_a(), 4);
        assert_eq!(result.identical_tokens_b(), 3);
        assert_eq!(result.final_tokens_a().count_invalid(), 4);
        assert_eq!(result.final_tokens_b().count_invalid(), 3);
    }

    #[test]
    fn test_partial_overlap() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\nX\nB\n");
        let b = submission(&interner, "b", TokenKind::Line, "B\nY\n");

        let result = detector(&interner).detect(&a, &b).unwrap();
        assert_eq!(result.identical_tokens_a(), 1);
        assert_eq!(result.identical_tokens_b(), 1);
        assert!(result.final_tokens_a().get(0).unwrap().is_valid());
        assert!(!result.final_tokens_a().get(2).unwrap().is_valid());
        assert!(!result.final_tokens_b().get(0).unwrap().is_valid());
    }

    #[test]
    fn test_no_overlap_leaves_lists_untouched() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\nB\n");
        let b = submission(&interner, "b", TokenKind::Line, "C\nD\n");

        let result = detector(&interner).detect(&a, &b).unwrap();
        assert_eq!(result.identical_tokens_a(), 0);
        assert_eq!(result.identical_tokens_b(), 0);
        assert_eq!(**result.final_tokens_a(), **a.tokens());
        assert_eq!(**result.final_tokens_b(), **b.tokens());
    }

    #[test]
    fn test_self_match() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\nB\nA\n");

        let result = detector(&interner).detect(&a, &a).unwrap();
        assert_eq!(result.identical_tokens_a(), 3);
        assert_eq!(result.identical_tokens_b(), 3);
        assert_eq!(result.final_tokens_a().count_valid(), 0);
    }

    #[test]
    fn test_symmetry() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\nA\nB\nC\nQ\n");
        let b = submission(&interner, "b", TokenKind::Line, "A\nB\nC\nR\n");
        let d = detector(&interner);

        let ab = d.detect(&a, &b).unwrap();
        let ba = d.detect(&b, &a).unwrap();
        assert_eq!(ab.identical_tokens_a(), ba.identical_tokens_b());
        assert_eq!(ab.identical_tokens_b(), ba.identical_tokens_a());
        assert_eq!(**ab.final_tokens_a(), **ba.final_tokens_b());
    }

    #[test]
    fn test_type_guard() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Line, "A\n");
        let b = submission(&interner, "b", TokenKind::Character, "A");

        let err = detector(&interner).detect(&a, &b).unwrap_err();
        assert!(matches!(err, SimcheckError::TokenTypeMismatch { .. }));
    }

    #[test]
    fn test_works_on_any_kind() {
        let interner = LexemeInterner::shared();
        let a = submission(&interner, "a", TokenKind::Character, "abc");
        let b = submission(&interner, "b", TokenKind::Character, "cde");

        let result = detector(&interner).detect(&a, &b).unwrap();
        assert_eq!(result.identical_tokens_a(), 1);
        assert_eq!(result.identical_tokens_b(), 1);
    }
}
