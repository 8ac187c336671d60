//! Property-based tests for the similarity detectors
//!
//! Invariants that should hold for ALL inputs:
//! - Self-match: detect(x, x) invalidates everything
//! - Type guard: mismatched kinds always fail
//! - No overlap: disjoint vocabularies change nothing
//! - Balance: invalid tokens == identical counts
//! - Symmetry: swapping operands swaps the result
//! - Clone independence: mutating a copy never touches the source

mod common;

use common::{all_detectors, submission, text_from_indices};
use proptest::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use simcheck_core::{
    EqualityMode, LexemeInterner, LineHashDetector, SimcheckError, SimilarityDetector,
    SmithWatermanDetector, SuffixTreeDetector, TokenKind,
};
use std::sync::Arc;

// ============================================================================
// QuickCheck Tests (simpler, faster)
// ============================================================================

#[quickcheck]
fn qc_self_match_invalidates_everything(indices: Vec<u8>) -> TestResult {
    if indices.len() > 60 {
        return TestResult::discard();
    }
    let interner = LexemeInterner::shared();
    let x = submission(
        &interner,
        "x",
        TokenKind::Whitespace,
        &text_from_indices(&indices, 5),
    );

    for detector in all_detectors(&interner) {
        let result = detector.detect(&x, &x).unwrap();
        if result.identical_tokens_a() != x.num_tokens()
            || result.identical_tokens_b() != x.num_tokens()
            || result.final_tokens_a().count_valid() != 0
            || result.final_tokens_b().count_valid() != 0
        {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn qc_type_guard(kind_a: u8, kind_b: u8) -> bool {
    let kinds = TokenKind::ALL;
    let kind_a = kinds[kind_a as usize % kinds.len()];
    let kind_b = kinds[kind_b as usize % kinds.len()];

    let interner = LexemeInterner::shared();
    let a = submission(&interner, "a", kind_a, "x y\nz\n");
    let b = submission(&interner, "b", kind_b, "x y\nq\n");

    all_detectors(&interner).iter().all(|detector| {
        let outcome = detector.detect(&a, &b);
        match outcome {
            Err(SimcheckError::TokenTypeMismatch { .. }) => kind_a != kind_b,
            Ok(_) => kind_a == kind_b,
            Err(_) => false,
        }
    })
}

#[quickcheck]
fn qc_clone_independence(indices: Vec<u8>, flip: usize) -> TestResult {
    if indices.is_empty() {
        return TestResult::discard();
    }
    let interner = LexemeInterner::shared();
    let x = submission(
        &interner,
        "x",
        TokenKind::Whitespace,
        &text_from_indices(&indices, 7),
    );

    let mut copy = x.tokens_copy();
    let index = flip % copy.len();
    copy.set_valid(index, false).unwrap();

    TestResult::from_bool(
        x.tokens().get(index).unwrap().is_valid()
            && x.tokens().count_invalid() == 0
            && !copy.equals(x.tokens(), EqualityMode::Default)
            && copy.equals(x.tokens(), EqualityMode::IgnoreValidity),
    )
}

// ============================================================================
// Proptest Tests (more control over generation)
// ============================================================================

fn token_indices() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..12, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_overlap_means_no_mutation(a in token_indices(), b in token_indices()) {
        let interner = LexemeInterner::shared();
        let text_a = text_from_indices(&a, 6);
        // Shift B into a disjoint vocabulary
        let text_b = b.iter().map(|i| format!("v{}", i % 6)).collect::<Vec<_>>().join(" ");
        let sa = submission(&interner, "a", TokenKind::Whitespace, &text_a);
        let sb = submission(&interner, "b", TokenKind::Whitespace, &text_b);

        for detector in all_detectors(&interner) {
            let result = detector.detect(&sa, &sb).unwrap();
            prop_assert_eq!(result.identical_tokens_a(), 0);
            prop_assert_eq!(result.identical_tokens_b(), 0);
            prop_assert_eq!(&**result.final_tokens_a(), &**sa.tokens());
            prop_assert_eq!(&**result.final_tokens_b(), &**sb.tokens());
        }
    }

    #[test]
    fn prop_counts_match_invalidated_tokens(a in token_indices(), b in token_indices()) {
        let interner = LexemeInterner::shared();
        let sa = submission(&interner, "a", TokenKind::Whitespace, &text_from_indices(&a, 4));
        let sb = submission(&interner, "b", TokenKind::Whitespace, &text_from_indices(&b, 4));

        for detector in all_detectors(&interner) {
            let result = detector.detect(&sa, &sb).unwrap();
            prop_assert_eq!(result.final_tokens_a().count_invalid(), result.identical_tokens_a());
            prop_assert_eq!(result.final_tokens_b().count_invalid(), result.identical_tokens_b());
            prop_assert!(result.percent_matched_a() <= 1.0);
            // Originals are never touched
            prop_assert_eq!(sa.tokens().count_invalid(), 0);
            prop_assert_eq!(sb.tokens().count_invalid(), 0);
        }
    }

    #[test]
    fn prop_alignment_detectors_are_balanced(a in token_indices(), b in token_indices()) {
        let interner = LexemeInterner::shared();
        let sa = submission(&interner, "a", TokenKind::Whitespace, &text_from_indices(&a, 3));
        let sb = submission(&interner, "b", TokenKind::Whitespace, &text_from_indices(&b, 3));

        for detector in all_detectors(&interner).into_iter().skip(1) {
            let result = detector.detect(&sa, &sb).unwrap();
            prop_assert_eq!(result.identical_tokens_a(), result.identical_tokens_b());
        }
    }

    #[test]
    fn prop_line_hash_symmetry(a in token_indices(), b in token_indices()) {
        let interner = LexemeInterner::shared();
        let text = |v: &[u8]| v.iter().map(|i| format!("line {}\n", i % 5)).collect::<String>();
        let sa = submission(&interner, "a", TokenKind::Line, &text(&a));
        let sb = submission(&interner, "b", TokenKind::Line, &text(&b));
        let detector = LineHashDetector::new(Arc::clone(&interner));

        let ab = detector.detect(&sa, &sb).unwrap();
        let ba = detector.detect(&sb, &sa).unwrap();
        prop_assert_eq!(ab.identical_tokens_a(), ba.identical_tokens_b());
        prop_assert_eq!(ab.identical_tokens_b(), ba.identical_tokens_a());
        prop_assert_eq!(&**ab.final_tokens_a(), &**ba.final_tokens_b());
        prop_assert_eq!(&**ab.final_tokens_b(), &**ba.final_tokens_a());
    }

    #[test]
    fn prop_alignment_detectors_are_symmetric(
        a in prop::collection::vec(0u8..3, 0..30),
        b in prop::collection::vec(0u8..3, 0..30),
    ) {
        let interner = LexemeInterner::shared();
        let sa = submission(&interner, "a", TokenKind::Whitespace, &text_from_indices(&a, 3));
        let sb = submission(&interner, "b", TokenKind::Whitespace, &text_from_indices(&b, 3));
        let detectors: Vec<Box<dyn SimilarityDetector>> = vec![
            Box::new(SmithWatermanDetector::default()),
            Box::new(SuffixTreeDetector::default()),
        ];

        for detector in detectors {
            let ab = detector.detect(&sa, &sb).unwrap();
            let ba = detector.detect(&sb, &sa).unwrap();
            prop_assert_eq!(ab.identical_tokens_a(), ba.identical_tokens_b(), "{}", detector.name());
            prop_assert_eq!(ab.identical_tokens_b(), ba.identical_tokens_a(), "{}", detector.name());
            prop_assert_eq!(&**ab.final_tokens_a(), &**ba.final_tokens_b(), "{}", detector.name());
            prop_assert_eq!(&**ab.final_tokens_b(), &**ba.final_tokens_a(), "{}", detector.name());
        }
    }

    #[test]
    fn prop_suffix_tree_never_exceeds_shorter_operand(a in token_indices(), b in token_indices()) {
        let interner = LexemeInterner::shared();
        let sa = submission(&interner, "a", TokenKind::Whitespace, &text_from_indices(&a, 2));
        let sb = submission(&interner, "b", TokenKind::Whitespace, &text_from_indices(&b, 2));

        let result = all_detectors(&interner)[2].detect(&sa, &sb).unwrap();
        prop_assert!(result.identical_tokens_a() <= sa.num_tokens().min(sb.num_tokens()));
    }
}
