//! Shared builders for integration tests

#![allow(dead_code)]

use simcheck_core::shared::tokenizer_for;
use simcheck_core::{LexemeInterner, SimilarityDetector, Submission, TokenKind};
use simcheck_core::{LineHashDetector, SmithWatermanDetector, SuffixTreeDetector};
use std::sync::Arc;

pub fn submission(
    interner: &Arc<LexemeInterner>,
    name: &str,
    kind: TokenKind,
    text: &str,
) -> Arc<Submission> {
    let tokenizer = tokenizer_for(kind, Arc::clone(interner));
    Arc::new(Submission::from_text(name, text, tokenizer.as_ref()).unwrap())
}

/// Whitespace-token submission from a slice of words
pub fn words(interner: &Arc<LexemeInterner>, name: &str, words: &[&str]) -> Arc<Submission> {
    submission(interner, name, TokenKind::Whitespace, &words.join(" "))
}

/// Line-token submission from a slice of lines
pub fn lines(interner: &Arc<LexemeInterner>, name: &str, lines: &[&str]) -> Arc<Submission> {
    let mut text = lines.join("\n");
    text.push('\n');
    submission(interner, name, TokenKind::Line, &text)
}

/// One instance of every built-in detector
pub fn all_detectors(interner: &Arc<LexemeInterner>) -> Vec<Box<dyn SimilarityDetector>> {
    vec![
        Box::new(LineHashDetector::new(Arc::clone(interner))),
        Box::new(SmithWatermanDetector::default()),
        Box::new(SuffixTreeDetector::default()),
    ]
}

/// Text over a small alphabet, `len` whitespace tokens
pub fn text_from_indices(indices: &[u8], alphabet: usize) -> String {
    indices
        .iter()
        .map(|i| format!("w{}", *i as usize % alphabet))
        .collect::<Vec<_>>()
        .join(" ")
}
