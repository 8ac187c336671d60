//! Whitespace deduplication
//!
//! Runs of spaces and tabs become one space; runs of blank lines become a
//! single blank line.

use super::{retokenized, SubmissionPreprocessor, WHITESPACE_DEDUP_NAME};
use crate::errors::Result;
use crate::shared::models::{LexemeInterner, Submission};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static HORIZONTAL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("horizontal whitespace pattern"));
static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?: ?\n){2,}").expect("blank line pattern"));

/// Collapse whitespace runs in `text`
pub fn deduplicate_whitespace(text: &str) -> String {
    let collapsed = HORIZONTAL_RUN.replace_all(text, " ");
    BLANK_LINE_RUN.replace_all(&collapsed, "\n\n").into_owned()
}

#[derive(Debug, Clone)]
pub struct WhitespaceDeduplicationPreprocessor {
    interner: Arc<LexemeInterner>,
}

impl WhitespaceDeduplicationPreprocessor {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }
}

impl SubmissionPreprocessor for WhitespaceDeduplicationPreprocessor {
    fn name(&self) -> &'static str {
        WHITESPACE_DEDUP_NAME
    }

    fn process(&self, submission: &Submission) -> Result<Submission> {
        retokenized(
            submission,
            deduplicate_whitespace(submission.content()),
            &self.interner,
        )
    }
}
