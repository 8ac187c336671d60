//! Common-code removal
//!
//! Strips every line a target shares with a reference submission (e.g.
//! provided boilerplate). Both sides are compared line by line with the line
//! hash detector; the target keeps only its unmatched lines and is then
//! retokenized with its original kind.

use super::{retokenized, SubmissionPreprocessor, COMMON_CODE_NAME};
use crate::errors::{Result, SimcheckError};
use crate::features::similarity::infrastructure::{LineHashDetector, SimilarityDetector};
use crate::shared::models::{LexemeInterner, Submission};
use crate::shared::utils::LineTokenizer;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommonCodeRemover {
    common: Arc<Submission>,
    detector: LineHashDetector,
    tokenizer: LineTokenizer,
    interner: Arc<LexemeInterner>,
}

impl CommonCodeRemover {
    /// Fails with `EmptySubmission` if `common` has no lines
    pub fn new(common: &Submission, interner: Arc<LexemeInterner>) -> Result<Self> {
        let tokenizer = LineTokenizer::new(Arc::clone(&interner));
        let common = Submission::from_text(common.name(), common.content(), &tokenizer)?;
        if common.num_tokens() == 0 {
            return Err(SimcheckError::EmptySubmission(common.name().to_string()));
        }

        Ok(Self {
            common: Arc::new(common),
            detector: LineHashDetector::new(Arc::clone(&interner)),
            tokenizer,
            interner,
        })
    }

    /// The reference submission, line-tokenized
    pub fn common(&self) -> &Submission {
        &self.common
    }
}

impl SubmissionPreprocessor for CommonCodeRemover {
    fn name(&self) -> &'static str {
        COMMON_CODE_NAME
    }

    fn process(&self, submission: &Submission) -> Result<Submission> {
        let target = Arc::new(Submission::from_text(
            submission.name(),
            submission.content(),
            &self.tokenizer,
        )?);
        let result = self.detector.detect(&self.common, &target)?;

        let remaining = result.final_tokens_b().join_valid(&self.interner)?;
        debug!(
            submission = submission.name(),
            removed_lines = result.identical_tokens_b(),
            "removed common code"
        );

        retokenized(submission, remaining, &self.interner)
    }
}
