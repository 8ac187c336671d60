//! Case folding

use super::{retokenized, SubmissionPreprocessor, LOWERCASE_NAME};
use crate::errors::Result;
use crate::shared::models::{LexemeInterner, Submission};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LowercasePreprocessor {
    interner: Arc<LexemeInterner>,
}

impl LowercasePreprocessor {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }
}

impl SubmissionPreprocessor for LowercasePreprocessor {
    fn name(&self) -> &'static str {
        LOWERCASE_NAME
    }

    fn process(&self, submission: &Submission) -> Result<Submission> {
        retokenized(submission, submission.content().to_lowercase(), &self.interner)
    }
}
