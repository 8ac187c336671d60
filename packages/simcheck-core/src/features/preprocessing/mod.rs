//! Submission Preprocessing
//!
//! Rewrites applied to every submission before pairwise detection. Each
//! preprocessor returns a new submission with the same name and token kind.
//!
//! ```text
//! preprocessing/
//! ├── common_code.rs       # Strip lines shared with a reference submission
//! ├── lowercase.rs         # Case folding
//! └── whitespace_dedup.rs  # Collapse blanks and blank-line runs
//! ```

pub mod common_code;
pub mod lowercase;
pub mod whitespace_dedup;

pub use common_code::CommonCodeRemover;
pub use lowercase::LowercasePreprocessor;
pub use whitespace_dedup::WhitespaceDeduplicationPreprocessor;

use crate::errors::Result;
use crate::shared::models::{LexemeInterner, Submission};
use crate::shared::utils::tokenizer_for;
use std::sync::Arc;

/// Registry name of the lowercase preprocessor
pub const LOWERCASE_NAME: &str = "lowercase";
/// Registry name of the whitespace deduplication preprocessor
pub const WHITESPACE_DEDUP_NAME: &str = "deduplicate";
/// Name of the common-code remover (constructed per run, not registered)
pub const COMMON_CODE_NAME: &str = "commoncode";

/// Submission-to-submission rewrite
pub trait SubmissionPreprocessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, submission: &Submission) -> Result<Submission>;
}

/// New submission from rewritten content, tokenized with the original kind
pub(crate) fn retokenized(
    submission: &Submission,
    content: String,
    interner: &Arc<LexemeInterner>,
) -> Result<Submission> {
    let tokenizer = tokenizer_for(submission.token_kind(), Arc::clone(interner));
    Submission::from_text(submission.name(), content, tokenizer.as_ref())
}
