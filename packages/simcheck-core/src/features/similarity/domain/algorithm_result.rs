//! Pairwise detection result
//!
//! Holds, for both operands, a clone of the token list with matched tokens
//! invalidated and the number of identical tokens. Immutable once built.

use crate::errors::{Result, SimcheckError};
use crate::shared::models::{ImmutableTokenList, Submission, TokenList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    a: Arc<Submission>,
    b: Arc<Submission>,
    final_tokens_a: ImmutableTokenList,
    final_tokens_b: ImmutableTokenList,
    identical_tokens_a: usize,
    identical_tokens_b: usize,
}

impl AlgorithmResult {
    /// Create a result, checking counts against the operands
    pub fn new(
        a: Arc<Submission>,
        b: Arc<Submission>,
        final_tokens_a: TokenList,
        final_tokens_b: TokenList,
        identical_tokens_a: usize,
        identical_tokens_b: usize,
    ) -> Result<Self> {
        Self::check_side(&a, &final_tokens_a, identical_tokens_a)?;
        Self::check_side(&b, &final_tokens_b, identical_tokens_b)?;

        Ok(Self {
            a,
            b,
            final_tokens_a: final_tokens_a.freeze(),
            final_tokens_b: final_tokens_b.freeze(),
            identical_tokens_a,
            identical_tokens_b,
        })
    }

    fn check_side(submission: &Submission, tokens: &TokenList, identical: usize) -> Result<()> {
        if tokens.kind() != submission.token_kind() || tokens.len() != submission.num_tokens() {
            return Err(SimcheckError::internal(format!(
                "final token list for '{}' does not mirror the submission ({} {} tokens vs {} {} tokens)",
                submission.name(),
                tokens.len(),
                tokens.kind(),
                submission.num_tokens(),
                submission.token_kind()
            )));
        }
        if identical > submission.num_tokens() {
            return Err(SimcheckError::internal(format!(
                "identical token count {} exceeds {} tokens in '{}'",
                identical,
                submission.num_tokens(),
                submission.name()
            )));
        }
        Ok(())
    }

    pub fn a(&self) -> &Arc<Submission> {
        &self.a
    }

    pub fn b(&self) -> &Arc<Submission> {
        &self.b
    }

    pub fn final_tokens_a(&self) -> &ImmutableTokenList {
        &self.final_tokens_a
    }

    pub fn final_tokens_b(&self) -> &ImmutableTokenList {
        &self.final_tokens_b
    }

    pub fn identical_tokens_a(&self) -> usize {
        self.identical_tokens_a
    }

    pub fn identical_tokens_b(&self) -> usize {
        self.identical_tokens_b
    }

    /// Fraction of A's tokens matched in B (0.0 for an empty submission)
    pub fn percent_matched_a(&self) -> f64 {
        ratio(self.identical_tokens_a, self.a.num_tokens())
    }

    /// Fraction of B's tokens matched in A (0.0 for an empty submission)
    pub fn percent_matched_b(&self) -> f64 {
        ratio(self.identical_tokens_b, self.b.num_tokens())
    }

    /// The same result seen from the other operand
    pub fn swapped(&self) -> Self {
        Self {
            a: Arc::clone(&self.b),
            b: Arc::clone(&self.a),
            final_tokens_a: self.final_tokens_b.clone(),
            final_tokens_b: self.final_tokens_a.clone(),
            identical_tokens_a: self.identical_tokens_b,
            identical_tokens_b: self.identical_tokens_a,
        }
    }

    /// Serializable view for reporting layers
    pub fn summary(&self) -> PairSummary {
        PairSummary {
            submission_a: self.a.name().to_string(),
            submission_b: self.b.name().to_string(),
            tokens_a: self.a.num_tokens(),
            tokens_b: self.b.num_tokens(),
            identical_tokens_a: self.identical_tokens_a,
            identical_tokens_b: self.identical_tokens_b,
            percent_matched_a: self.percent_matched_a(),
            percent_matched_b: self.percent_matched_b(),
        }
    }
}

fn ratio(identical: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        identical as f64 / total as f64
    }
}

/// Flat, serializable projection of an `AlgorithmResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSummary {
    pub submission_a: String,
    pub submission_b: String,
    pub tokens_a: usize,
    pub tokens_b: usize,
    pub identical_tokens_a: usize,
    pub identical_tokens_b: usize,
    pub percent_matched_a: f64,
    pub percent_matched_b: f64,
}
