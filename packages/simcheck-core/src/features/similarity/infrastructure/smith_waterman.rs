//! Smith-Waterman Local Alignment Detector
//!
//! Repeatedly finds the best-scoring local alignment between the still-valid
//! tokens of both operands, invalidates it, and realigns.
//!
//! # Recurrence
//!
//! For `i, j >= 1` with `eq = A[i-1] ~ B[j-1]` (same content, both valid):
//!
//! ```text
//! S[i,j] = S[i-1,j-1] + h                                  if eq
//!        = max(S[i-1,j], S[i,j-1], S[i-1,j-1]) - d         otherwise (floored at 0)
//! M[i,j] = 0                                               if S[i,j] == 0
//!        = max(S[i-1,j-1], M[i-1,j-1])                     if eq
//!        = max of S and M over the three predecessors      otherwise
//! ```
//!
//! A cell whose `M - S` reaches `overlap_threshold` is reset to zero in both
//! tables, which cuts matches that only extend the tail of a longer run.
//!
//! `detect` aligns the operands in a fixed order (see `operand_order`), so
//! `detect(b, a)` is `detect(a, b)` with the sides swapped.
//!
//! # Performance
//!
//! - O(n·m) time and memory per pass (two flat `u32` tables)
//! - Number of passes bounded by the matched regions found

use super::{
    ensure_same_kind, full_match, is_same_submission, no_match, SimilarityDetector,
    SMITH_WATERMAN_NAME,
};
use crate::config::SmithWatermanConfig;
use crate::errors::Result;
use crate::features::similarity::domain::{match_repeatedly, AlgorithmResult, TokenMatch};
use crate::shared::models::{EqualityMode, LexemeId, Submission, Token, TokenKind, TokenList};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Best local alignment of one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Maximum cell value of the score table
    pub score: u32,
    /// Matched token positions, ascending
    pub matched: TokenMatch,
}

/// Row-major (n+1)×(m+1) table
struct ScoreTable {
    cols: usize,
    cells: Vec<u32>,
}

impl ScoreTable {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Local alignment detector
#[derive(Debug, Clone, Default)]
pub struct SmithWatermanDetector {
    config: SmithWatermanConfig,
}

impl SmithWatermanDetector {
    pub fn new(config: SmithWatermanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmithWatermanConfig {
        &self.config
    }

    /// Single alignment pass; `None` when no positive score exists
    pub fn align_once(&self, a: &TokenList, b: &TokenList) -> Option<Alignment> {
        if a.is_empty() || b.is_empty() {
            return None;
        }

        let a = a.as_slice();
        let b = b.as_slice();
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let h = self.config.match_bonus;
        let d = self.config.mismatch_penalty;
        let overlap = self.config.overlap_threshold as u64;

        let mut s = ScoreTable::new(rows, cols);
        let mut m = ScoreTable::new(rows, cols);
        let mut best = (0u32, 0usize, 0usize);

        for i in 1..rows {
            for j in 1..cols {
                let eq = EqualityMode::RequireValid.tokens_equal(&a[i - 1], &b[j - 1]);

                let up = s.get(i - 1, j);
                let left = s.get(i, j - 1);
                let diag = s.get(i - 1, j - 1);

                let mut score = if eq {
                    diag.saturating_add(h)
                } else {
                    up.max(left).max(diag).saturating_sub(d)
                };

                let mut run = if score == 0 {
                    0
                } else if eq {
                    diag.max(m.get(i - 1, j - 1))
                } else {
                    up.max(left)
                        .max(diag)
                        .max(m.get(i - 1, j))
                        .max(m.get(i, j - 1))
                        .max(m.get(i - 1, j - 1))
                };

                if u64::from(run) >= u64::from(score) + overlap {
                    score = 0;
                    run = 0;
                }

                s.set(i, j, score);
                m.set(i, j, run);

                if score > best.0 {
                    best = (score, i, j);
                }
            }
        }

        let (score, best_i, best_j) = best;
        if score == 0 {
            return None;
        }

        Some(Alignment {
            score,
            matched: traceback(&s, a, b, best_i, best_j),
        })
    }

    /// Align, invalidate and realign until a match falls below the threshold
    fn align_repeatedly(
        &self,
        a: &Arc<Submission>,
        b: &Arc<Submission>,
    ) -> Result<AlgorithmResult> {
        let mut final_a = a.tokens_copy();
        let mut final_b = b.tokens_copy();
        let total = match_repeatedly(
            &mut final_a,
            &mut final_b,
            self.config.match_size_threshold,
            |ta, tb| Ok(self.align_once(ta, tb).map(|alignment| alignment.matched)),
        )?;

        debug!(a = a.name(), b = b.name(), total, "smith-waterman comparison");

        AlgorithmResult::new(Arc::clone(a), Arc::clone(b), final_a, final_b, total, total)
    }
}

/// Walk back from `(i, j)` to the first zero cell, collecting matched cells
///
/// Ties between predecessors go to up, then left, then diagonal. Indices are
/// non-increasing along the walk, so a cell is recorded only when both of its
/// indices are below the last recorded pair.
fn traceback(
    s: &ScoreTable,
    a: &[Token],
    b: &[Token],
    mut i: usize,
    mut j: usize,
) -> TokenMatch {
    let mut matched = TokenMatch::new();
    let mut last: Option<(usize, usize)> = None;

    while i > 0 && j > 0 && s.get(i, j) != 0 {
        let (ai, bj) = (i - 1, j - 1);
        if EqualityMode::RequireValid.tokens_equal(&a[ai], &b[bj]) {
            let fresh = match last {
                Some((la, lb)) => ai < la && bj < lb,
                None => true,
            };
            if fresh {
                matched.push(ai, bj);
                last = Some((ai, bj));
            }
        }

        let up = s.get(i - 1, j);
        let left = s.get(i, j - 1);
        let diag = s.get(i - 1, j - 1);

        if up >= left && up >= diag {
            i -= 1;
        } else if left >= diag {
            j -= 1;
        } else {
            i -= 1;
            j -= 1;
        }
    }

    matched.into_ascending()
}

impl SimilarityDetector for SmithWatermanDetector {
    fn name(&self) -> &'static str {
        SMITH_WATERMAN_NAME
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

        // Tie rules depend on operand order, so always align in one order
        if operand_order(a, b) == Ordering::Greater {
            return Ok(self.align_repeatedly(b, a)?.swapped());
        }
        self.align_repeatedly(a, b)
    }
}

/// Total order on distinct submissions: token count, token sequence, then
/// name and content
fn operand_order(a: &Submission, b: &Submission) -> Ordering {
    fn sequence(s: &Submission) -> impl Iterator<Item = (LexemeId, bool)> + '_ {
        s.tokens().iter().map(|t| (t.lexeme(), t.is_valid()))
    }

    a.num_tokens()
        .cmp(&b.num_tokens())
        .then_with(|| sequence(a).cmp(sequence(b)))
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.content().cmp(b.content()))
}
