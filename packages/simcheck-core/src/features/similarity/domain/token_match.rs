//! Matched token positions and the find-match / invalidate / repeat loop
//!
//! Both alignment-based detectors work the same way: find the best match
//! among still-valid tokens, invalidate it on both sides, and search again
//! while matches stay at or above a size threshold. The last, possibly
//! sub-threshold, match is still counted before the loop stops.

use crate::errors::Result;
use crate::shared::models::TokenList;
use tracing::debug;

/// Index pairs of one match: `a_indices[k]` in A aligns with `b_indices[k]` in B
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMatch {
    a_indices: Vec<usize>,
    b_indices: Vec<usize>,
}

impl TokenMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contiguous match of `length` tokens starting at `a_start` / `b_start`
    pub fn contiguous(a_start: usize, b_start: usize, length: usize) -> Self {
        Self {
            a_indices: (a_start..a_start + length).collect(),
            b_indices: (b_start..b_start + length).collect(),
        }
    }

    pub fn push(&mut self, a_index: usize, b_index: usize) {
        self.a_indices.push(a_index);
        self.b_indices.push(b_index);
    }

    pub fn len(&self) -> usize {
        self.a_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a_indices.is_empty()
    }

    pub fn a_indices(&self) -> &[usize] {
        &self.a_indices
    }

    pub fn b_indices(&self) -> &[usize] {
        &self.b_indices
    }

    /// Put pairs in ascending order (tracebacks collect them backwards)
    pub fn into_ascending(mut self) -> Self {
        self.a_indices.reverse();
        self.b_indices.reverse();
        self
    }

    /// Mark every matched token invalid on both sides
    pub fn invalidate(&self, a: &mut TokenList, b: &mut TokenList) -> Result<()> {
        for &index in &self.a_indices {
            a.set_valid(index, false)?;
        }
        for &index in &self.b_indices {
            b.set_valid(index, false)?;
        }
        Ok(())
    }
}

/// Run `find` until a match falls below `threshold`, invalidating each one
///
/// Returns the total number of matched tokens (identical on both sides).
pub fn match_repeatedly<F>(
    a: &mut TokenList,
    b: &mut TokenList,
    threshold: usize,
    mut find: F,
) -> Result<usize>
where
    F: FnMut(&TokenList, &TokenList) -> Result<Option<TokenMatch>>,
{
    let mut total = 0;
    let mut pass = 0;

    while let Some(found) = find(a, b)? {
        pass += 1;
        let length = found.len();
        debug_assert_eq!(found.a_indices.len(), found.b_indices.len());

        found.invalidate(a, b)?;
        total += length;
        debug!(pass, length, total, "match pass");

        if length == 0 || length < threshold {
            break;
        }
    }

    Ok(total)
}
