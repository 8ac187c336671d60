//! Longest common substring search over a [`SharedSuffixTrie`]

use super::trie::{NodeId, SharedSuffixTrie, ValidRuns, ROOT};
use crate::errors::{Result, SimcheckError};
use crate::features::similarity::domain::TokenMatch;
use crate::shared::models::TokenList;

/// Longest run of valid tokens present in both operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonSubstring {
    pub length: usize,
    /// Start offsets in A where the run occurs, ascending
    pub a_offsets: Vec<usize>,
    /// Start offsets in B where the run occurs, ascending
    pub b_offsets: Vec<usize>,
}

impl CommonSubstring {
    /// First occurrence on each side as concrete token positions
    pub fn into_token_match(self) -> Result<TokenMatch> {
        match (self.a_offsets.first(), self.b_offsets.first()) {
            (Some(&a_start), Some(&b_start)) => {
                Ok(TokenMatch::contiguous(a_start, b_start, self.length))
            }
            _ => Err(SimcheckError::internal(
                "common substring without occurrences on both sides",
            )),
        }
    }
}

/// Find the longest common run of still-valid tokens
///
/// Ties are broken by the lowest interned lexeme id at each depth.
/// Returns `Ok(None)` when no valid token is shared.
pub fn find_lcs(
    trie: &SharedSuffixTrie,
    a: &TokenList,
    b: &TokenList,
) -> Result<Option<CommonSubstring>> {
    trie.ensure_compatible(a, b)?;

    let runs_a = ValidRuns::new(a);
    let runs_b = ValidRuns::new(b);
    let depths = trie.max_shared_depths(&runs_a, &runs_b);

    let max_depth = trie
        .root()
        .children
        .values()
        .map(|&child| depths[child])
        .max()
        .unwrap_or(0);
    if max_depth == 0 {
        return Ok(None);
    }

    let mut current: NodeId = ROOT;
    let mut a_offsets: Vec<usize> = trie.root().a_offsets.clone();
    let mut b_offsets: Vec<usize> = trie.root().b_offsets.clone();

    for step in 0..max_depth {
        let remaining = max_depth - step;
        let next = trie
            .node(current)
            .ok_or_else(|| unknown_node(current))?
            .children
            .values()
            .copied()
            .find(|&child| depths[child] == remaining)
            .ok_or_else(|| {
                SimcheckError::internal(format!(
                    "no child of depth {} below suffix trie node {} (step {} of {})",
                    remaining, current, step, max_depth
                ))
            })?;

        let node = trie.node(next).ok_or_else(|| unknown_node(next))?;
        a_offsets = narrow(&a_offsets, &node.a_offsets, &runs_a, node.depth);
        b_offsets = narrow(&b_offsets, &node.b_offsets, &runs_b, node.depth);
        if a_offsets.is_empty() || b_offsets.is_empty() {
            return Err(SimcheckError::internal(format!(
                "occurrences filtered to empty at depth {} ({} in A, {} in B)",
                node.depth,
                a_offsets.len(),
                b_offsets.len()
            )));
        }

        current = next;
    }

    Ok(Some(CommonSubstring {
        length: max_depth,
        a_offsets,
        b_offsets,
    }))
}

fn unknown_node(id: NodeId) -> SimcheckError {
    SimcheckError::internal(format!("suffix trie has no node {}", id))
}

/// Keep running offsets that also spell the child's path and are still valid
/// through `depth`
fn narrow(running: &[usize], child: &[usize], runs: &ValidRuns, depth: usize) -> Vec<usize> {
    child
        .iter()
        .copied()
        .filter(|start| running.binary_search(start).is_ok() && runs.covers(*start, depth))
        .collect()
}
