//! Unordered submission pairs
//!
//! Inputs are de-duplicated first (same allocation, or equal under default
//! equality), so a submission is never compared with itself or twice with
//! the same partner.

use crate::errors::{Result, SimcheckError};
use crate::shared::models::Submission;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Minimum number of distinct submissions a batch needs
pub const MIN_SUBMISSIONS: usize = 2;

/// One unit of detection work
#[derive(Debug, Clone)]
pub struct SubmissionPair {
    pub a: Arc<Submission>,
    pub b: Arc<Submission>,
}

impl SubmissionPair {
    pub fn new(a: Arc<Submission>, b: Arc<Submission>) -> Self {
        Self { a, b }
    }

    fn key(&self) -> (usize, usize) {
        (
            Arc::as_ptr(&self.a) as usize,
            Arc::as_ptr(&self.b) as usize,
        )
    }
}

/// All unordered 2-combinations of `submissions`
pub fn generate_pairs(submissions: &[Arc<Submission>]) -> Result<Vec<SubmissionPair>> {
    let distinct = distinct(submissions, &[]);
    if distinct.len() < MIN_SUBMISSIONS {
        return Err(SimcheckError::NotEnoughSubmissions {
            found: distinct.len(),
            required: MIN_SUBMISSIONS,
        });
    }

    let mut pairs = PairSet::with_capacity(distinct.len() * (distinct.len() - 1) / 2);
    push_combinations(&mut pairs, &distinct)?;
    Ok(pairs.into_pairs())
}

/// Pairs within `normal`, plus every archive item against every normal item
///
/// Archive items are never paired with each other. An archive item equal to
/// a normal one is dropped.
pub fn generate_pairs_with_archive(
    normal: &[Arc<Submission>],
    archive: &[Arc<Submission>],
) -> Result<Vec<SubmissionPair>> {
    let normal = distinct(normal, &[]);
    let archive = distinct(archive, &normal);
    if normal.is_empty() || normal.len() + archive.len() < MIN_SUBMISSIONS {
        return Err(SimcheckError::NotEnoughSubmissions {
            found: normal.len() + archive.len(),
            required: MIN_SUBMISSIONS,
        });
    }

    let within = normal.len() * normal.len().saturating_sub(1) / 2;
    let mut pairs = PairSet::with_capacity(within + normal.len() * archive.len());
    push_combinations(&mut pairs, &normal)?;
    for a in &normal {
        for b in &archive {
            pairs.insert(SubmissionPair::new(Arc::clone(a), Arc::clone(b)))?;
        }
    }
    Ok(pairs.into_pairs())
}

fn push_combinations(pairs: &mut PairSet, submissions: &[Arc<Submission>]) -> Result<()> {
    for (i, a) in submissions.iter().enumerate() {
        for b in &submissions[i + 1..] {
            pairs.insert(SubmissionPair::new(Arc::clone(a), Arc::clone(b)))?;
        }
    }
    Ok(())
}

/// Distinct submissions in input order, skipping anything already in `exclude`
fn distinct(submissions: &[Arc<Submission>], exclude: &[Arc<Submission>]) -> Vec<Arc<Submission>> {
    let mut kept: Vec<Arc<Submission>> = Vec::with_capacity(submissions.len());
    for submission in submissions {
        let seen = |other: &Arc<Submission>| Arc::ptr_eq(submission, other) || **submission == **other;
        if exclude.iter().any(seen) || kept.iter().any(seen) {
            continue;
        }
        kept.push(Arc::clone(submission));
    }
    kept
}

/// Pair list that rejects a pair whose reverse is already present
struct PairSet {
    keys: FxHashSet<(usize, usize)>,
    pairs: Vec<SubmissionPair>,
}

impl PairSet {
    fn with_capacity(capacity: usize) -> Self {
        let mut keys = FxHashSet::default();
        keys.reserve(capacity);
        Self {
            keys,
            pairs: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, pair: SubmissionPair) -> Result<()> {
        let (a, b) = pair.key();
        if self.keys.contains(&(b, a)) || !self.keys.insert((a, b)) {
            return Err(SimcheckError::internal(format!(
                "pair ({}, {}) generated twice",
                pair.a.name(),
                pair.b.name()
            )));
        }
        self.pairs.push(pair);
        Ok(())
    }

    fn into_pairs(self) -> Vec<SubmissionPair> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{LexemeInterner, TokenKind};
    use crate::shared::utils::tokenizer_for;

    fn subs(names: &[&str]) -> Vec<Arc<Submission>> {
        let interner = LexemeInterner::shared();
        let tokenizer = tokenizer_for(TokenKind::Whitespace, interner);
        names
            .iter()
            .map(|name| Arc::new(Submission::from_text(*name, *name, tokenizer.as_ref()).unwrap()))
            .collect()
    }

    fn names(pairs: &[SubmissionPair]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|p| (p.a.name().to_string(), p.b.name().to_string()))
            .collect()
    }

    #[test]
    fn test_all_combinations() {
        let pairs = generate_pairs(&subs(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(pairs.len(), 6);
        for pair in &pairs {
            assert_ne!(pair.a.name(), pair.b.name());
        }
    }

    #[test]
    fn test_requires_two_submissions() {
        let err = generate_pairs(&subs(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            SimcheckError::NotEnoughSubmissions { found: 1, required: 2 }
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut input = subs(&["a", "b"]);
        input.push(Arc::clone(&input[0]));
        let pairs = generate_pairs(&input).unwrap();
        assert_eq!(names(&pairs), vec![("a".to_string(), "b".to_string())]);

        let only_dupes = vec![Arc::clone(&input[0]), Arc::clone(&input[0])];
        assert!(generate_pairs(&only_dupes).is_err());
    }

    #[test]
    fn test_archive_pairs() {
        let normal = subs(&["n1", "n2"]);
        let archive = subs(&["x1", "x2", "x3"]);
        let pairs = generate_pairs_with_archive(&normal, &archive).unwrap();

        // 1 within normal + 2 * 3 across
        assert_eq!(pairs.len(), 7);
        assert!(pairs
            .iter()
            .all(|p| !(p.a.name().starts_with('x') && p.b.name().starts_with('x'))));
    }

    #[test]
    fn test_archive_with_single_normal() {
        let pairs = generate_pairs_with_archive(&subs(&["n"]), &subs(&["x1", "x2"])).unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_archive_needs_a_normal_submission() {
        assert!(generate_pairs_with_archive(&[], &subs(&["x1", "x2"])).is_err());
    }

    #[test]
    fn test_reversed_pair_is_internal_error() {
        let input = subs(&["a", "b"]);
        let mut set = PairSet::with_capacity(2);
        set.insert(SubmissionPair::new(Arc::clone(&input[0]), Arc::clone(&input[1])))
            .unwrap();
        let err = set
            .insert(SubmissionPair::new(Arc::clone(&input[1]), Arc::clone(&input[0])))
            .unwrap_err();
        assert!(err.is_internal());
    }
}
