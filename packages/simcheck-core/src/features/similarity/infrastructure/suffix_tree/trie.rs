//! Generalized suffix trie restricted to paths shared by both operands
//!
//! Every suffix of A and of B is threaded through one trie keyed by lexeme.
//! A node at depth `d` stores the start offsets of the suffixes in A and in B
//! whose first `d` tokens spell its path. Paths that only one side can spell
//! are never materialized, so the trie stays as small as the overlap.
//!
//! Nodes live in an arena (`Vec<TrieNode>`) in breadth-first order. Children
//! are held in a `BTreeMap`, so iteration follows interned lexeme ids and
//! every traversal is deterministic.
//!
//! The trie is built from content only. Validity is evaluated per pass
//! through [`ValidRuns`], which lets one trie serve every repeat pass.

use crate::errors::{Result, SimcheckError};
use crate::shared::models::{LexemeId, TokenKind, TokenList};
use std::collections::{BTreeMap, VecDeque};

pub type NodeId = usize;

/// Root node id
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Token on the edge into this node (`None` for the root)
    pub lexeme: Option<LexemeId>,
    /// Path length from the root
    pub depth: usize,
    /// Suffix starts in A spelling this path, ascending
    pub a_offsets: Vec<usize>,
    /// Suffix starts in B spelling this path, ascending
    pub b_offsets: Vec<usize>,
    pub children: BTreeMap<LexemeId, NodeId>,
}

/// `run[i]`: number of consecutive valid tokens starting at `i`
#[derive(Debug, Clone)]
pub struct ValidRuns(Vec<usize>);

impl ValidRuns {
    pub fn new(tokens: &TokenList) -> Self {
        let mut runs = vec![0; tokens.len() + 1];
        for (i, token) in tokens.iter().enumerate().rev() {
            if token.is_valid() {
                runs[i] = runs[i + 1] + 1;
            }
        }
        Self(runs)
    }

    /// Whether the `depth` tokens starting at `start` are all valid
    #[inline]
    pub fn covers(&self, start: usize, depth: usize) -> bool {
        self.0.get(start).is_some_and(|&run| run >= depth)
    }
}

#[derive(Debug, Clone)]
pub struct SharedSuffixTrie {
    kind: TokenKind,
    len_a: usize,
    len_b: usize,
    nodes: Vec<TrieNode>,
}

impl SharedSuffixTrie {
    /// Build the shared trie of `a` and `b`
    pub fn build(a: &TokenList, b: &TokenList) -> Result<Self> {
        if a.kind() != b.kind() {
            return Err(SimcheckError::type_mismatch(a.kind(), b.kind()));
        }

        let a_tokens = a.as_slice();
        let b_tokens = b.as_slice();

        let mut nodes = vec![TrieNode {
            lexeme: None,
            depth: 0,
            a_offsets: (0..a_tokens.len()).collect(),
            b_offsets: (0..b_tokens.len()).collect(),
            children: BTreeMap::new(),
        }];

        let mut queue = VecDeque::from([ROOT]);
        while let Some(id) = queue.pop_front() {
            let depth = nodes[id].depth;

            let mut a_groups: BTreeMap<LexemeId, Vec<usize>> = BTreeMap::new();
            for &start in &nodes[id].a_offsets {
                if let Some(token) = a_tokens.get(start + depth) {
                    a_groups.entry(token.lexeme()).or_default().push(start);
                }
            }

            let mut b_groups: BTreeMap<LexemeId, Vec<usize>> = BTreeMap::new();
            for &start in &nodes[id].b_offsets {
                if let Some(token) = b_tokens.get(start + depth) {
                    b_groups.entry(token.lexeme()).or_default().push(start);
                }
            }

            for (lexeme, a_offsets) in a_groups {
                let Some(b_offsets) = b_groups.remove(&lexeme) else {
                    continue;
                };
                let child = nodes.len();
                nodes.push(TrieNode {
                    lexeme: Some(lexeme),
                    depth: depth + 1,
                    a_offsets,
                    b_offsets,
                    children: BTreeMap::new(),
                });
                nodes[id].children.insert(lexeme, child);
                queue.push_back(child);
            }
        }

        Ok(Self {
            kind: a.kind(),
            len_a: a_tokens.len(),
            len_b: b_tokens.len(),
            nodes,
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id)
    }

    /// The root always exists, even for empty operands
    pub fn root(&self) -> &TrieNode {
        &self.nodes[ROOT]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check that `a` and `b` are the lists this trie was built from
    pub fn ensure_compatible(&self, a: &TokenList, b: &TokenList) -> Result<()> {
        for list in [a, b] {
            if list.kind() != self.kind {
                return Err(SimcheckError::type_mismatch(self.kind, list.kind()));
            }
        }
        if a.len() != self.len_a || b.len() != self.len_b {
            return Err(SimcheckError::internal(format!(
                "token lists ({}, {}) do not match suffix trie built over ({}, {})",
                a.len(),
                b.len(),
                self.len_a,
                self.len_b
            )));
        }
        Ok(())
    }

    /// Node has a still-valid occurrence on both sides; unknown ids never are
    pub fn is_live(&self, id: NodeId, runs_a: &ValidRuns, runs_b: &ValidRuns) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.a_offsets.iter().any(|&s| runs_a.covers(s, node.depth))
            && node.b_offsets.iter().any(|&s| runs_b.covers(s, node.depth))
    }

    /// `maxSharedDepth` of every node for the current validity state
    ///
    /// 0 for a node that is not live, otherwise 1 plus the deepest live
    /// child chain. Liveness is prefix-closed, so a node's value is the
    /// length of the longest live path through it. The root entry is unused.
    pub fn max_shared_depths(&self, runs_a: &ValidRuns, runs_b: &ValidRuns) -> Vec<usize> {
        let mut depths = vec![0; self.nodes.len()];
        // Children always sit after their parent in the arena
        for id in (1..self.nodes.len()).rev() {
            if !self.is_live(id, runs_a, runs_b) {
                continue;
            }
            let deepest_child = self.nodes[id]
                .children
                .values()
                .map(|&child| depths[child])
                .max()
                .unwrap_or(0);
            depths[id] = 1 + deepest_child;
        }
        depths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::LexemeInterner;
    use crate::shared::utils::WhitespaceTokenizer;
    use crate::shared::Tokenizer;
    use std::sync::Arc;

    fn words(interner: &Arc<LexemeInterner>, text: &str) -> TokenList {
        WhitespaceTokenizer::new(Arc::clone(interner)).tokenize(text).unwrap()
    }

    #[test]
    fn test_valid_runs() {
        let interner = LexemeInterner::shared();
        let mut list = words(&interner, "a b c d");
        list.set_valid(2, false).unwrap();
        let runs = ValidRuns::new(&list);
        assert!(runs.covers(0, 2));
        assert!(!runs.covers(0, 3));
        assert!(!runs.covers(2, 1));
        assert!(runs.covers(3, 1));
        assert!(runs.covers(4, 0));
        assert!(!runs.covers(9, 0));
    }

    #[test]
    fn test_only_shared_paths_are_built() {
        let interner = LexemeInterner::shared();
        let a = words(&interner, "x y z");
        let b = words(&interner, "y z w");
        let trie = SharedSuffixTrie::build(&a, &b).unwrap();

        // root, "y", "z", "y z"
        assert_eq!(trie.node_count(), 4);
        let y = interner.get("y").unwrap();
        let y_node = trie.node(trie.root().children[&y]).unwrap();
        assert_eq!(y_node.a_offsets, vec![1]);
        assert_eq!(y_node.b_offsets, vec![0]);
        assert_eq!(y_node.children.len(), 1);
    }

    #[test]
    fn test_repeated_content_coalesces() {
        let interner = LexemeInterner::shared();
        let a = words(&interner, "p q p q");
        let b = words(&interner, "p q");
        let trie = SharedSuffixTrie::build(&a, &b).unwrap();

        let p = interner.get("p").unwrap();
        let p_node = trie.node(trie.root().children[&p]).unwrap();
        assert_eq!(p_node.a_offsets, vec![0, 2]);
        assert_eq!(p_node.b_offsets, vec![0]);
    }

    #[test]
    fn test_max_shared_depths_follow_validity() {
        let interner = LexemeInterner::shared();
        let mut a = words(&interner, "a b c");
        let b = words(&interner, "a b c");
        let trie = SharedSuffixTrie::build(&a, &b).unwrap();
        let a_id = trie.root().children[&interner.get("a").unwrap()];

        let depths = trie.max_shared_depths(&ValidRuns::new(&a), &ValidRuns::new(&b));
        assert_eq!(depths[a_id], 3);

        a.set_valid(2, false).unwrap();
        let depths = trie.max_shared_depths(&ValidRuns::new(&a), &ValidRuns::new(&b));
        assert_eq!(depths[a_id], 2);
        let c_id = trie.root().children[&interner.get("c").unwrap()];
        assert_eq!(depths[c_id], 0);
    }

    #[test]
    fn test_unknown_node_id() {
        let interner = LexemeInterner::shared();
        let a = words(&interner, "a b");
        let b = words(&interner, "b");
        let trie = SharedSuffixTrie::build(&a, &b).unwrap();
        let past_end = trie.node_count();

        assert!(trie.node(past_end).is_none());
        assert!(!trie.is_live(past_end, &ValidRuns::new(&a), &ValidRuns::new(&b)));
        assert!(trie.node(ROOT).is_some());
    }

    #[test]
    fn test_kind_mismatch() {
        let interner = LexemeInterner::shared();
        let a = words(&interner, "a");
        let b = TokenList::new(TokenKind::Line);
        assert!(matches!(
            SharedSuffixTrie::build(&a, &b),
            Err(SimcheckError::TokenTypeMismatch { .. })
        ));
    }
}
