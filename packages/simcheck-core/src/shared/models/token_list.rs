//! Token lists
//!
//! `TokenList` is an ordered, single-kind token sequence. Tokens are `Copy`,
//! so `Clone` is a deep clone: the copy's validity flags mutate independently.
//!
//! `ImmutableTokenList` is the frozen snapshot held by a `Submission`. It
//! derefs to `&TokenList` only, so mutation is rejected at compile time;
//! detectors call `to_mutable()` to get a working copy.

use super::lexeme::{LexemeId, LexemeInterner};
use super::token::{EqualityMode, Token, TokenKind};
use crate::errors::{Result, SimcheckError};
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList {
    kind: TokenKind,
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            tokens: Vec::new(),
        }
    }

    pub fn with_capacity(kind: TokenKind, capacity: usize) -> Self {
        Self {
            kind,
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Build a list of valid tokens from interned lexemes
    pub fn from_lexemes(kind: TokenKind, lexemes: impl IntoIterator<Item = LexemeId>) -> Self {
        Self {
            kind,
            tokens: lexemes
                .into_iter()
                .map(|lexeme| Token::new(lexeme, kind))
                .collect(),
        }
    }

    /// Build a list from existing tokens, rejecting any of the wrong kind
    pub fn from_tokens(kind: TokenKind, tokens: impl IntoIterator<Item = Token>) -> Result<Self> {
        let mut list = Self::new(kind);
        for token in tokens {
            list.push(token)?;
        }
        Ok(list)
    }

    /// Append a token; wrong-kind tokens are rejected
    pub fn push(&mut self, token: Token) -> Result<()> {
        if token.kind() != self.kind {
            return Err(SimcheckError::type_mismatch(self.kind, token.kind()));
        }
        self.tokens.push(token);
        Ok(())
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn set_valid(&mut self, index: usize, valid: bool) -> Result<()> {
        let len = self.tokens.len();
        let token = self.tokens.get_mut(index).ok_or_else(|| {
            SimcheckError::internal(format!(
                "token index {} out of bounds for list of {} tokens",
                index, len
            ))
        })?;
        token.set_valid(valid);
        Ok(())
    }

    pub fn invalidate_all(&mut self) {
        self.tokens.iter_mut().for_each(|t| t.set_valid(false));
    }

    pub fn count_invalid(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_valid()).count()
    }

    pub fn count_valid(&self) -> usize {
        self.len() - self.count_invalid()
    }

    /// Freeze into an immutable snapshot
    pub fn freeze(self) -> ImmutableTokenList {
        ImmutableTokenList(Arc::new(self))
    }

    /// Compare with another list under an explicit equality mode
    pub fn equals(&self, other: &TokenList, mode: EqualityMode) -> bool {
        self.kind == other.kind
            && self.len() == other.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| mode.tokens_equal(a, b))
    }

    /// Join all tokens with the kind's separator
    ///
    /// Characters concatenate, lines get a trailing `\n`, whitespace tokens
    /// are separated by a single space.
    pub fn join(&self, interner: &LexemeInterner) -> Result<String> {
        self.join_filtered(interner, false)
    }

    /// Join only the tokens that are still valid
    pub fn join_valid(&self, interner: &LexemeInterner) -> Result<String> {
        self.join_filtered(interner, true)
    }

    fn join_filtered(&self, interner: &LexemeInterner, only_valid: bool) -> Result<String> {
        let mut out = String::new();
        let mut first = true;

        for token in self.tokens.iter().filter(|t| !only_valid || t.is_valid()) {
            let content = interner.resolve(token.lexeme())?;
            match self.kind {
                TokenKind::Character => out.push_str(&content),
                TokenKind::Line => {
                    out.push_str(&content);
                    out.push('\n');
                }
                TokenKind::Whitespace => {
                    if !first {
                        out.push(' ');
                    }
                    out.push_str(&content);
                }
            }
            first = false;
        }

        Ok(out)
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Frozen token list, cheap to clone and share between threads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableTokenList(Arc<TokenList>);

impl ImmutableTokenList {
    /// Independent mutable copy
    pub fn to_mutable(&self) -> TokenList {
        (*self.0).clone()
    }
}

impl Deref for ImmutableTokenList {
    type Target = TokenList;

    fn deref(&self) -> &TokenList {
        &self.0
    }
}

impl From<TokenList> for ImmutableTokenList {
    fn from(list: TokenList) -> Self {
        list.freeze()
    }
}
