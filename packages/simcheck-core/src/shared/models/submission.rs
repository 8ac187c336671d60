//! Submission: a named, immutable unit of comparison
//!
//! `tokens` is expected to be the tokenization of `content` with a tokenizer
//! of the list's kind. This is a documented contract, not checked here.

use super::token::{EqualityMode, TokenKind};
use super::token_list::{ImmutableTokenList, TokenList};
use crate::errors::{Result, SimcheckError};
use crate::shared::ports::Tokenizer;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Submission {
    name: String,
    content: String,
    tokens: ImmutableTokenList,
}

impl Submission {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        tokens: impl Into<ImmutableTokenList>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SimcheckError::InvalidSubmission(
                "submission name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            content: content.into(),
            tokens: tokens.into(),
        })
    }

    /// Tokenize `content` and wrap it as a submission
    pub fn from_text(
        name: impl Into<String>,
        content: impl Into<String>,
        tokenizer: &dyn Tokenizer,
    ) -> Result<Self> {
        let content = content.into();
        let tokens = tokenizer.tokenize(&content)?;
        Self::new(name, content, tokens)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tokens(&self) -> &ImmutableTokenList {
        &self.tokens
    }

    /// Fresh mutable copy of the token list, for detectors
    pub fn tokens_copy(&self) -> TokenList {
        self.tokens.to_mutable()
    }

    pub fn token_kind(&self) -> TokenKind {
        self.tokens.kind()
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Equality under an explicit mode
    ///
    /// Name, token count, content and token lists must all agree; the mode
    /// only changes how tokens are compared.
    pub fn equals(&self, other: &Submission, mode: EqualityMode) -> bool {
        self.name == other.name
            && self.num_tokens() == other.num_tokens()
            && self.content == other.content
            && self.tokens.equals(&other.tokens, mode)
    }
}

impl PartialEq for Submission {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, EqualityMode::Default)
    }
}

impl Eq for Submission {}

impl Hash for Submission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.content.hash(state);
        self.num_tokens().hash(state);
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} tokens)",
            self.name,
            self.num_tokens(),
            self.token_kind()
        )
    }
}
