//! Token model
//!
//! A token is (lexeme, kind, validity). Validity marks whether the token is
//! still unattributed to a detected match; detectors record matches by
//! invalidating tokens in cloned lists rather than deleting them.

use super::lexeme::{LexemeId, LexemeInterner};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Tokenization granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Character,
    Line,
    Whitespace,
}

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Character, TokenKind::Line, TokenKind::Whitespace];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Line => "line",
            Self::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "character" | "char" => Ok(Self::Character),
            "line" => Ok(Self::Line),
            "whitespace" | "word" => Ok(Self::Whitespace),
            _ => Err(format!(
                "Unknown token kind '{}'. Valid kinds: character, line, whitespace",
                s
            )),
        }
    }
}

/// How two tokens (or lists, or submissions) are compared
///
/// - `Default`: kind, lexeme and validity must all be identical
/// - `IgnoreValidity`: kind and lexeme only
/// - `RequireValid`: kind and lexeme, and both operands must be valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EqualityMode {
    #[default]
    Default,
    IgnoreValidity,
    RequireValid,
}

impl EqualityMode {
    /// The single comparator behind every equality variant
    #[inline]
    pub fn tokens_equal(self, a: &Token, b: &Token) -> bool {
        if a.kind != b.kind || a.lexeme != b.lexeme {
            return false;
        }
        match self {
            Self::Default => a.valid == b.valid,
            Self::IgnoreValidity => true,
            Self::RequireValid => a.valid && b.valid,
        }
    }
}

/// A single token
///
/// `PartialEq` is the `Default` equality mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    lexeme: LexemeId,
    kind: TokenKind,
    valid: bool,
}

impl Token {
    /// Create a valid token
    pub fn new(lexeme: LexemeId, kind: TokenKind) -> Self {
        Self {
            lexeme,
            kind,
            valid: true,
        }
    }

    /// Intern `content` and create a valid token for it
    pub fn from_content(content: &str, kind: TokenKind, interner: &LexemeInterner) -> Result<Self> {
        Ok(Self::new(interner.intern(content)?, kind))
    }

    pub fn with_validity(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn lexeme(&self) -> LexemeId {
        self.lexeme
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Compare under an explicit equality mode
    #[inline]
    pub fn matches(&self, other: &Token, mode: EqualityMode) -> bool {
        mode.tokens_equal(self, other)
    }

    /// Resolve the token's content
    pub fn content(&self, interner: &LexemeInterner) -> Result<Arc<str>> {
        interner.resolve(self.lexeme)
    }
}
