//! Tokenizer port

use crate::errors::Result;
use crate::shared::models::{TokenKind, TokenList};

/// Turns raw text into a token list of a fixed kind
///
/// Joining the produced list with its kind's separator reproduces the text
/// up to tokenizer-specific normalization.
pub trait Tokenizer: Send + Sync {
    /// Kind of every token this tokenizer produces
    fn kind(&self) -> TokenKind;

    /// Fails only when the interner runs out of lexeme ids
    fn tokenize(&self, text: &str) -> Result<TokenList>;
}
