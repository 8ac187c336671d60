//! Built-in tokenizers
//!
//! | Kind         | Split rule                         | Normalization            |
//! |--------------|------------------------------------|--------------------------|
//! | `Character`  | one token per `char`               | none                     |
//! | `Line`       | `str::lines` (`\n` / `\r\n`)       | line terminators dropped |
//! | `Whitespace` | `split_whitespace`                 | whitespace runs collapse |

use crate::errors::Result;
use crate::shared::models::{LexemeInterner, TokenKind, TokenList};
use crate::shared::ports::Tokenizer;
use std::sync::Arc;

/// One token per character
#[derive(Debug, Clone)]
pub struct CharacterTokenizer {
    interner: Arc<LexemeInterner>,
}

impl CharacterTokenizer {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }
}

impl Tokenizer for CharacterTokenizer {
    fn kind(&self) -> TokenKind {
        TokenKind::Character
    }

    fn tokenize(&self, text: &str) -> Result<TokenList> {
        let mut buf = [0u8; 4];
        let lexemes = text
            .chars()
            .map(|c| self.interner.intern(c.encode_utf8(&mut buf)))
            .collect::<Result<Vec<_>>>()?;
        Ok(TokenList::from_lexemes(TokenKind::Character, lexemes))
    }
}

/// One token per line
#[derive(Debug, Clone)]
pub struct LineTokenizer {
    interner: Arc<LexemeInterner>,
}

impl LineTokenizer {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }
}

impl Tokenizer for LineTokenizer {
    fn kind(&self) -> TokenKind {
        TokenKind::Line
    }

    fn tokenize(&self, text: &str) -> Result<TokenList> {
        let lexemes = text
            .lines()
            .map(|line| self.interner.intern(line))
            .collect::<Result<Vec<_>>>()?;
        Ok(TokenList::from_lexemes(TokenKind::Line, lexemes))
    }
}

/// One token per whitespace-delimited word
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer {
    interner: Arc<LexemeInterner>,
}

impl WhitespaceTokenizer {
    pub fn new(interner: Arc<LexemeInterner>) -> Self {
        Self { interner }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn kind(&self) -> TokenKind {
        TokenKind::Whitespace
    }

    fn tokenize(&self, text: &str) -> Result<TokenList> {
        let lexemes = text
            .split_whitespace()
            .map(|word| self.interner.intern(word))
            .collect::<Result<Vec<_>>>()?;
        Ok(TokenList::from_lexemes(TokenKind::Whitespace, lexemes))
    }
}

/// Tokenizer producing tokens of `kind`
pub fn tokenizer_for(kind: TokenKind, interner: Arc<LexemeInterner>) -> Box<dyn Tokenizer> {
    match kind {
        TokenKind::Character => Box::new(CharacterTokenizer::new(interner)),
        TokenKind::Line => Box::new(LineTokenizer::new(interner)),
        TokenKind::Whitespace => Box::new(WhitespaceTokenizer::new(interner)),
    }
}
