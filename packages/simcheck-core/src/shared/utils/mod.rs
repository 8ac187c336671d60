//! Utility modules shared across features
//!
//! - `tokenizers`: built-in character/line/whitespace tokenizers

pub mod tokenizers;

pub use tokenizers::{
    tokenizer_for, CharacterTokenizer, LineTokenizer, WhitespaceTokenizer,
};
