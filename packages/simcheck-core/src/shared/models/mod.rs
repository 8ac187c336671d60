//! Core data model: lexemes, tokens, token lists and submissions

pub mod lexeme;
pub mod submission;
pub mod token;
pub mod token_list;

pub use lexeme::{LexemeId, LexemeInterner};
pub use submission::Submission;
pub use token::{EqualityMode, Token, TokenKind};
pub use token_list::{ImmutableTokenList, TokenList};
