//! Error types for simcheck-core
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::shared::models::TokenKind;
use thiserror::Error;

/// Main error type for similarity detection operations
#[derive(Debug, Error)]
pub enum SimcheckError {
    /// Two token sequences of different kinds were combined or compared
    #[error("Token type mismatch: expected {expected}, found {found}")]
    TokenTypeMismatch { expected: TokenKind, found: TokenKind },

    /// Common-code reference submission has no content
    #[error("Submission '{0}' is empty")]
    EmptySubmission(String),

    /// Malformed submission (e.g. empty name)
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// An internal invariant was violated. Deterministic, never retried.
    #[error("Internal algorithm error: {0}")]
    InternalAlgorithm(String),

    /// Interner asked for an id it never issued
    #[error("Unknown lexeme id {0}")]
    UnknownLexeme(u32),

    /// Every lexeme id has been issued
    #[error("Lexeme interner exhausted after {0} distinct lexemes")]
    LexemeOverflow(usize),

    /// Pair generation needs more input
    #[error("Need at least {required} submissions to compare, found {found}")]
    NotEnoughSubmissions { found: usize, required: usize },

    /// No detector registered under this name
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// No preprocessor registered under this name
    #[error("Unknown preprocessor '{0}'")]
    UnknownPreprocessor(String),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimcheckError {
    /// Create an internal algorithm error
    pub fn internal(msg: impl Into<String>) -> Self {
        SimcheckError::InternalAlgorithm(msg.into())
    }

    /// Create a token type mismatch error
    pub fn type_mismatch(expected: TokenKind, found: TokenKind) -> Self {
        SimcheckError::TokenTypeMismatch { expected, found }
    }

    /// Whether the error points at a bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SimcheckError::InternalAlgorithm(_) | SimcheckError::UnknownLexeme(_)
        )
    }
}

/// Result type alias for simcheck operations
pub type Result<T> = std::result::Result<T, SimcheckError>;
