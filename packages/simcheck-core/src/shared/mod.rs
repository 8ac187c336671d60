//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features:
//! the token data model, the tokenizer port and its built-in adapters,
//! and worker pool construction.

pub mod models;
pub mod parallel;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use parallel::{build_worker_pool, resolve_workers};
pub use ports::Tokenizer;
pub use utils::tokenizers::tokenizer_for;
