/*
 * Simcheck Core - Pairwise Similarity Detection Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Token model (Lexeme, Token, TokenList, Submission), tokenizers
 * - features/    : Vertical slices (preprocessing → similarity detectors)
 * - pipeline/    : Pair generation, registries, parallel orchestration
 * - usecases/    : DetectionSession
 *
 * Performance:
 * - Interned lexemes: token equality is an integer compare
 * - Rayon work-stealing, one task per pair
 */

// Crate-level lint configuration
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::needless_range_loop)] // Range loop for DP indexing
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (preprocessing, similarity detection)
pub mod features;

/// Pair generation and parallel orchestration
pub mod pipeline;

/// Configuration system (presets + YAML)
pub mod config;

/// Error types
pub mod errors;

/// Usecase layer (DetectionSession)
pub mod usecases;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{DetectionConfig, Preset};
pub use errors::{Result, SimcheckError};
pub use features::preprocessing::{CommonCodeRemover, SubmissionPreprocessor};
pub use features::similarity::{
    AlgorithmResult, LineHashDetector, PairSummary, SimilarityDetector, SmithWatermanDetector,
    SuffixTreeDetector,
};
pub use pipeline::{BatchOutcome, PairFailure, PairOrchestrator};
pub use shared::models::{
    EqualityMode, ImmutableTokenList, LexemeId, LexemeInterner, Submission, Token, TokenKind,
    TokenList,
};
pub use usecases::DetectionSession;
