//! Usecase Layer - High-level operations for a detection run
//!
//! Ties configuration, the shared interner, the registries and the
//! orchestrator together so a caller only supplies submissions:
//! - CLI front ends
//! - Batch jobs over a corpus
//! - Tests

pub mod detection_session;

// Re-export main API
pub use detection_session::DetectionSession;
