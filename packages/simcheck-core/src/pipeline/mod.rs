//! Detection pipeline
//!
//! ```text
//! submissions ──▶ preprocess (one task per submission)
//!             ──▶ generate_pairs / generate_pairs_with_archive
//!             ──▶ PairOrchestrator::run (one task per pair)
//!             ──▶ BatchOutcome
//! ```

pub mod orchestrator;
pub mod pairs;
pub mod registry;

pub use orchestrator::{BatchOutcome, PairFailure, PairOrchestrator};
pub use pairs::{generate_pairs, generate_pairs_with_archive, SubmissionPair, MIN_SUBMISSIONS};
pub use registry::{AlgorithmFactory, AlgorithmRegistry, PreprocessorFactory, PreprocessorRegistry};
