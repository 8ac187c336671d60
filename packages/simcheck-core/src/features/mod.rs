//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/         - Pure result types and shared algorithms
//! - infrastructure/ - Concrete detectors
//!
//! - `similarity`    - Pairwise detectors
//! - `preprocessing` - Submission rewrites applied before detection

pub mod preprocessing;
pub mod similarity;
