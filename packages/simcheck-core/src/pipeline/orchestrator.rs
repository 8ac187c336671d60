//! Pair orchestrator
//!
//! Runs one detector invocation per submission pair, and one preprocessor
//! invocation per submission, on a dedicated Rayon pool. Tasks share only the
//! lexeme interner; everything else they touch is task-local.
//!
//! Result order is unspecified from the caller's point of view.

use super::pairs::SubmissionPair;
use crate::config::{FailurePolicy, ParallelConfig};
use crate::errors::{Result, SimcheckError};
use crate::features::preprocessing::SubmissionPreprocessor;
use crate::features::similarity::{AlgorithmResult, SimilarityDetector};
use crate::shared::build_worker_pool;
use crate::shared::models::Submission;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A pair whose detection failed
#[derive(Debug)]
pub struct PairFailure {
    pub a: Arc<Submission>,
    pub b: Arc<Submission>,
    pub error: SimcheckError,
}

/// Everything one batch produced
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<AlgorithmResult>,
    /// Always empty under `FailurePolicy::AbortBatch`
    pub failures: Vec<PairFailure>,
    pub elapsed_ms: u64,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct PairOrchestrator {
    pool: ThreadPool,
    failure_policy: FailurePolicy,
}

impl PairOrchestrator {
    pub fn new(config: &ParallelConfig) -> Result<Self> {
        Ok(Self {
            pool: build_worker_pool(config.num_workers)?,
            failure_policy: config.failure_policy,
        })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Detect every pair in parallel
    ///
    /// Under `AbortBatch` the first failure is returned and no results are
    /// kept. Under `CollectErrors` failures are reported next to results.
    pub fn run(
        &self,
        detector: &dyn SimilarityDetector,
        pairs: &[SubmissionPair],
    ) -> Result<BatchOutcome> {
        let start = Instant::now();
        info!(
            algorithm = detector.name(),
            pairs = pairs.len(),
            workers = self.num_workers(),
            "starting detection batch"
        );

        let mut outcome = match self.failure_policy {
            FailurePolicy::AbortBatch => {
                let results = self.pool.install(|| {
                    pairs
                        .par_iter()
                        .map(|pair| detector.detect(&pair.a, &pair.b))
                        .collect::<Result<Vec<_>>>()
                })?;
                BatchOutcome {
                    results,
                    ..Default::default()
                }
            }
            FailurePolicy::CollectErrors => {
                let attempts: Vec<_> = self.pool.install(|| {
                    pairs
                        .par_iter()
                        .map(|pair| (pair, detector.detect(&pair.a, &pair.b)))
                        .collect()
                });

                let mut outcome = BatchOutcome::default();
                for (pair, attempt) in attempts {
                    match attempt {
                        Ok(result) => outcome.results.push(result),
                        Err(error) => {
                            warn!(
                                a = pair.a.name(),
                                b = pair.b.name(),
                                error = %error,
                                "pair detection failed"
                            );
                            outcome.failures.push(PairFailure {
                                a: Arc::clone(&pair.a),
                                b: Arc::clone(&pair.b),
                                error,
                            });
                        }
                    }
                }
                outcome
            }
        };

        outcome.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            algorithm = detector.name(),
            results = outcome.results.len(),
            failures = outcome.failures.len(),
            elapsed_ms = outcome.elapsed_ms,
            "detection batch finished"
        );
        Ok(outcome)
    }

    /// Apply `preprocessor` to every submission in parallel, keeping input order
    pub fn preprocess(
        &self,
        preprocessor: &dyn SubmissionPreprocessor,
        submissions: &[Arc<Submission>],
    ) -> Result<Vec<Arc<Submission>>> {
        let processed = self.pool.install(|| {
            submissions
                .par_iter()
                .map(|submission| preprocessor.process(submission).map(Arc::new))
                .collect::<Result<Vec<_>>>()
        })?;

        info!(
            preprocessor = preprocessor.name(),
            submissions = processed.len(),
            "preprocessing finished"
        );
        Ok(processed)
    }
}

impl std::fmt::Debug for PairOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairOrchestrator")
            .field("num_workers", &self.num_workers())
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::preprocessing::LowercasePreprocessor;
    use crate::features::similarity::LineHashDetector;
    use crate::pipeline::pairs::generate_pairs;
    use crate::shared::models::{LexemeInterner, TokenKind};
    use crate::shared::utils::tokenizer_for;

    /// Fails on any pair involving a submission named "bad"
    struct FailingDetector(LineHashDetector);

    impl SimilarityDetector for FailingDetector {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn default_token_kind(&self) -> TokenKind {
            TokenKind::Line
        }

        fn detect(&self, a: &Arc<Submission>, b: &Arc<Submission>) -> Result<AlgorithmResult> {
            if a.name() == "bad" || b.name() == "bad" {
                return Err(SimcheckError::internal("boom"));
            }
            self.0.detect(a, b)
        }
    }

    fn lines(interner: &Arc<LexemeInterner>, items: &[(&str, &str)]) -> Vec<Arc<Submission>> {
        let tokenizer = tokenizer_for(TokenKind::Line, Arc::clone(interner));
        items
            .iter()
            .map(|(name, text)| {
                Arc::new(Submission::from_text(*name, *text, tokenizer.as_ref()).unwrap())
            })
            .collect()
    }

    fn orchestrator(policy: FailurePolicy) -> PairOrchestrator {
        PairOrchestrator::new(&ParallelConfig {
            num_workers: 2,
            failure_policy: policy,
        })
        .unwrap()
    }

    #[test]
    fn test_runs_every_pair() {
        let interner = LexemeInterner::shared();
        let subs = lines(&interner, &[("a", "x\ny\n"), ("b", "x\n"), ("c", "z\n")]);
        let pairs = generate_pairs(&subs).unwrap();

        let outcome = orchestrator(FailurePolicy::AbortBatch)
            .run(&LineHashDetector::new(Arc::clone(&interner)), &pairs)
            .unwrap();
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.is_complete());
        let total: usize = outcome.results.iter().map(|r| r.identical_tokens_a()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_abort_batch_propagates_failure() {
        let interner = LexemeInterner::shared();
        let subs = lines(&interner, &[("a", "x\n"), ("bad", "x\n"), ("c", "x\n")]);
        let pairs = generate_pairs(&subs).unwrap();
        let detector = FailingDetector(LineHashDetector::new(Arc::clone(&interner)));

        let err = orchestrator(FailurePolicy::AbortBatch)
            .run(&detector, &pairs)
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_collect_errors_keeps_results() {
        let interner = LexemeInterner::shared();
        let subs = lines(&interner, &[("a", "x\n"), ("bad", "x\n"), ("c", "x\n")]);
        let pairs = generate_pairs(&subs).unwrap();
        let detector = FailingDetector(LineHashDetector::new(Arc::clone(&interner)));

        let outcome = orchestrator(FailurePolicy::CollectErrors)
            .run(&detector, &pairs)
            .unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.failures.len(), 2);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_preprocess_keeps_order() {
        let interner = LexemeInterner::shared();
        let subs = lines(&interner, &[("a", "X\n"), ("b", "Y\n"), ("c", "Z\n")]);

        let processed = orchestrator(FailurePolicy::AbortBatch)
            .preprocess(&LowercasePreprocessor::new(Arc::clone(&interner)), &subs)
            .unwrap();
        let contents: Vec<_> = processed.iter().map(|s| s.content().to_string()).collect();
        assert_eq!(contents, vec!["x\n", "y\n", "z\n"]);
    }
}
