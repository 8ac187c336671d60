//! Detection Session - one configured detection run
//!
//! # Architecture
//!
//! ```text
//! DetectionConfig ──▶ AlgorithmRegistry ──▶ detector
//!                 ──▶ PreprocessorRegistry ──▶ preprocessors
//!                 ──▶ ParallelConfig ──▶ PairOrchestrator
//!
//! submissions ──▶ [common code] ──▶ [preprocessors] ──▶ pairs ──▶ BatchOutcome
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use simcheck_core::config::{DetectionConfig, Preset};
//! use simcheck_core::usecases::DetectionSession;
//!
//! let session = DetectionSession::new(DetectionConfig::preset(Preset::Fast)).unwrap();
//! let a = session.submission_from_text("a.txt", "x = 1\ny = 2\n").unwrap();
//! let b = session.submission_from_text("b.txt", "x = 1\nz = 3\n").unwrap();
//!
//! let outcome = session.run(&[a, b], &[]).unwrap();
//! assert_eq!(outcome.results.len(), 1);
//! assert_eq!(outcome.results[0].identical_tokens_a(), 1);
//! ```

use crate::config::DetectionConfig;
use crate::errors::Result;
use crate::features::preprocessing::{CommonCodeRemover, SubmissionPreprocessor};
use crate::features::similarity::SimilarityDetector;
use crate::pipeline::{
    generate_pairs, generate_pairs_with_archive, AlgorithmRegistry, BatchOutcome,
    PairOrchestrator, PreprocessorRegistry,
};
use crate::shared::models::{LexemeInterner, Submission, TokenKind};
use crate::shared::utils::tokenizer_for;
use std::sync::Arc;
use tracing::info;

pub struct DetectionSession {
    config: DetectionConfig,
    interner: Arc<LexemeInterner>,
    detector: Box<dyn SimilarityDetector>,
    /// Applied in order; common-code removal, when set, comes first
    preprocessors: Vec<Box<dyn SubmissionPreprocessor>>,
    orchestrator: PairOrchestrator,
}

impl DetectionSession {
    /// Session with a fresh interner and the built-in registries
    pub fn new(config: DetectionConfig) -> Result<Self> {
        Self::with_interner(config, LexemeInterner::shared())
    }

    /// Session sharing an existing interner
    pub fn with_interner(config: DetectionConfig, interner: Arc<LexemeInterner>) -> Result<Self> {
        Self::with_registries(
            config,
            interner,
            &AlgorithmRegistry::builtin(),
            &PreprocessorRegistry::builtin(),
        )
    }

    /// Session resolving names against custom registries
    pub fn with_registries(
        config: DetectionConfig,
        interner: Arc<LexemeInterner>,
        algorithms: &AlgorithmRegistry,
        preprocessors: &PreprocessorRegistry,
    ) -> Result<Self> {
        config.validate()?;

        let detector = algorithms.create(&config.algorithm, &config, Arc::clone(&interner))?;
        let preprocessors = config
            .preprocessors
            .iter()
            .map(|name| preprocessors.create(name, &config, Arc::clone(&interner)))
            .collect::<Result<Vec<_>>>()?;
        let orchestrator = PairOrchestrator::new(&config.parallel)?;

        info!(
            algorithm = detector.name(),
            preprocessors = preprocessors.len(),
            workers = orchestrator.num_workers(),
            "detection session ready"
        );

        Ok(Self {
            config,
            interner,
            detector,
            preprocessors,
            orchestrator,
        })
    }

    /// Strip content shared with `common` from every submission before detection
    pub fn with_common_code(mut self, common: &Submission) -> Result<Self> {
        let remover = CommonCodeRemover::new(common, Arc::clone(&self.interner))?;
        self.preprocessors.insert(0, Box::new(remover));
        Ok(self)
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn interner(&self) -> &Arc<LexemeInterner> {
        &self.interner
    }

    pub fn detector(&self) -> &dyn SimilarityDetector {
        self.detector.as_ref()
    }

    /// Configured kind, or the detector's default
    pub fn token_kind(&self) -> TokenKind {
        self.config
            .token_kind
            .unwrap_or_else(|| self.detector.default_token_kind())
    }

    /// Tokenize `content` with the session's token kind
    pub fn submission_from_text(
        &self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Arc<Submission>> {
        let tokenizer = tokenizer_for(self.token_kind(), Arc::clone(&self.interner));
        Submission::from_text(name, content, tokenizer.as_ref()).map(Arc::new)
    }

    /// Run every preprocessor over `submissions`, in order
    pub fn preprocess(&self, submissions: &[Arc<Submission>]) -> Result<Vec<Arc<Submission>>> {
        let mut current = submissions.to_vec();
        for preprocessor in &self.preprocessors {
            current = self
                .orchestrator
                .preprocess(preprocessor.as_ref(), &current)?;
        }
        Ok(current)
    }

    /// Preprocess, pair and detect
    ///
    /// With an empty `archive` every pair of `submissions` is compared;
    /// otherwise archive items are only compared against `submissions`.
    pub fn run(
        &self,
        submissions: &[Arc<Submission>],
        archive: &[Arc<Submission>],
    ) -> Result<BatchOutcome> {
        let submissions = self.preprocess(submissions)?;
        let pairs = if archive.is_empty() {
            generate_pairs(&submissions)?
        } else {
            let archive = self.preprocess(archive)?;
            generate_pairs_with_archive(&submissions, &archive)?
        };

        self.orchestrator.run(self.detector.as_ref(), &pairs)
    }
}

impl std::fmt::Debug for DetectionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionSession")
            .field("algorithm", &self.detector.name())
            .field(
                "preprocessors",
                &self.preprocessors.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("token_kind", &self.token_kind())
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
