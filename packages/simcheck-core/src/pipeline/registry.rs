//! Static name → factory tables for detectors and preprocessors
//!
//! Built once at startup; lookups by unknown name fail with
//! `UnknownAlgorithm` / `UnknownPreprocessor`.

use crate::config::DetectionConfig;
use crate::errors::{Result, SimcheckError};
use crate::features::preprocessing::{
    LowercasePreprocessor, SubmissionPreprocessor, WhitespaceDeduplicationPreprocessor,
    LOWERCASE_NAME, WHITESPACE_DEDUP_NAME,
};
use crate::features::similarity::{
    LineHashDetector, SimilarityDetector, SmithWatermanDetector, SuffixTreeDetector,
    LINE_COMPARE_NAME, SMITH_WATERMAN_NAME, SUFFIX_TREE_NAME,
};
use crate::shared::models::LexemeInterner;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type AlgorithmFactory =
    fn(&DetectionConfig, Arc<LexemeInterner>) -> Box<dyn SimilarityDetector>;

pub type PreprocessorFactory =
    fn(&DetectionConfig, Arc<LexemeInterner>) -> Box<dyn SubmissionPreprocessor>;

#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    factories: BTreeMap<&'static str, AlgorithmFactory>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three built-in detectors
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LINE_COMPARE_NAME, line_compare);
        registry.register(SMITH_WATERMAN_NAME, smith_waterman);
        registry.register(SUFFIX_TREE_NAME, suffix_tree);
        registry
    }

    /// Register (or replace) a factory
    pub fn register(&mut self, name: &'static str, factory: AlgorithmFactory) {
        self.factories.insert(name, factory);
    }

    pub fn create(
        &self,
        name: &str,
        config: &DetectionConfig,
        interner: Arc<LexemeInterner>,
    ) -> Result<Box<dyn SimilarityDetector>> {
        self.factories
            .get(name)
            .map(|factory| factory(config, interner))
            .ok_or_else(|| SimcheckError::UnknownAlgorithm(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

#[derive(Clone, Default)]
pub struct PreprocessorRegistry {
    factories: BTreeMap<&'static str, PreprocessorFactory>,
}

impl PreprocessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in text preprocessors (common-code removal is set up per session)
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LOWERCASE_NAME, lowercase);
        registry.register(WHITESPACE_DEDUP_NAME, whitespace_dedup);
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: PreprocessorFactory) {
        self.factories.insert(name, factory);
    }

    pub fn create(
        &self,
        name: &str,
        config: &DetectionConfig,
        interner: Arc<LexemeInterner>,
    ) -> Result<Box<dyn SubmissionPreprocessor>> {
        self.factories
            .get(name)
            .map(|factory| factory(config, interner))
            .ok_or_else(|| SimcheckError::UnknownPreprocessor(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl fmt::Debug for PreprocessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

// Built-in factories

fn line_compare(_: &DetectionConfig, interner: Arc<LexemeInterner>) -> Box<dyn SimilarityDetector> {
    Box::new(LineHashDetector::new(interner))
}

fn smith_waterman(config: &DetectionConfig, _: Arc<LexemeInterner>) -> Box<dyn SimilarityDetector> {
    Box::new(SmithWatermanDetector::new(config.smith_waterman))
}

fn suffix_tree(config: &DetectionConfig, _: Arc<LexemeInterner>) -> Box<dyn SimilarityDetector> {
    Box::new(SuffixTreeDetector::new(config.suffix_tree))
}

fn lowercase(_: &DetectionConfig, interner: Arc<LexemeInterner>) -> Box<dyn SubmissionPreprocessor> {
    Box::new(LowercasePreprocessor::new(interner))
}

fn whitespace_dedup(
    _: &DetectionConfig,
    interner: Arc<LexemeInterner>,
) -> Box<dyn SubmissionPreprocessor> {
    Box::new(WhitespaceDeduplicationPreprocessor::new(interner))
}
