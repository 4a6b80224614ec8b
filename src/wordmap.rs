//! The `WordMap` façade
//!
//! Wires the default algorithm battery into an [`Engine`] and exposes
//! corpus / alignment-memory ingestion and prediction over either tokens or
//! raw text.
//!
//! ```
//! use wordmap::WordMap;
//!
//! let map = WordMap::default();
//! let suggestions = map.predict_text("hello", "olleh dlrow", 1, 0.1).unwrap();
//! assert_eq!(suggestions[0].predictions()[0].key(), "n:hello->n:olleh:dlrow");
//! ```

use crate::algorithms::{default_stages, Algorithm, GlobalAlgorithm};
use crate::engine::{Engine, SuggestOptions};
use crate::errors::{Result, WordMapError};
use crate::nlp::tokenizer::Tokenizer;
use crate::prediction::Suggestion;
use crate::types::{Alignment, Ngram, Token, WordMapConfig};
use rustc_hash::FxHashSet;

/// Alignment prediction over a corpus and an alignment memory.
#[derive(Debug)]
pub struct WordMap {
    engine: Engine,
    tokenizer: Tokenizer,
}

impl Default for WordMap {
    fn default() -> Self {
        Self::with_engine(Engine::default())
    }
}

impl WordMap {
    /// Create a `WordMap` with the default algorithms
    pub fn new(config: WordMapConfig) -> Result<Self> {
        Ok(Self::with_engine(Engine::new(config)?))
    }

    fn with_engine(mut engine: Engine) -> Self {
        for stage in default_stages() {
            engine.register(stage);
        }
        Self {
            engine,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Replace the tokenizer used by the `*_text` methods
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// The configuration
    pub fn config(&self) -> &WordMapConfig {
        self.engine.config()
    }

    /// The underlying engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Register an additional per-prediction algorithm after the defaults
    pub fn register_algorithm(&mut self, algorithm: Box<dyn Algorithm>) {
        self.engine.register_algorithm(algorithm);
    }

    /// Register an additional batch algorithm after the defaults
    pub fn register_global_algorithm(&mut self, algorithm: Box<dyn GlobalAlgorithm>) {
        self.engine.register_global_algorithm(algorithm);
    }

    // ------------------------------------------------------------------
    // Corpus
    // ------------------------------------------------------------------

    /// Append tokenized sentence pairs to the corpus
    pub fn append_corpus<S: AsRef<[Token]>>(&mut self, source: &[S], target: &[S]) -> Result<()> {
        self.engine.add_corpus(source, target)
    }

    /// Tokenize and append sentence pairs to the corpus
    pub fn append_corpus_text<S: AsRef<str>>(&mut self, source: &[S], target: &[S]) -> Result<()> {
        if source.len() != target.len() {
            return Err(WordMapError::corpus_mismatch(source.len(), target.len()));
        }
        let source: Vec<Vec<Token>> = source.iter().map(|s| self.tokenizer.tokenize(s.as_ref())).collect();
        let target: Vec<Vec<Token>> = target.iter().map(|s| self.tokenizer.tokenize(s.as_ref())).collect();
        self.engine.add_corpus(&source, &target)
    }

    // ------------------------------------------------------------------
    // Alignment memory
    // ------------------------------------------------------------------

    /// Append confirmed alignments
    pub fn append_alignment_memory(&mut self, alignments: &[Alignment]) {
        self.engine.add_alignment_memory(alignments);
    }

    /// Remember that the whole of `source` aligns to the whole of `target`
    pub fn append_alignment_memory_text(&mut self, source: &str, target: &str) {
        let alignment = Alignment::new(
            Ngram::new(self.tokenizer.tokenize(source)),
            Ngram::new(self.tokenizer.tokenize(target)),
        );
        self.engine.add_alignment_memory(&[alignment]);
    }

    /// Forget every confirmed alignment
    pub fn clear_alignment_memory(&mut self) {
        self.engine.clear_alignment_memory();
    }

    // ------------------------------------------------------------------
    // Prediction
    // ------------------------------------------------------------------

    /// Predict suggestions for a tokenized sentence pair.
    ///
    /// Fails with `InvalidConfig` when `min_confidence` is negative or NaN.
    pub fn predict(
        &self,
        source: &[Token],
        target: &[Token],
        max_suggestions: usize,
        min_confidence: f64,
    ) -> Result<Vec<Suggestion>> {
        WordMapConfig::validate_min_confidence(min_confidence)?;

        let options = self
            .suggest_options()
            .with_max_suggestions(max_suggestions)
            .with_min_confidence(min_confidence);

        let predictions = self.engine.score(self.engine.run(source, target)?)?;
        Ok(Engine::suggest(&predictions, &options))
    }

    /// Predict with the configured `max_suggestions` and `min_confidence`
    pub fn predict_default(&self, source: &[Token], target: &[Token]) -> Result<Vec<Suggestion>> {
        let config = self.engine.config();
        self.predict(source, target, config.max_suggestions, config.min_confidence)
    }

    /// Tokenize and predict suggestions for a sentence pair
    pub fn predict_text(
        &self,
        source: &str,
        target: &str,
        max_suggestions: usize,
        min_confidence: f64,
    ) -> Result<Vec<Suggestion>> {
        let source = self.tokenizer.tokenize(source);
        let target = self.tokenizer.tokenize(target);
        self.predict(&source, &target, max_suggestions, min_confidence)
    }

    /// Predict using only predictions whose alignment key appears in `benchmark`.
    ///
    /// Used to evaluate the assembly step against known-correct alignments, so
    /// no confidence floor is applied.
    pub fn predict_with_benchmark(
        &self,
        source: &[Token],
        target: &[Token],
        benchmark: &[Alignment],
        max_suggestions: usize,
    ) -> Result<Vec<Suggestion>> {
        let keys: FxHashSet<&str> = benchmark.iter().map(Alignment::key).collect();
        let options = self
            .suggest_options()
            .with_max_suggestions(max_suggestions);

        let predictions: Vec<_> = self
            .engine
            .score(self.engine.run(source, target)?)?
            .into_iter()
            .filter(|p| keys.contains(p.key()))
            .collect();
        Ok(Engine::suggest(&predictions, &options))
    }

    fn suggest_options(&self) -> SuggestOptions {
        SuggestOptions::new()
            .with_force_occurrence_order(self.engine.config().force_occurrence_order)
    }
}
