//! Prediction engine
//!
//! The [`Engine`] owns the corpus and alignment-memory indexes and a
//! [`Scheduler`] of scoring algorithms. One prediction call runs:
//!
//! 1. **ngrams**: n-grams for both sentences
//! 2. **predictions**: every source × target pairing, plus null pairings
//! 3. **algorithms**: scheduled batches write scores onto each prediction
//! 4. **confidence**: scores collapse into one confidence per prediction
//! 5. **suggest**: sorted predictions are assembled into suggestions
//!
//! Steps 1–3 are [`Engine::run`], step 4 plus sorting is [`Engine::score`]
//! and step 5 is [`Engine::suggest`].

pub mod confidence;
pub mod scheduler;
pub mod suggest;

pub use confidence::{calculate_confidence, calculate_weighted_confidence};
pub use scheduler::{Batch, Scheduler};
pub use suggest::{sort_suggestions, suggest, OccurrenceMode, SuggestOptions, MAX_DISCARDS};

use crate::algorithms::{Algorithm, GlobalAlgorithm, ScoringContext, Stage};
use crate::errors::Result;
use crate::index::{AlignmentMemoryIndex, CorpusIndex, UnalignedSentenceIndex};
use crate::parser::Parser;
use crate::prediction::{Prediction, Suggestion};
use crate::types::{Alignment, Ngram, Token, WordMapConfig};
use std::sync::Arc;
use tracing::warn;

/// Stage names used in tracing spans
pub const STAGE_NGRAMS: &str = "ngrams";
pub const STAGE_PREDICTIONS: &str = "predictions";
pub const STAGE_ALGORITHMS: &str = "algorithms";
pub const STAGE_CONFIDENCE: &str = "confidence";
pub const STAGE_SUGGEST: &str = "suggest";

/// Enter a debug span for one engine stage until the end of the scope.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("engine_stage", stage = $name).entered();
    };
}

/// Owns the indexes and the algorithm schedule.
#[derive(Debug, Default)]
pub struct Engine {
    config: WordMapConfig,
    corpus_index: CorpusIndex,
    alignment_memory_index: AlignmentMemoryIndex,
    scheduler: Scheduler,
}

impl Engine {
    /// Create an engine with no algorithms registered
    pub fn new(config: WordMapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The engine configuration
    pub fn config(&self) -> &WordMapConfig {
        &self.config
    }

    /// The corpus index
    pub fn corpus_index(&self) -> &CorpusIndex {
        &self.corpus_index
    }

    /// The alignment memory index
    pub fn alignment_memory_index(&self) -> &AlignmentMemoryIndex {
        &self.alignment_memory_index
    }

    /// The algorithm schedule
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register an algorithm of either kind
    pub fn register(&mut self, stage: Stage) {
        self.scheduler.add(stage);
    }

    /// Register a per-prediction algorithm
    pub fn register_algorithm(&mut self, algorithm: Box<dyn Algorithm>) {
        self.register(Stage::PerPrediction(algorithm));
    }

    /// Register a batch algorithm
    pub fn register_global_algorithm(&mut self, algorithm: Box<dyn GlobalAlgorithm>) {
        self.register(Stage::Global(algorithm));
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Index a parallel corpus; fails without indexing anything when the
    /// two sides have different sentence counts
    pub fn add_corpus<S: AsRef<[Token]>>(&mut self, source: &[S], target: &[S]) -> Result<()> {
        self.corpus_index.append(
            source,
            target,
            self.config.max_source_ngram_length,
            self.config.max_target_ngram_length,
        )
    }

    /// Remember confirmed alignments.
    ///
    /// Alignments longer than the configured n-gram lengths are kept but can
    /// never be predicted; they are reported when warnings are enabled.
    pub fn add_alignment_memory(&mut self, alignments: &[Alignment]) {
        if self.config.warnings {
            for alignment in alignments {
                let source_length = alignment.source().token_length();
                let target_length = alignment.target().token_length();
                if source_length > self.config.max_source_ngram_length
                    || target_length > self.config.max_target_ngram_length
                {
                    warn!(
                        alignment = alignment.key(),
                        source_length,
                        target_length,
                        "alignment memory exceeds the max n-gram length and will not be predicted"
                    );
                }
            }
        }
        self.alignment_memory_index.append(alignments);
    }

    /// Forget every confirmed alignment
    pub fn clear_alignment_memory(&mut self) {
        self.alignment_memory_index.clear();
    }

    // ------------------------------------------------------------------
    // Prediction
    // ------------------------------------------------------------------

    /// Every source × target pairing plus one null pairing per source n-gram
    pub fn generate_predictions(source_ngrams: &[Ngram], target_ngrams: &[Ngram]) -> Vec<Prediction> {
        let source: Vec<Arc<Ngram>> = source_ngrams.iter().cloned().map(Arc::new).collect();
        let target: Vec<Arc<Ngram>> = target_ngrams.iter().cloned().map(Arc::new).collect();

        Parser::alignment_permutations(&source, &target)
            .into_iter()
            .map(Prediction::new)
            .collect()
    }

    /// Generate and score every prediction for one sentence pair.
    ///
    /// When `corpus_index` is empty the sentence pair itself stands in as
    /// the corpus.
    pub fn perform_prediction(
        source: &[Token],
        target: &[Token],
        corpus_index: &CorpusIndex,
        alignment_memory_index: &AlignmentMemoryIndex,
        scheduler: &Scheduler,
        config: &WordMapConfig,
    ) -> Result<Vec<Prediction>> {
        let (source_ngrams, target_ngrams) = {
            trace_stage!(STAGE_NGRAMS);
            (
                Parser::ngrams(source, config.max_source_ngram_length),
                Parser::ngrams(target, config.max_target_ngram_length),
            )
        };

        let predictions = {
            trace_stage!(STAGE_PREDICTIONS);
            Self::generate_predictions(&source_ngrams, &target_ngrams)
        };

        let mut sentence_index = UnalignedSentenceIndex::new();
        sentence_index.add_sentence_pair(
            source,
            target,
            config.max_source_ngram_length,
            config.max_target_ngram_length,
        );

        let corpus = if corpus_index.is_empty() {
            &sentence_index
        } else {
            corpus_index
        };
        let ctx = ScoringContext {
            corpus,
            alignment_memory: alignment_memory_index,
            sentence: &sentence_index,
        };

        trace_stage!(STAGE_ALGORITHMS);
        scheduler.execute(predictions, &ctx)
    }

    /// Generate and score every prediction for one sentence pair against
    /// this engine's indexes
    pub fn run(&self, source: &[Token], target: &[Token]) -> Result<Vec<Prediction>> {
        Self::perform_prediction(
            source,
            target,
            &self.corpus_index,
            &self.alignment_memory_index,
            &self.scheduler,
            &self.config,
        )
    }

    /// Write confidence on every prediction and sort by it
    pub fn score(&self, mut predictions: Vec<Prediction>) -> Result<Vec<Prediction>> {
        trace_stage!(STAGE_CONFIDENCE);
        calculate_confidence(&mut predictions, &self.alignment_memory_index)?;
        Self::sort_predictions(&mut predictions);
        Ok(predictions)
    }

    /// Stable sort by descending confidence
    pub fn sort_predictions(predictions: &mut [Prediction]) {
        predictions.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
    }

    /// Stable sort by descending compound confidence
    pub fn sort_suggestions(suggestions: &mut [Suggestion]) {
        sort_suggestions(suggestions);
    }

    /// Assemble suggestions from confidence-sorted predictions
    pub fn suggest(predictions: &[Prediction], options: &SuggestOptions) -> Vec<Suggestion> {
        trace_stage!(STAGE_SUGGEST);
        suggest(predictions, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::default_stages;
    use crate::errors::WordMapError;
    use crate::nlp::tokenizer::Tokenizer;
    use crate::prediction::ScoreKey;

    fn engine() -> Engine {
        let mut engine = Engine::new(WordMapConfig::default()).unwrap();
        for stage in default_stages() {
            engine.register(stage);
        }
        engine
    }

    #[test]
    fn test_generate_predictions_size() {
        let tokenizer = Tokenizer::new();
        let source = Parser::ngrams(&tokenizer.tokenize("a b c"), 3);
        let target = Parser::ngrams(&tokenizer.tokenize("x y"), 3);

        let predictions = Engine::generate_predictions(&source, &target);
        assert_eq!(predictions.len(), source.len() * (target.len() + 1));
    }

    #[test]
    fn test_run_scores_all_predictions() {
        let tokenizer = Tokenizer::new();
        let source = tokenizer.tokenize("hello world");
        let target = tokenizer.tokenize("olleh dlrow");

        let predictions = engine().run(&source, &target).unwrap();
        assert_eq!(predictions.len(), 3 * 4);
        assert!(predictions
            .iter()
            .all(|p| p.has_score(ScoreKey::PhrasePlausibility)));
    }

    #[test]
    fn test_score_sorts_descending() {
        let tokenizer = Tokenizer::new();
        let engine = engine();
        let predictions = engine
            .run(&tokenizer.tokenize("hello"), &tokenizer.tokenize("olleh dlrow"))
            .unwrap();
        let scored = engine.score(predictions).unwrap();

        assert_eq!(scored[0].key(), "n:hello->n:olleh:dlrow");
        assert!(scored
            .windows(2)
            .all(|w| w[0].confidence() >= w[1].confidence()));
    }

    #[test]
    fn test_add_corpus_mismatch() {
        let tokenizer = Tokenizer::new();
        let mut engine = engine();
        let err = engine
            .add_corpus(&[tokenizer.tokenize("a")], &[])
            .unwrap_err();

        assert_eq!(err, WordMapError::corpus_mismatch(1, 0));
        assert!(engine.corpus_index().is_empty());
    }

    #[test]
    fn test_alignment_memory_lifecycle() {
        let tokenizer = Tokenizer::new();
        let source = tokenizer.tokenize("hello");
        let target = tokenizer.tokenize("olleh");
        let mut engine = engine();

        let alignment = Alignment::new(Ngram::new(source.clone()), Ngram::new(target.clone()));
        engine.add_alignment_memory(&[alignment]);
        assert_eq!(engine.alignment_memory_index().len(), 1);

        let scored = engine.score(engine.run(&source, &target).unwrap()).unwrap();
        assert!(scored[0].confidence() > 1.0);

        engine.clear_alignment_memory();
        assert!(engine.alignment_memory_index().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WordMapConfig::default().with_max_source_ngram_length(0);
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_sort_predictions_is_stable() {
        let tokenizer = Tokenizer::new();
        let source = tokenizer.tokenize("a b");
        let target = tokenizer.tokenize("x");
        let mut predictions = Engine::generate_predictions(
            &Parser::ngrams(&source, 1),
            &Parser::ngrams(&target, 1),
        );
        for p in &mut predictions {
            p.set_score(ScoreKey::Confidence, 0.5).unwrap();
        }
        let before: Vec<String> = predictions.iter().map(|p| p.key().to_string()).collect();

        Engine::sort_predictions(&mut predictions);

        let after: Vec<String> = predictions.iter().map(|p| p.key().to_string()).collect();
        assert_eq!(before, after);
    }
}
