//! Composite index over a parallel corpus.

use super::permutation::PermutationIndex;
use super::static_index::StaticIndex;
use crate::errors::{Result, WordMapError};
use crate::parser::Parser;
use crate::types::Token;

/// Permutation and static statistics over a set of sentence pairs.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    /// Frequencies among generated alignment permutations
    pub permutations: PermutationIndex,
    /// True occurrence frequencies and corpus lengths
    pub static_index: StaticIndex,
    sentence_pairs: usize,
}

/// The index built over the single sentence pair being predicted.
pub type UnalignedSentenceIndex = CorpusIndex;

impl CorpusIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parallel corpus.
    ///
    /// Fails without touching the index when the two sides have a different
    /// number of sentences.
    pub fn append<S: AsRef<[Token]>>(
        &mut self,
        source_sentences: &[S],
        target_sentences: &[S],
        max_source_ngram_length: usize,
        max_target_ngram_length: usize,
    ) -> Result<()> {
        if source_sentences.len() != target_sentences.len() {
            return Err(WordMapError::corpus_mismatch(
                source_sentences.len(),
                target_sentences.len(),
            ));
        }

        for (source, target) in source_sentences.iter().zip(target_sentences) {
            self.add_sentence_pair(
                source.as_ref(),
                target.as_ref(),
                max_source_ngram_length,
                max_target_ngram_length,
            );
        }

        Ok(())
    }

    /// Index a single sentence pair
    pub fn add_sentence_pair(
        &mut self,
        source: &[Token],
        target: &[Token],
        max_source_ngram_length: usize,
        max_target_ngram_length: usize,
    ) {
        let source_ngrams = Parser::ngrams(source, max_source_ngram_length);
        let target_ngrams = Parser::ngrams(target, max_target_ngram_length);

        Parser::index_alignment_permutations(&source_ngrams, &target_ngrams, &mut self.permutations);
        self.static_index
            .add_sentence(source, target, &source_ngrams, &target_ngrams);
        self.sentence_pairs += 1;
    }

    /// Number of sentence pairs indexed
    pub fn sentence_pairs(&self) -> usize {
        self.sentence_pairs
    }

    /// Whether no sentence pair has been indexed
    pub fn is_empty(&self) -> bool {
        self.sentence_pairs == 0
    }
}
