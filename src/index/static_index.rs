//! Corpus-wide n-gram occurrence counts and corpus lengths.

use super::frequency::NgramIndex;
use crate::types::{Ngram, Token};

/// True n-gram occurrence counts plus running token/character totals.
///
/// Incremented once per actual sentence pair, never per permutation.
#[derive(Debug, Clone, Default)]
pub struct StaticIndex {
    /// Source n-gram occurrences
    pub source_ngrams: NgramIndex,
    /// Target n-gram occurrences
    pub target_ngrams: NgramIndex,
    source_token_length: u64,
    target_token_length: u64,
    source_character_length: u64,
    target_character_length: u64,
}

impl StaticIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sentence pair and the n-grams generated from it
    pub fn add_sentence(
        &mut self,
        source_tokens: &[Token],
        target_tokens: &[Token],
        source_ngrams: &[Ngram],
        target_ngrams: &[Ngram],
    ) {
        self.source_token_length += source_tokens.len() as u64;
        self.target_token_length += target_tokens.len() as u64;
        self.source_character_length += source_tokens
            .iter()
            .map(|t| t.char_length() as u64)
            .sum::<u64>();
        self.target_character_length += target_tokens
            .iter()
            .map(|t| t.char_length() as u64)
            .sum::<u64>();

        for ngram in source_ngrams {
            self.source_ngrams.increment(ngram);
        }
        for ngram in target_ngrams {
            self.target_ngrams.increment(ngram);
        }
    }

    /// Total source tokens seen
    pub fn source_token_length(&self) -> u64 {
        self.source_token_length
    }

    /// Total target tokens seen
    pub fn target_token_length(&self) -> u64 {
        self.target_token_length
    }

    /// Total source characters seen
    pub fn source_character_length(&self) -> u64 {
        self.source_character_length
    }

    /// Total target characters seen
    pub fn target_character_length(&self) -> u64 {
        self.target_character_length
    }
}
