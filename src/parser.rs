//! N-gram and alignment permutation generation.

use crate::index::PermutationIndex;
use crate::types::{Alignment, Ngram, Token};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Default longest n-gram
pub const DEFAULT_MAX_NGRAM_LENGTH: usize = 3;

/// Generates n-grams from token sequences and alignment permutations from n-grams
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// Every contiguous window of exactly `length` tokens, left to right.
    ///
    /// Each n-gram's `occurrence` is its 1-based rank among n-grams with the
    /// same key produced by this call; `occurrences` is the total.
    pub fn sized_ngrams(sentence: &[Token], length: usize) -> Vec<Ngram> {
        if length == 0 || length > sentence.len() {
            return Vec::new();
        }

        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut ngrams: Vec<Ngram> = sentence
            .windows(length)
            .map(|window| {
                let mut ngram = Ngram::new(window.to_vec());
                let count = counts.entry(ngram.key().to_string()).or_insert(0);
                *count += 1;
                ngram.occurrence = *count;
                ngram
            })
            .collect();

        for ngram in &mut ngrams {
            ngram.occurrences = counts.get(ngram.key()).copied().unwrap_or(1);
        }

        ngrams
    }

    /// All n-grams of length `1..=min(max_length, sentence.len())`, shortest first.
    pub fn ngrams(sentence: &[Token], max_length: usize) -> Vec<Ngram> {
        let longest = max_length.min(sentence.len());
        (1..=longest)
            .flat_map(|length| Self::sized_ngrams(sentence, length))
            .collect()
    }

    /// Every source × target pairing, plus each source n-gram paired with the
    /// null n-gram.
    pub fn alignment_permutations(
        source_ngrams: &[Arc<Ngram>],
        target_ngrams: &[Arc<Ngram>],
    ) -> Vec<Alignment> {
        let null = Arc::new(Ngram::null());
        let mut alignments = Vec::with_capacity(source_ngrams.len() * (target_ngrams.len() + 1));

        for source in source_ngrams {
            for target in target_ngrams {
                alignments.push(Alignment::new(Arc::clone(source), Arc::clone(target)));
            }
            alignments.push(Alignment::new(Arc::clone(source), Arc::clone(&null)));
        }

        alignments
    }

    /// Count every source × target permutation (plus null pairings) into `index`.
    pub fn index_alignment_permutations(
        source_ngrams: &[Ngram],
        target_ngrams: &[Ngram],
        index: &mut PermutationIndex,
    ) {
        let source: Vec<Arc<Ngram>> = source_ngrams.iter().cloned().map(Arc::new).collect();
        let target: Vec<Arc<Ngram>> = target_ngrams.iter().cloned().map(Arc::new).collect();

        for alignment in Self::alignment_permutations(&source, &target) {
            index.add_alignment(&alignment);
        }
    }
}
