//! Key → count stores
//!
//! [`FrequencyIndex`] is a plain counter with default-zero reads.
//! [`NgramIndex`] and [`AlignmentIndex`] wrap two of them: one bucket keyed by
//! the surface key and one keyed by the lemma key, incremented together so
//! either identity can be looked up later.

use crate::types::{Alignment, Ngram};
use rustc_hash::FxHashMap;

/// A counter keyed by string; missing keys read as zero.
#[derive(Debug, Clone, Default)]
pub struct FrequencyIndex {
    counts: FxHashMap<String, u64>,
}

impl FrequencyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the count for `key`
    #[inline]
    pub fn read(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Add `value` to the count for `key`
    pub fn increment(&mut self, key: &str, value: u64) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += value;
        } else {
            self.counts.insert(key.to_string(), value);
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether any key has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop every count
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// N-gram frequencies by surface key and by lemma key.
#[derive(Debug, Clone, Default)]
pub struct NgramIndex {
    surface: FrequencyIndex,
    lemma: FrequencyIndex,
}

impl NgramIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `ngram` (and of its lemma key, when present)
    pub fn increment(&mut self, ngram: &Ngram) {
        self.increment_by(ngram, 1);
    }

    /// Count `value` occurrences of `ngram`
    pub fn increment_by(&mut self, ngram: &Ngram, value: u64) {
        self.surface.increment(ngram.key(), value);
        if let Some(lemma_key) = ngram.lemma_key() {
            self.lemma.increment(lemma_key, value);
        }
    }

    /// Frequency of a surface key
    #[inline]
    pub fn read(&self, key: &str) -> u64 {
        self.surface.read(key)
    }

    /// Frequency of a lemma key
    #[inline]
    pub fn read_lemma(&self, lemma_key: &str) -> u64 {
        self.lemma.read(lemma_key)
    }

    /// Surface frequency of `ngram`
    pub fn read_ngram(&self, ngram: &Ngram) -> u64 {
        self.read(ngram.key())
    }

    /// Lemma frequency of `ngram`, falling back to its surface frequency
    /// when the n-gram is not fully lemma-annotated
    pub fn read_ngram_lemma(&self, ngram: &Ngram) -> u64 {
        match ngram.lemma_key() {
            Some(lemma_key) => self.read_lemma(lemma_key),
            None => self.read_ngram(ngram),
        }
    }

    /// Whether nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.surface.is_empty()
    }

    /// Drop every count
    pub fn clear(&mut self) {
        self.surface.clear();
        self.lemma.clear();
    }
}

/// Alignment frequencies by alignment key and alignment lemma key.
#[derive(Debug, Clone, Default)]
pub struct AlignmentIndex {
    surface: FrequencyIndex,
    lemma: FrequencyIndex,
}

impl AlignmentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `alignment`
    pub fn increment(&mut self, alignment: &Alignment) {
        self.increment_by(alignment, 1);
    }

    /// Count `value` occurrences of `alignment`
    pub fn increment_by(&mut self, alignment: &Alignment, value: u64) {
        self.surface.increment(alignment.key(), value);
        if let Some(lemma_key) = alignment.lemma_key() {
            self.lemma.increment(lemma_key, value);
        }
    }

    /// Frequency of an alignment key
    #[inline]
    pub fn read(&self, key: &str) -> u64 {
        self.surface.read(key)
    }

    /// Frequency of an alignment lemma key
    #[inline]
    pub fn read_lemma(&self, lemma_key: &str) -> u64 {
        self.lemma.read(lemma_key)
    }

    /// Whether nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.surface.is_empty()
    }

    /// Drop every count
    pub fn clear(&mut self) {
        self.surface.clear();
        self.lemma.clear();
    }
}
