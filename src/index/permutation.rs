//! Permutation frequencies
//!
//! Counts how often an alignment, and each of its n-grams, appears among the
//! *generated* candidate pairs of a dataset. This is distinct from how often
//! an n-gram occurs in running text (see [`StaticIndex`](super::StaticIndex)).

use super::frequency::{AlignmentIndex, NgramIndex};
use crate::types::Alignment;

/// Alignment and n-gram frequencies over generated permutations
#[derive(Debug, Clone, Default)]
pub struct PermutationIndex {
    /// Alignment permutation frequencies
    pub alignments: AlignmentIndex,
    /// Source n-gram frequencies among permutations
    pub source_ngrams: NgramIndex,
    /// Target n-gram frequencies among permutations (includes the null n-gram)
    pub target_ngrams: NgramIndex,
}

impl PermutationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one generated alignment permutation
    pub fn add_alignment(&mut self, alignment: &Alignment) {
        self.alignments.increment(alignment);
        self.source_ngrams.increment(alignment.source());
        self.target_ngrams.increment(alignment.target());
    }

    /// Whether nothing has been counted
    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    /// Drop every count
    pub fn clear(&mut self) {
        self.alignments.clear();
        self.source_ngrams.clear();
        self.target_ngrams.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ngram, Token};

    #[test]
    fn test_add_alignment_counts_each_side() {
        let source = Ngram::new(vec![Token::new("hello", 0, 0, 1, 5, 1, 1)]);
        let target = Ngram::new(vec![Token::new("olleh", 0, 0, 1, 5, 1, 1)]);
        let mut index = PermutationIndex::new();

        index.add_alignment(&Alignment::new(source.clone(), target));
        index.add_alignment(&Alignment::new(source, Ngram::null()));

        assert_eq!(index.alignments.read("n:hello->n:olleh"), 1);
        assert_eq!(index.alignments.read("n:hello->n:"), 1);
        assert_eq!(index.source_ngrams.read("n:hello"), 2);
        assert_eq!(index.target_ngrams.read("n:olleh"), 1);
        assert_eq!(index.target_ngrams.read("n:"), 1);

        index.clear();
        assert!(index.is_empty());
    }
}
