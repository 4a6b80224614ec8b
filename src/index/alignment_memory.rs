//! Index over confirmed ("alignment memory") alignments.

use super::permutation::PermutationIndex;
use crate::types::Alignment;

/// Permutation frequencies over human-confirmed alignments.
#[derive(Debug, Clone, Default)]
pub struct AlignmentMemoryIndex {
    /// Alignment and n-gram frequencies
    pub permutations: PermutationIndex,
    alignments: usize,
}

impl AlignmentMemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append confirmed alignments
    pub fn append(&mut self, alignments: &[Alignment]) {
        for alignment in alignments {
            self.permutations.add_alignment(alignment);
        }
        self.alignments += alignments.len();
    }

    /// Whether `alignment` (or, failing that, its lemma identity) is remembered
    pub fn contains(&self, alignment: &Alignment) -> bool {
        if self.permutations.alignments.read(alignment.key()) > 0 {
            return true;
        }
        alignment
            .lemma_key()
            .is_some_and(|key| self.permutations.alignments.read_lemma(key) > 0)
    }

    /// Number of alignments appended since the last clear
    pub fn len(&self) -> usize {
        self.alignments
    }

    /// Whether the memory is empty
    pub fn is_empty(&self) -> bool {
        self.alignments == 0
    }

    /// Forget every alignment
    pub fn clear(&mut self) {
        self.permutations.clear();
        self.alignments = 0;
    }
}
