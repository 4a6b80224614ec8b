//! Frequency indexes over the corpus, the alignment memory, and the
//! sentence pair being predicted.
//!
//! All indexes are derived state: they grow monotonically as data is
//! appended and can be rebuilt from the data they summarize.
//!
//! - [`frequency`]: key → count stores ([`FrequencyIndex`], [`NgramIndex`], [`AlignmentIndex`])
//! - [`permutation`]: counts over generated alignment permutations
//! - [`static_index`]: true n-gram occurrence counts and corpus lengths
//! - [`corpus`]: the training corpus / single-sentence index
//! - [`alignment_memory`]: confirmed alignments

pub mod alignment_memory;
pub mod corpus;
pub mod frequency;
pub mod permutation;
pub mod static_index;

pub use alignment_memory::AlignmentMemoryIndex;
pub use corpus::{CorpusIndex, UnalignedSentenceIndex};
pub use frequency::{AlignmentIndex, FrequencyIndex, NgramIndex};
pub use permutation::PermutationIndex;
pub use static_index::StaticIndex;
