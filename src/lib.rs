//! # wordmap
//!
//! Word and phrase alignment prediction between a sentence and its
//! translation.
//!
//! Candidate alignments between every source and target n-gram (up to three
//! tokens by default) are scored from corpus statistics and from a memory of
//! confirmed alignments, then greedily assembled into non-overlapping
//! suggestions.
//!
//! ## Features
//!
//! - **Statistical**: frequency, position, length, occurrence and uniqueness features
//! - **Lemma-aware**: every corpus feature has a lemma twin when tokens carry lemmas
//! - **Occurrence ordering**: repeated words are aligned in sentence order
//! - **Extensible**: additional scoring algorithms can be registered

pub mod algorithms;
pub mod engine;
pub mod errors;
pub mod export;
pub mod index;
pub mod math;
pub mod nlp;
pub mod parser;
pub mod prediction;
pub mod types;
pub mod wordmap;

// Re-export commonly used types
pub use errors::{Result, WordMapError};
pub use prediction::{Prediction, ScoreKey, Suggestion};
pub use types::{Alignment, Ngram, Token, WordMapConfig};

// Re-export main functionality
pub use algorithms::{Algorithm, GlobalAlgorithm, ScoringContext, Stage};
pub use engine::{Engine, Scheduler, SuggestOptions};
pub use export::Export;
pub use index::{AlignmentMemoryIndex, CorpusIndex, UnalignedSentenceIndex};
pub use nlp::tokenizer::Tokenizer;
pub use parser::Parser;
pub use wordmap::WordMap;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
