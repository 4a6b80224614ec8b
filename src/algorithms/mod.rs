//! Scoring algorithms
//!
//! Each algorithm writes one or more named scores onto predictions. Two
//! contracts exist:
//!
//! - [`Algorithm`] scores one prediction at a time.
//! - [`GlobalAlgorithm`] receives the whole prediction batch, for features
//!   that need aggregation across predictions (frequency ratios).
//!
//! [`Stage`] closes over the two so the engine's scheduler can group
//! consecutive algorithms of the same kind without inspecting types at run
//! time.
//!
//! The default battery, in registration order:
//!
//! | Algorithm | Kind | Scores |
//! |-----------|------|--------|
//! | [`NgramFrequency`] | global | corpus / memory frequency ratios |
//! | [`LemmaNgramFrequency`] | global | lemma frequency ratios |
//! | [`AlignmentRelativeOccurrence`] | per-prediction | `alignmentRelativeOccurrence` (optional) |
//! | [`AlignmentOccurrences`] | per-prediction | `alignmentOccurrences`, `lemmaAlignmentOccurrences` |
//! | [`NgramRelativeTokenDistance`] | per-prediction | `ngramRelativeTokenDistance` (optional) |
//! | [`AlignmentPosition`] | per-prediction | `alignmentPosition` |
//! | [`PhrasePlausibility`] | per-prediction | `phrasePlausibility`, `lemmaPhrasePlausibility` |
//! | [`NgramLength`] | per-prediction | `ngramLength` |
//! | [`CharacterLength`] | per-prediction | `characterLength` |
//! | [`Uniqueness`] | per-prediction | `uniqueness`, `lemmaUniqueness` |

pub mod alignment_occurrences;
pub mod alignment_position;
pub mod alignment_relative_occurrence;
pub mod character_length;
pub mod ngram_frequency;
pub mod ngram_length;
pub mod ngram_relative_token_distance;
pub mod phrase_plausibility;
pub mod uniqueness;

pub use alignment_occurrences::AlignmentOccurrences;
pub use alignment_position::AlignmentPosition;
pub use alignment_relative_occurrence::AlignmentRelativeOccurrence;
pub use character_length::CharacterLength;
pub use ngram_frequency::{LemmaNgramFrequency, NgramFrequency};
pub use ngram_length::NgramLength;
pub use ngram_relative_token_distance::NgramRelativeTokenDistance;
pub use phrase_plausibility::PhrasePlausibility;
pub use uniqueness::Uniqueness;

use crate::errors::Result;
use crate::index::{AlignmentMemoryIndex, CorpusIndex, UnalignedSentenceIndex};
use crate::prediction::Prediction;

/// Read-only indexes available to every algorithm during one prediction call.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Statistics over the training corpus
    pub corpus: &'a CorpusIndex,
    /// Statistics over confirmed alignments
    pub alignment_memory: &'a AlignmentMemoryIndex,
    /// Statistics over the sentence pair being predicted
    pub sentence: &'a UnalignedSentenceIndex,
}

/// A per-prediction scoring algorithm.
///
/// # Contract
///
/// - Writes each of its scores at most once per prediction.
/// - May read scores written by algorithms registered before it.
pub trait Algorithm: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Score one prediction in place
    fn execute(&self, prediction: &mut Prediction, ctx: &ScoringContext<'_>) -> Result<()>;
}

/// A scoring algorithm that needs the whole prediction batch.
pub trait GlobalAlgorithm: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Score (and possibly reorder or replace) the whole batch
    fn execute(
        &self,
        predictions: Vec<Prediction>,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<Prediction>>;
}

/// A registered algorithm tagged by kind.
pub enum Stage {
    /// Applied to each prediction individually
    PerPrediction(Box<dyn Algorithm>),
    /// Applied to the whole batch
    Global(Box<dyn GlobalAlgorithm>),
}

impl Stage {
    /// Name of the wrapped algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Stage::PerPrediction(algorithm) => algorithm.name(),
            Stage::Global(algorithm) => algorithm.name(),
        }
    }

    /// Whether this is a batch algorithm
    pub fn is_global(&self) -> bool {
        matches!(self, Stage::Global(_))
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_global() { "Global" } else { "PerPrediction" };
        write!(f, "{}({})", kind, self.name())
    }
}

/// The default algorithm battery, in the order it must run.
///
/// `AlignmentPosition` reads the two optional occurrence/distance scores and
/// `Uniqueness` reads the plausibility scores, so they come after them.
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::Global(Box::new(NgramFrequency)),
        Stage::Global(Box::new(LemmaNgramFrequency)),
        Stage::PerPrediction(Box::new(AlignmentRelativeOccurrence)),
        Stage::PerPrediction(Box::new(AlignmentOccurrences)),
        Stage::PerPrediction(Box::new(NgramRelativeTokenDistance)),
        Stage::PerPrediction(Box::new(AlignmentPosition)),
        Stage::PerPrediction(Box::new(PhrasePlausibility)),
        Stage::PerPrediction(Box::new(NgramLength)),
        Stage::PerPrediction(Box::new(CharacterLength)),
        Stage::PerPrediction(Box::new(Uniqueness)),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by the algorithm tests.

    use crate::index::{AlignmentMemoryIndex, CorpusIndex};
    use crate::nlp::tokenizer::Tokenizer;
    use crate::prediction::Prediction;
    use crate::types::{Alignment, Ngram, Token};

    /// Owned indexes a [`ScoringContext`](super::ScoringContext) can borrow
    #[derive(Default)]
    pub struct Fixture {
        pub corpus: CorpusIndex,
        pub memory: AlignmentMemoryIndex,
        pub sentence: CorpusIndex,
    }

    impl Fixture {
        pub fn with_sentence(source: &[Token], target: &[Token]) -> Self {
            let mut fixture = Self::default();
            fixture.sentence.add_sentence_pair(source, target, 3, 3);
            fixture
        }

        pub fn ctx(&self) -> super::ScoringContext<'_> {
            super::ScoringContext {
                corpus: &self.corpus,
                alignment_memory: &self.memory,
                sentence: &self.sentence,
            }
        }
    }

    pub fn sentence(text: &str) -> Vec<Token> {
        Tokenizer::new().tokenize(text)
    }

    /// Prediction over `tokens[range]` on each side; an empty target range is the null n-gram
    pub fn prediction(
        source: &[Token],
        source_range: std::ops::Range<usize>,
        target: &[Token],
        target_range: std::ops::Range<usize>,
    ) -> Prediction {
        Prediction::new(Alignment::new(
            Ngram::new(source[source_range].to_vec()),
            Ngram::new(target[target_range].to_vec()),
        ))
    }
}
