//! Agreement between how often each side occurs in the sentence pair.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::math::min_max_ratio;
use crate::prediction::{Prediction, ScoreKey};

/// Scores `min / max` of the two n-grams' occurrence counts in the sentence pair.
///
/// A word appearing twice in the source most likely translates to something
/// appearing twice in the target. The lemma variant counts lemmas and scores
/// `0` for alignments without a lemma identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentOccurrences;

impl AlignmentOccurrences {
    /// Similarity of two occurrence counts
    pub fn calc(source_occurrences: f64, target_occurrences: f64) -> f64 {
        min_max_ratio(source_occurrences, target_occurrences)
    }
}

impl Algorithm for AlignmentOccurrences {
    fn name(&self) -> &'static str {
        "AlignmentOccurrences"
    }

    fn execute(&self, prediction: &mut Prediction, ctx: &ScoringContext<'_>) -> Result<()> {
        let statics = &ctx.sentence.static_index;
        let source = prediction.source();
        let target = prediction.target();

        let surface = Self::calc(
            statics.source_ngrams.read_ngram(source) as f64,
            statics.target_ngrams.read_ngram(target) as f64,
        );
        let lemma = if prediction.alignment().lemma_key().is_some() {
            Self::calc(
                statics.source_ngrams.read_ngram_lemma(source) as f64,
                statics.target_ngrams.read_ngram_lemma(target) as f64,
            )
        } else {
            0.0
        };

        prediction.set_score(ScoreKey::AlignmentOccurrences, surface)?;
        prediction.set_score(ScoreKey::LemmaAlignmentOccurrences, lemma)
    }
}
