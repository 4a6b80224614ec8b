//! Agreement between the occurrence ranks of repeated n-grams.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::math::measure_relative_proximity;
use crate::prediction::{Prediction, ScoreKey};

/// Scores whether the n-th occurrence on one side pairs with the n-th on the other.
///
/// Only written when both n-grams occur more than once in the sentence pair
/// (lemma counts preferred); otherwise the score stays unset and
/// [`AlignmentPosition`](super::AlignmentPosition) ignores it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentRelativeOccurrence;

impl Algorithm for AlignmentRelativeOccurrence {
    fn name(&self) -> &'static str {
        "AlignmentRelativeOccurrence"
    }

    fn execute(&self, prediction: &mut Prediction, ctx: &ScoringContext<'_>) -> Result<()> {
        let source = prediction.source();
        let target = prediction.target();
        if target.is_null() {
            return Ok(());
        }

        let statics = &ctx.sentence.static_index;
        let source_occurrences = statics.source_ngrams.read_ngram_lemma(source);
        let target_occurrences = statics.target_ngrams.read_ngram_lemma(target);
        if source_occurrences <= 1 || target_occurrences <= 1 {
            return Ok(());
        }

        let weight = measure_relative_proximity(
            source.occurrence.saturating_sub(1) as f64,
            target.occurrence.saturating_sub(1) as f64,
            (source_occurrences - 1) as f64,
            (target_occurrences - 1) as f64,
        );

        prediction.set_score(ScoreKey::AlignmentRelativeOccurrence, weight)
    }
}
