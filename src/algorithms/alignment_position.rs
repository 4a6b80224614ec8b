//! Relative position of the two n-grams within their sentences.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::math::{fit_to_range, measure_relative_proximity};
use crate::prediction::{Prediction, ScoreKey};

/// How far a repeated target's later occurrences are discounted
const LAST_OCCURRENCE_WEIGHT: f64 = 0.9;

/// Scores how closely the source and target sit at the same relative place.
///
/// Each n-gram's position is measured within the range of positions it could
/// occupy (`sentence length - n-gram length`). The proximity is then scaled
/// by `alignmentRelativeOccurrence` and `ngramRelativeTokenDistance` when
/// those were written, and by a small discount for later occurrences of a
/// repeated target. Null targets score `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentPosition;

impl Algorithm for AlignmentPosition {
    fn name(&self) -> &'static str {
        "AlignmentPosition"
    }

    fn execute(&self, prediction: &mut Prediction, _ctx: &ScoringContext<'_>) -> Result<()> {
        let source = prediction.source();
        let target = prediction.target();
        if target.is_null() {
            return prediction.set_score(ScoreKey::AlignmentPosition, 0.0);
        }

        let source_range = source
            .sentence_token_length()
            .saturating_sub(source.token_length());
        let target_range = target
            .sentence_token_length()
            .saturating_sub(target.token_length());

        let mut weight = measure_relative_proximity(
            source.token_position() as f64,
            target.token_position() as f64,
            source_range as f64,
            target_range as f64,
        );

        if let Some(occurrence) = prediction.score(ScoreKey::AlignmentRelativeOccurrence) {
            weight *= occurrence;
        }
        if let Some(distance) = prediction.score(ScoreKey::NgramRelativeTokenDistance) {
            weight *= distance;
        }
        if target.occurrences > 1 {
            weight *= fit_to_range(
                target.occurrence as f64,
                1.0,
                target.occurrences as f64,
                1.0,
                LAST_OCCURRENCE_WEIGHT,
            );
        }

        prediction.set_score(ScoreKey::AlignmentPosition, weight)
    }
}
