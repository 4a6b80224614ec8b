//! Penalty for target n-grams whose tokens are spread across the sentence.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::prediction::{Prediction, ScoreKey};
use crate::types::Ngram;

/// Scores how tightly packed a multi-token target is.
///
/// Each pair of consecutive tokens scores `1` when adjacent and falls
/// linearly to `0` at the widest gap the sentence allows; the n-gram takes
/// its worst pair. Single-token and null targets are left unscored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramRelativeTokenDistance;

impl NgramRelativeTokenDistance {
    /// Distance score of one n-gram
    pub fn calc(ngram: &Ngram) -> f64 {
        // widest possible gap between two positions in the sentence
        let max_distance = ngram.sentence_token_length().saturating_sub(1);

        ngram
            .tokens()
            .windows(2)
            .map(|pair| {
                if max_distance <= 1 {
                    return 1.0;
                }
                let distance = pair[1].position.abs_diff(pair[0].position);
                let extra = distance.saturating_sub(1) as f64;
                (1.0 - extra / (max_distance - 1) as f64).max(0.0)
            })
            .fold(1.0, f64::min)
    }
}

impl Algorithm for NgramRelativeTokenDistance {
    fn name(&self) -> &'static str {
        "NgramRelativeTokenDistance"
    }

    fn execute(&self, prediction: &mut Prediction, _ctx: &ScoringContext<'_>) -> Result<()> {
        if prediction.target().token_length() < 2 {
            return Ok(());
        }
        let weight = Self::calc(prediction.target());
        prediction.set_score(ScoreKey::NgramRelativeTokenDistance, weight)
    }
}
