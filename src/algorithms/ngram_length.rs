//! Similarity of the n-grams' share of their sentences' tokens.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::math::divide_safe;
use crate::prediction::{Prediction, ScoreKey};

/// Scores `(1 - |source share - target share|)^5` over token counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramLength;

impl NgramLength {
    /// Similarity of two length shares
    pub fn calc(source_share: f64, target_share: f64) -> f64 {
        (1.0 - (source_share - target_share).abs()).max(0.0).powi(5)
    }
}

impl Algorithm for NgramLength {
    fn name(&self) -> &'static str {
        "NgramLength"
    }

    fn execute(&self, prediction: &mut Prediction, _ctx: &ScoringContext<'_>) -> Result<()> {
        let source = prediction.source();
        let target = prediction.target();
        let weight = if target.is_null() {
            0.0
        } else {
            Self::calc(
                divide_safe(
                    source.token_length() as f64,
                    source.sentence_token_length() as f64,
                ),
                divide_safe(
                    target.token_length() as f64,
                    target.sentence_token_length() as f64,
                ),
            )
        };
        prediction.set_score(ScoreKey::NgramLength, weight)
    }
}
