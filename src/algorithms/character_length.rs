//! Similarity of the n-grams' share of their sentences' characters.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::math::divide_safe;
use crate::prediction::{Prediction, ScoreKey};

/// Scores `(1 - |source share - target share|)^5` over character lengths.
///
/// A share is the n-gram's character count divided by its sentence's. Null
/// targets score `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterLength;

impl CharacterLength {
    /// Similarity of two length shares
    pub fn calc(source_share: f64, target_share: f64) -> f64 {
        (1.0 - (source_share - target_share).abs()).max(0.0).powi(5)
    }
}

impl Algorithm for CharacterLength {
    fn name(&self) -> &'static str {
        "CharacterLength"
    }

    fn execute(&self, prediction: &mut Prediction, _ctx: &ScoringContext<'_>) -> Result<()> {
        let source = prediction.source();
        let target = prediction.target();
        let weight = if target.is_null() {
            0.0
        } else {
            Self::calc(
                divide_safe(
                    source.character_length() as f64,
                    source.sentence_character_length() as f64,
                ),
                divide_safe(
                    target.character_length() as f64,
                    target.sentence_character_length() as f64,
                ),
            )
        };
        prediction.set_score(ScoreKey::CharacterLength, weight)
    }
}
