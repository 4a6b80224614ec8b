//! Whether the two n-grams are comparably rare.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::index::StaticIndex;
use crate::math::{divide_safe, min_max_ratio};
use crate::prediction::{Prediction, ScoreKey};

/// Share of corpus tokens above which an n-gram counts as common
pub const COMMON_NGRAM_SHARE: f64 = 0.1;

/// Rewards rare n-grams whose rarity matches on both sides.
///
/// Two common n-grams carry no signal and score `0`. Otherwise the score is
/// the ratio of the two rarities, discounted by the commoner of the two and
/// scaled by the matching phrase plausibility (which must already be set).
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniqueness;

impl Uniqueness {
    /// Uniqueness from corpus occurrence counts, corpus token lengths and plausibility
    pub fn calc(
        source_frequency: f64,
        target_frequency: f64,
        source_length: f64,
        target_length: f64,
        plausibility: f64,
    ) -> f64 {
        let source_share = divide_safe(source_frequency, source_length);
        let target_share = divide_safe(target_frequency, target_length);
        if source_share == 0.0 || target_share == 0.0 {
            return 0.0;
        }
        if source_share > COMMON_NGRAM_SHARE && target_share > COMMON_NGRAM_SHARE {
            return 0.0;
        }

        min_max_ratio(source_share, target_share)
            * (1.0 - source_share.max(target_share))
            * plausibility
    }

    fn calc_from(statics: &StaticIndex, source: u64, target: u64, plausibility: f64) -> f64 {
        Self::calc(
            source as f64,
            target as f64,
            statics.source_token_length() as f64,
            statics.target_token_length() as f64,
            plausibility,
        )
    }
}

impl Algorithm for Uniqueness {
    fn name(&self) -> &'static str {
        "Uniqueness"
    }

    fn execute(&self, prediction: &mut Prediction, ctx: &ScoringContext<'_>) -> Result<()> {
        if prediction.target().is_null() {
            prediction.set_score(ScoreKey::Uniqueness, 0.0)?;
            return prediction.set_score(ScoreKey::LemmaUniqueness, 0.0);
        }

        let plausibility = prediction.get_score(ScoreKey::PhrasePlausibility)?;
        let lemma_plausibility = prediction.get_score(ScoreKey::LemmaPhrasePlausibility)?;

        let statics = &ctx.corpus.static_index;
        let source = prediction.source();
        let target = prediction.target();

        let surface = Self::calc_from(
            statics,
            statics.source_ngrams.read_ngram(source),
            statics.target_ngrams.read_ngram(target),
            plausibility,
        );
        let lemma = if prediction.alignment().lemma_key().is_some() {
            Self::calc_from(
                statics,
                statics.source_ngrams.read_ngram_lemma(source),
                statics.target_ngrams.read_ngram_lemma(target),
                lemma_plausibility,
            )
        } else {
            0.0
        };

        prediction.set_score(ScoreKey::Uniqueness, surface)?;
        prediction.set_score(ScoreKey::LemmaUniqueness, lemma)
    }
}
