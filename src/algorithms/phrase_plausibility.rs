//! How plausible it is that the two n-grams are translations of one another.

use super::{Algorithm, ScoringContext};
use crate::errors::Result;
use crate::index::StaticIndex;
use crate::math::{divide_safe, min_max_ratio};
use crate::prediction::{Prediction, ScoreKey};

/// Compares how common each n-gram is in its half of the corpus.
///
/// An n-gram occurring in 2% of source tokens is a likely translation of one
/// occurring in 2% of target tokens. Null targets are always plausible. The
/// lemma variant uses lemma frequencies and scores `0` for alignments without
/// a lemma identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhrasePlausibility;

impl PhrasePlausibility {
    /// Plausibility from corpus occurrence counts and corpus token lengths
    pub fn calc(
        source_frequency: f64,
        target_frequency: f64,
        source_length: f64,
        target_length: f64,
    ) -> f64 {
        min_max_ratio(
            divide_safe(source_frequency, source_length),
            divide_safe(target_frequency, target_length),
        )
    }

    fn calc_from(statics: &StaticIndex, source: u64, target: u64) -> f64 {
        Self::calc(
            source as f64,
            target as f64,
            statics.source_token_length() as f64,
            statics.target_token_length() as f64,
        )
    }
}

impl Algorithm for PhrasePlausibility {
    fn name(&self) -> &'static str {
        "PhrasePlausibility"
    }

    fn execute(&self, prediction: &mut Prediction, ctx: &ScoringContext<'_>) -> Result<()> {
        if prediction.target().is_null() {
            prediction.set_score(ScoreKey::PhrasePlausibility, 1.0)?;
            return prediction.set_score(ScoreKey::LemmaPhrasePlausibility, 1.0);
        }

        let statics = &ctx.corpus.static_index;
        let source = prediction.source();
        let target = prediction.target();

        let surface = Self::calc_from(
            statics,
            statics.source_ngrams.read_ngram(source),
            statics.target_ngrams.read_ngram(target),
        );
        let lemma = if prediction.alignment().lemma_key().is_some() {
            Self::calc_from(
                statics,
                statics.source_ngrams.read_ngram_lemma(source),
                statics.target_ngrams.read_ngram_lemma(target),
            )
        } else {
            0.0
        };

        prediction.set_score(ScoreKey::PhrasePlausibility, surface)?;
        prediction.set_score(ScoreKey::LemmaPhrasePlausibility, lemma)
    }
}
