//! Collapsing scores into one confidence per prediction.
//!
//! Two weighted means are taken: one over corpus evidence and one over
//! alignment-memory evidence. Predictions backed by alignment memory keep the
//! memory mean plus a flat `+1` boost; everything else keeps the corpus mean
//! gated by phrase plausibility.

use crate::errors::Result;
use crate::index::AlignmentMemoryIndex;
use crate::math::{divide_safe, reduce_strength};
use crate::prediction::{Prediction, ScoreKey};

/// How strongly a poor `alignmentPosition` drags memory confidence down
pub const POSITION_STRENGTH: f64 = 0.4;

/// Added to every prediction found in alignment memory
pub const ALIGNMENT_MEMORY_BOOST: f64 = 1.0;

/// Scores combined into corpus confidence
pub const CORPUS_KEYS: [ScoreKey; 11] = [
    ScoreKey::SourceCorpusPermutationsFrequencyRatio,
    ScoreKey::TargetCorpusPermutationsFrequencyRatio,
    ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio,
    ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio,
    ScoreKey::AlignmentPosition,
    ScoreKey::NgramLength,
    ScoreKey::CharacterLength,
    ScoreKey::AlignmentOccurrences,
    ScoreKey::LemmaAlignmentOccurrences,
    ScoreKey::Uniqueness,
    ScoreKey::LemmaUniqueness,
];

/// Scores combined into alignment-memory confidence
pub const ALIGNMENT_MEMORY_KEYS: [ScoreKey; 11] = [
    ScoreKey::SourceAlignmentMemoryFrequencyRatio,
    ScoreKey::TargetAlignmentMemoryFrequencyRatio,
    ScoreKey::LemmaSourceAlignmentMemoryFrequencyRatio,
    ScoreKey::LemmaTargetAlignmentMemoryFrequencyRatio,
    ScoreKey::AlignmentPosition,
    ScoreKey::NgramLength,
    ScoreKey::CharacterLength,
    ScoreKey::AlignmentOccurrences,
    ScoreKey::LemmaAlignmentOccurrences,
    ScoreKey::Uniqueness,
    ScoreKey::LemmaUniqueness,
];

/// Weight table; unlisted keys weigh `1.0`.
pub const WEIGHTS: &[(ScoreKey, f64)] = &[
    (ScoreKey::AlignmentPosition, 0.7),
    (ScoreKey::NgramLength, 0.2),
    (ScoreKey::CharacterLength, 0.3),
    (ScoreKey::AlignmentOccurrences, 0.4),
    (ScoreKey::LemmaAlignmentOccurrences, 0.4),
    (ScoreKey::Uniqueness, 0.5),
    (ScoreKey::LemmaUniqueness, 0.5),
    (ScoreKey::SourceCorpusPermutationsFrequencyRatio, 0.7),
    (ScoreKey::TargetCorpusPermutationsFrequencyRatio, 0.7),
    (ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio, 0.7),
    (ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio, 0.7),
    (ScoreKey::SourceAlignmentMemoryFrequencyRatio, 0.8),
    (ScoreKey::TargetAlignmentMemoryFrequencyRatio, 0.8),
    (ScoreKey::LemmaSourceAlignmentMemoryFrequencyRatio, 0.7),
    (ScoreKey::LemmaTargetAlignmentMemoryFrequencyRatio, 0.7),
];

/// Weight of `key` in `weights`, defaulting to `1.0`
pub fn weight_of(weights: &[(ScoreKey, f64)], key: ScoreKey) -> f64 {
    weights
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(1.0, |&(_, weight)| weight)
}

/// Weighted arithmetic mean of `keys` on `prediction`.
///
/// Every key must already be set; a missing key is a pipeline-ordering bug
/// and fails with [`WordMapError::ScoreMissing`](crate::WordMapError::ScoreMissing).
pub fn calculate_weighted_confidence(
    prediction: &Prediction,
    keys: &[ScoreKey],
    weights: &[(ScoreKey, f64)],
) -> Result<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for &key in keys {
        let weight = weight_of(weights, key);
        weighted_sum += prediction.get_score(key)? * weight;
        weight_sum += weight;
    }
    Ok(divide_safe(weighted_sum, weight_sum))
}

/// Write the `confidence` score on every prediction
pub fn calculate_confidence(
    predictions: &mut [Prediction],
    alignment_memory: &AlignmentMemoryIndex,
) -> Result<()> {
    for prediction in predictions.iter_mut() {
        let confidence = confidence_of(prediction, alignment_memory)?;
        prediction.set_score(ScoreKey::Confidence, confidence)?;
    }
    Ok(())
}

fn confidence_of(prediction: &Prediction, alignment_memory: &AlignmentMemoryIndex) -> Result<f64> {
    let is_alignment_memory = alignment_memory.contains(prediction.alignment());

    let corpus_confidence = calculate_weighted_confidence(prediction, &CORPUS_KEYS, WEIGHTS)?;
    let memory_confidence =
        calculate_weighted_confidence(prediction, &ALIGNMENT_MEMORY_KEYS, WEIGHTS)?
            * reduce_strength(
                prediction.get_score(ScoreKey::AlignmentPosition)?,
                POSITION_STRENGTH,
            );

    if is_alignment_memory {
        Ok(memory_confidence + ALIGNMENT_MEMORY_BOOST)
    } else {
        Ok(corpus_confidence * prediction.get_score(ScoreKey::PhrasePlausibility)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{prediction, sentence};
    use crate::errors::WordMapError;

    fn fully_scored(value: f64) -> Prediction {
        let source = sentence("a");
        let target = sentence("b");
        let mut p = prediction(&source, 0..1, &target, 0..1);
        for key in ScoreKey::ALL {
            if key != ScoreKey::Confidence {
                p.set_score(key, value).unwrap();
            }
        }
        p
    }

    #[test]
    fn test_weight_table() {
        assert_eq!(weight_of(WEIGHTS, ScoreKey::AlignmentPosition), 0.7);
        assert_eq!(weight_of(WEIGHTS, ScoreKey::SourceAlignmentMemoryFrequencyRatio), 0.8);
        assert_eq!(weight_of(WEIGHTS, ScoreKey::PhrasePlausibility), 1.0);
    }

    #[test]
    fn test_weighted_mean() {
        let source = sentence("a");
        let target = sentence("b");
        let mut p = prediction(&source, 0..1, &target, 0..1);
        p.set_score(ScoreKey::NgramLength, 1.0).unwrap();
        p.set_score(ScoreKey::CharacterLength, 0.0).unwrap();

        let keys = [ScoreKey::NgramLength, ScoreKey::CharacterLength];
        let mean = calculate_weighted_confidence(&p, &keys, WEIGHTS).unwrap();
        assert!((mean - 0.4).abs() < 1e-12);

        assert_eq!(calculate_weighted_confidence(&p, &[], WEIGHTS).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let source = sentence("a");
        let target = sentence("b");
        let p = prediction(&source, 0..1, &target, 0..1);

        let err = calculate_weighted_confidence(&p, &[ScoreKey::Uniqueness], WEIGHTS).unwrap_err();
        assert_eq!(err, WordMapError::ScoreMissing { key: "uniqueness" });
    }

    #[test]
    fn test_corpus_confidence_gated_by_plausibility() {
        let mut predictions = vec![fully_scored(0.5)];
        calculate_confidence(&mut predictions, &AlignmentMemoryIndex::new()).unwrap();

        assert!((predictions[0].confidence() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_alignment_memory_boost() {
        let mut memory = AlignmentMemoryIndex::new();
        let mut predictions = vec![fully_scored(1.0)];
        memory.append(&[predictions[0].alignment().clone()]);

        calculate_confidence(&mut predictions, &memory).unwrap();

        assert!((predictions[0].confidence() - 2.0).abs() < 1e-12);
    }
}
