//! Predictions, their scores, and suggestions built from them.
//!
//! A [`Prediction`] wraps one candidate [`Alignment`] together with a
//! write-once score table indexed by the closed [`ScoreKey`] enum. A
//! [`Suggestion`] is a set of non-intersecting predictions covering (part
//! of) a sentence pair.

use crate::errors::{Result, WordMapError};
use crate::math::median;
use crate::types::{Alignment, Ngram};
use std::fmt;

// ============================================================================
// Score keys
// ============================================================================

/// Every score an algorithm or the confidence step may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreKey {
    SourceCorpusPermutationsFrequencyRatio,
    TargetCorpusPermutationsFrequencyRatio,
    SourceAlignmentMemoryFrequencyRatio,
    TargetAlignmentMemoryFrequencyRatio,
    FrequencyRatioCorpusFiltered,
    FrequencyRatioAlignmentMemoryFiltered,
    LemmaSourceCorpusPermutationsFrequencyRatio,
    LemmaTargetCorpusPermutationsFrequencyRatio,
    LemmaSourceAlignmentMemoryFrequencyRatio,
    LemmaTargetAlignmentMemoryFrequencyRatio,
    LemmaFrequencyRatioCorpusFiltered,
    LemmaFrequencyRatioAlignmentMemoryFiltered,
    AlignmentPosition,
    AlignmentRelativeOccurrence,
    NgramRelativeTokenDistance,
    CharacterLength,
    NgramLength,
    PhrasePlausibility,
    LemmaPhrasePlausibility,
    Uniqueness,
    LemmaUniqueness,
    AlignmentOccurrences,
    LemmaAlignmentOccurrences,
    Confidence,
}

impl ScoreKey {
    /// Number of score keys
    pub const COUNT: usize = 24;

    /// All keys in declaration order
    pub const ALL: [ScoreKey; Self::COUNT] = [
        ScoreKey::SourceCorpusPermutationsFrequencyRatio,
        ScoreKey::TargetCorpusPermutationsFrequencyRatio,
        ScoreKey::SourceAlignmentMemoryFrequencyRatio,
        ScoreKey::TargetAlignmentMemoryFrequencyRatio,
        ScoreKey::FrequencyRatioCorpusFiltered,
        ScoreKey::FrequencyRatioAlignmentMemoryFiltered,
        ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio,
        ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio,
        ScoreKey::LemmaSourceAlignmentMemoryFrequencyRatio,
        ScoreKey::LemmaTargetAlignmentMemoryFrequencyRatio,
        ScoreKey::LemmaFrequencyRatioCorpusFiltered,
        ScoreKey::LemmaFrequencyRatioAlignmentMemoryFiltered,
        ScoreKey::AlignmentPosition,
        ScoreKey::AlignmentRelativeOccurrence,
        ScoreKey::NgramRelativeTokenDistance,
        ScoreKey::CharacterLength,
        ScoreKey::NgramLength,
        ScoreKey::PhrasePlausibility,
        ScoreKey::LemmaPhrasePlausibility,
        ScoreKey::Uniqueness,
        ScoreKey::LemmaUniqueness,
        ScoreKey::AlignmentOccurrences,
        ScoreKey::LemmaAlignmentOccurrences,
        ScoreKey::Confidence,
    ];

    /// Slot in a prediction's score table
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The exported score name
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreKey::SourceCorpusPermutationsFrequencyRatio => {
                "sourceCorpusPermutationsFrequencyRatio"
            }
            ScoreKey::TargetCorpusPermutationsFrequencyRatio => {
                "targetCorpusPermutationsFrequencyRatio"
            }
            ScoreKey::SourceAlignmentMemoryFrequencyRatio => "sourceAlignmentMemoryFrequencyRatio",
            ScoreKey::TargetAlignmentMemoryFrequencyRatio => "targetAlignmentMemoryFrequencyRatio",
            ScoreKey::FrequencyRatioCorpusFiltered => "frequencyRatioCorpusFiltered",
            ScoreKey::FrequencyRatioAlignmentMemoryFiltered => {
                "frequencyRatioAlignmentMemoryFiltered"
            }
            ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio => {
                "lemmaSourceCorpusPermutationsFrequencyRatio"
            }
            ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio => {
                "lemmaTargetCorpusPermutationsFrequencyRatio"
            }
            ScoreKey::LemmaSourceAlignmentMemoryFrequencyRatio => {
                "lemmaSourceAlignmentMemoryFrequencyRatio"
            }
            ScoreKey::LemmaTargetAlignmentMemoryFrequencyRatio => {
                "lemmaTargetAlignmentMemoryFrequencyRatio"
            }
            ScoreKey::LemmaFrequencyRatioCorpusFiltered => "lemmaFrequencyRatioCorpusFiltered",
            ScoreKey::LemmaFrequencyRatioAlignmentMemoryFiltered => {
                "lemmaFrequencyRatioAlignmentMemoryFiltered"
            }
            ScoreKey::AlignmentPosition => "alignmentPosition",
            ScoreKey::AlignmentRelativeOccurrence => "alignmentRelativeOccurrence",
            ScoreKey::NgramRelativeTokenDistance => "ngramRelativeTokenDistance",
            ScoreKey::CharacterLength => "characterLength",
            ScoreKey::NgramLength => "ngramLength",
            ScoreKey::PhrasePlausibility => "phrasePlausibility",
            ScoreKey::LemmaPhrasePlausibility => "lemmaPhrasePlausibility",
            ScoreKey::Uniqueness => "uniqueness",
            ScoreKey::LemmaUniqueness => "lemmaUniqueness",
            ScoreKey::AlignmentOccurrences => "alignmentOccurrences",
            ScoreKey::LemmaAlignmentOccurrences => "lemmaAlignmentOccurrences",
            ScoreKey::Confidence => "confidence",
        }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Prediction
// ============================================================================

/// One candidate alignment plus the scores assigned to it.
#[derive(Debug, Clone)]
pub struct Prediction {
    alignment: Alignment,
    scores: [Option<f64>; ScoreKey::COUNT],
}

impl Prediction {
    /// Create an unscored prediction
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            scores: [None; ScoreKey::COUNT],
        }
    }

    /// The predicted alignment
    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    /// Source side of the alignment
    pub fn source(&self) -> &Ngram {
        self.alignment.source()
    }

    /// Target side of the alignment
    pub fn target(&self) -> &Ngram {
        self.alignment.target()
    }

    /// Alignment key
    pub fn key(&self) -> &str {
        self.alignment.key()
    }

    /// Write a score. Each key may be written once; `NaN` leaves the key unset.
    pub fn set_score(&mut self, key: ScoreKey, value: f64) -> Result<()> {
        let slot = &mut self.scores[key.index()];
        if slot.is_some() {
            return Err(WordMapError::ScoreAlreadySet { key: key.as_str() });
        }
        if !value.is_nan() {
            *slot = Some(value);
        }
        Ok(())
    }

    /// Read a score that must have been written earlier in the pipeline
    pub fn get_score(&self, key: ScoreKey) -> Result<f64> {
        self.scores[key.index()].ok_or(WordMapError::ScoreMissing { key: key.as_str() })
    }

    /// Read an optional score
    #[inline]
    pub fn score(&self, key: ScoreKey) -> Option<f64> {
        self.scores[key.index()]
    }

    /// Whether a score has been written
    #[inline]
    pub fn has_score(&self, key: ScoreKey) -> bool {
        self.scores[key.index()].is_some()
    }

    /// Combined confidence, `0.0` before scoring
    pub fn confidence(&self) -> f64 {
        self.score(ScoreKey::Confidence).unwrap_or(0.0)
    }

    /// All written scores in key order
    pub fn scores(&self) -> impl Iterator<Item = (ScoreKey, f64)> + '_ {
        ScoreKey::ALL
            .into_iter()
            .filter_map(move |key| self.score(key).map(|value| (key, value)))
    }

    /// Whether the two predictions share a token on either side
    pub fn intersects(&self, other: &Prediction) -> bool {
        shares_token(self.source(), other.source()) || shares_token(self.target(), other.target())
    }
}

fn shares_token(a: &Ngram, b: &Ngram) -> bool {
    a.tokens().iter().any(|t| b.tokens().contains(t))
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4})", self.key(), self.confidence())
    }
}

// ============================================================================
// Suggestion
// ============================================================================

/// A set of non-intersecting predictions ordered by source position.
#[derive(Debug, Clone, Default)]
pub struct Suggestion {
    predictions: Vec<Prediction>,
}

impl Suggestion {
    /// Create an empty suggestion
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prediction, keeping source-position order
    pub fn add_prediction(&mut self, prediction: Prediction) {
        let position = prediction.source().token_position();
        let at = self
            .predictions
            .partition_point(|p| p.source().token_position() <= position);
        self.predictions.insert(at, prediction);
    }

    /// The predictions, ordered by source token position
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Consume the suggestion, returning its predictions
    pub fn into_predictions(self) -> Vec<Prediction> {
        self.predictions
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Whether the suggestion holds no predictions
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Median confidence of the predictions, `0.0` when empty
    pub fn compound_confidence(&self) -> f64 {
        let confidences: Vec<f64> = self.predictions.iter().map(Prediction::confidence).collect();
        median(&confidences)
    }

    /// Identity of the selected prediction set, used to drop duplicates
    pub fn signature(&self) -> String {
        let mut signature = String::new();
        for p in &self.predictions {
            if !signature.is_empty() {
                signature.push('|');
            }
            signature.push_str(&format!(
                "{}@{}:{}",
                p.key(),
                p.source().token_position(),
                p.target().token_position()
            ));
        }
        signature
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.predictions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(p.key())?;
        }
        Ok(())
    }
}
