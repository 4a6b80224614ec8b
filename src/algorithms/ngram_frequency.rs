//! Frequency ratios of alignments against their n-grams.
//!
//! For each prediction and each of the corpus and alignment memory:
//!
//! - `source…FrequencyRatio` = alignment frequency ÷ source n-gram frequency
//! - `target…FrequencyRatio` = alignment frequency ÷ target n-gram frequency
//! - `frequencyRatio…Filtered` = alignment frequency ÷ the summed frequency
//!   of every prediction in the batch sharing the alignment's key
//!
//! All frequencies come from the permutation indexes. The filtered ratio is
//! why this is a [`GlobalAlgorithm`]. [`LemmaNgramFrequency`] does the same
//! over lemma keys.

use super::{GlobalAlgorithm, ScoringContext};
use crate::errors::Result;
use crate::index::{NgramIndex, PermutationIndex};
use crate::math::divide_safe;
use crate::prediction::{Prediction, ScoreKey};
use crate::types::{Alignment, Ngram};
use rustc_hash::FxHashMap;

/// Surface-key frequency ratios
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramFrequency;

/// Lemma-key frequency ratios; zero for alignments without a lemma identity
#[derive(Debug, Clone, Copy, Default)]
pub struct LemmaNgramFrequency;

impl GlobalAlgorithm for NgramFrequency {
    fn name(&self) -> &'static str {
        "NgramFrequency"
    }

    fn execute(
        &self,
        predictions: Vec<Prediction>,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<Prediction>> {
        score_batch(predictions, ctx, &SURFACE)
    }
}

impl GlobalAlgorithm for LemmaNgramFrequency {
    fn name(&self) -> &'static str {
        "LemmaNgramFrequency"
    }

    fn execute(
        &self,
        predictions: Vec<Prediction>,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<Prediction>> {
        score_batch(predictions, ctx, &LEMMA)
    }
}

// ============================================================================
// Keying
// ============================================================================

/// Which identity to look frequencies up by, and where the scores go
struct Keying {
    lemma: bool,
    source_corpus: ScoreKey,
    target_corpus: ScoreKey,
    source_memory: ScoreKey,
    target_memory: ScoreKey,
    corpus_filtered: ScoreKey,
    memory_filtered: ScoreKey,
}

const SURFACE: Keying = Keying {
    lemma: false,
    source_corpus: ScoreKey::SourceCorpusPermutationsFrequencyRatio,
    target_corpus: ScoreKey::TargetCorpusPermutationsFrequencyRatio,
    source_memory: ScoreKey::SourceAlignmentMemoryFrequencyRatio,
    target_memory: ScoreKey::TargetAlignmentMemoryFrequencyRatio,
    corpus_filtered: ScoreKey::FrequencyRatioCorpusFiltered,
    memory_filtered: ScoreKey::FrequencyRatioAlignmentMemoryFiltered,
};

const LEMMA: Keying = Keying {
    lemma: true,
    source_corpus: ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio,
    target_corpus: ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio,
    source_memory: ScoreKey::LemmaSourceAlignmentMemoryFrequencyRatio,
    target_memory: ScoreKey::LemmaTargetAlignmentMemoryFrequencyRatio,
    corpus_filtered: ScoreKey::LemmaFrequencyRatioCorpusFiltered,
    memory_filtered: ScoreKey::LemmaFrequencyRatioAlignmentMemoryFiltered,
};

impl Keying {
    /// The key this keying looks `alignment` up by, if it has one
    fn alignment_key<'a>(&self, alignment: &'a Alignment) -> Option<&'a str> {
        if self.lemma {
            alignment.lemma_key()
        } else {
            Some(alignment.key())
        }
    }

    fn read_alignment(&self, index: &PermutationIndex, key: &str) -> f64 {
        let count = if self.lemma {
            index.alignments.read_lemma(key)
        } else {
            index.alignments.read(key)
        };
        count as f64
    }

    fn read_ngram(&self, index: &NgramIndex, ngram: &Ngram) -> f64 {
        let count = if self.lemma {
            index.read_ngram_lemma(ngram)
        } else {
            index.read_ngram(ngram)
        };
        count as f64
    }
}

/// Alignment frequencies of one prediction, kept between the two passes
struct Counted {
    key: Option<String>,
    corpus: f64,
    memory: f64,
}

/// Sum of `frequency` over every prediction sharing the same key
fn sum_by_key<'a>(
    counted: impl Iterator<Item = (&'a str, f64)>,
) -> FxHashMap<&'a str, f64> {
    let mut sums: FxHashMap<&str, f64> = FxHashMap::default();
    for (key, frequency) in counted {
        *sums.entry(key).or_insert(0.0) += frequency;
    }
    sums
}

fn score_batch(
    mut predictions: Vec<Prediction>,
    ctx: &ScoringContext<'_>,
    keying: &Keying,
) -> Result<Vec<Prediction>> {
    let corpus = &ctx.corpus.permutations;
    let memory = &ctx.alignment_memory.permutations;

    let mut counted = Vec::with_capacity(predictions.len());
    for prediction in &mut predictions {
        let Some(key) = keying.alignment_key(prediction.alignment()).map(str::to_string) else {
            for score in [
                keying.source_corpus,
                keying.target_corpus,
                keying.source_memory,
                keying.target_memory,
            ] {
                prediction.set_score(score, 0.0)?;
            }
            counted.push(Counted {
                key: None,
                corpus: 0.0,
                memory: 0.0,
            });
            continue;
        };

        let corpus_frequency = keying.read_alignment(corpus, &key);
        let memory_frequency = keying.read_alignment(memory, &key);

        let source_corpus = keying.read_ngram(&corpus.source_ngrams, prediction.source());
        let target_corpus = keying.read_ngram(&corpus.target_ngrams, prediction.target());
        let source_memory = keying.read_ngram(&memory.source_ngrams, prediction.source());
        let target_memory = keying.read_ngram(&memory.target_ngrams, prediction.target());

        prediction.set_score(keying.source_corpus, divide_safe(corpus_frequency, source_corpus))?;
        prediction.set_score(keying.target_corpus, divide_safe(corpus_frequency, target_corpus))?;
        prediction.set_score(keying.source_memory, divide_safe(memory_frequency, source_memory))?;
        prediction.set_score(keying.target_memory, divide_safe(memory_frequency, target_memory))?;

        counted.push(Counted {
            key: Some(key),
            corpus: corpus_frequency,
            memory: memory_frequency,
        });
    }

    let keyed = || {
        counted
            .iter()
            .filter_map(|c| c.key.as_deref().map(|key| (key, c)))
    };
    let corpus_sums = sum_by_key(keyed().map(|(key, c)| (key, c.corpus)));
    let memory_sums = sum_by_key(keyed().map(|(key, c)| (key, c.memory)));

    for (prediction, counts) in predictions.iter_mut().zip(&counted) {
        let (corpus_filtered, memory_filtered) = match counts.key.as_deref() {
            Some(key) => (
                divide_safe(counts.corpus, corpus_sums.get(key).copied().unwrap_or(0.0)),
                divide_safe(counts.memory, memory_sums.get(key).copied().unwrap_or(0.0)),
            ),
            None => (0.0, 0.0),
        };
        prediction.set_score(keying.corpus_filtered, corpus_filtered)?;
        prediction.set_score(keying.memory_filtered, memory_filtered)?;
    }

    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{prediction, sentence, Fixture};
    use crate::types::Token;

    #[test]
    fn test_corpus_ratios() {
        let source = sentence("hello world");
        let target = sentence("olleh dlrow");

        let mut fixture = Fixture::with_sentence(&source, &target);
        fixture.corpus.add_sentence_pair(&source, &target, 3, 3);
        fixture
            .corpus
            .add_sentence_pair(&sentence("hello"), &sentence("olleh"), 3, 3);

        let batch = vec![prediction(&source, 0..1, &target, 0..1)];
        let scored = NgramFrequency.execute(batch, &fixture.ctx()).unwrap();
        let p = &scored[0];

        // hello->olleh seen twice; "hello" appeared in 4 + 2 permutations, "olleh" in 3 + 1
        assert_eq!(p.score(ScoreKey::SourceCorpusPermutationsFrequencyRatio), Some(2.0 / 6.0));
        assert_eq!(p.score(ScoreKey::TargetCorpusPermutationsFrequencyRatio), Some(2.0 / 4.0));
        assert_eq!(p.score(ScoreKey::FrequencyRatioCorpusFiltered), Some(1.0));
        assert_eq!(p.score(ScoreKey::SourceAlignmentMemoryFrequencyRatio), Some(0.0));
        assert_eq!(p.score(ScoreKey::FrequencyRatioAlignmentMemoryFiltered), Some(0.0));
    }

    #[test]
    fn test_filtered_ratio_splits_duplicate_keys() {
        let source = sentence("the cat the");
        let target = sentence("le");

        let mut fixture = Fixture::with_sentence(&source, &target);
        fixture.corpus.add_sentence_pair(&source, &target, 3, 3);

        let batch = vec![
            prediction(&source, 0..1, &target, 0..1),
            prediction(&source, 2..3, &target, 0..1),
        ];
        let scored = NgramFrequency.execute(batch, &fixture.ctx()).unwrap();

        for p in &scored {
            assert_eq!(p.score(ScoreKey::FrequencyRatioCorpusFiltered), Some(0.5));
        }
    }

    #[test]
    fn test_memory_ratios() {
        let source = sentence("hello");
        let target = sentence("olleh");

        let mut fixture = Fixture::with_sentence(&source, &target);
        let remembered = prediction(&source, 0..1, &target, 0..1);
        fixture.memory.append(&[remembered.alignment().clone()]);

        let scored = NgramFrequency
            .execute(vec![remembered], &fixture.ctx())
            .unwrap();

        assert_eq!(scored[0].score(ScoreKey::SourceAlignmentMemoryFrequencyRatio), Some(1.0));
        assert_eq!(scored[0].score(ScoreKey::TargetAlignmentMemoryFrequencyRatio), Some(1.0));
        assert_eq!(scored[0].score(ScoreKey::FrequencyRatioAlignmentMemoryFiltered), Some(1.0));
    }

    #[test]
    fn test_lemma_ratios_without_lemmas_are_zero() {
        let source = sentence("hello");
        let target = sentence("olleh");
        let fixture = Fixture::with_sentence(&source, &target);

        let batch = vec![prediction(&source, 0..1, &target, 0..1)];
        let scored = LemmaNgramFrequency.execute(batch, &fixture.ctx()).unwrap();
        let p = &scored[0];

        assert_eq!(p.score(ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio), Some(0.0));
        assert_eq!(p.score(ScoreKey::LemmaFrequencyRatioCorpusFiltered), Some(0.0));
        assert!(!p.has_score(ScoreKey::SourceCorpusPermutationsFrequencyRatio));
    }

    #[test]
    fn test_lemma_ratios_match_inflections() {
        let lemma_token = |text: &str, lemma: &str| {
            Ngram::new(vec![Token::new(text, 0, 0, 1, text.len(), 1, 1).with_lemma(lemma)])
        };

        let mut fixture = Fixture::default();
        fixture.corpus.add_sentence_pair(
            lemma_token("ran", "run").tokens(),
            lemma_token("corrió", "correr").tokens(),
            3,
            3,
        );

        let inflected = Prediction::new(Alignment::new(
            lemma_token("runs", "run"),
            lemma_token("corre", "correr"),
        ));
        let scored = LemmaNgramFrequency
            .execute(vec![inflected], &fixture.ctx())
            .unwrap();

        // one permutation pairs "run" with "correr", one with null
        assert_eq!(
            scored[0].score(ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio),
            Some(0.5)
        );
        assert_eq!(
            scored[0].score(ScoreKey::LemmaTargetCorpusPermutationsFrequencyRatio),
            Some(1.0)
        );
    }
}
