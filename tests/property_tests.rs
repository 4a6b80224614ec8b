//! Property-based tests using proptest

use proptest::prelude::*;
use ::wordmap::*;

const SOURCE_WORDS: &[&str] = &["ὁ", "λόγος", "Θεὸς", "ἦν", "καὶ", "πρὸς"];
const TARGET_WORDS: &[&str] = &["the", "The", "word", "God", "was", "and", "with"];

fn sentence(words: &'static [&'static str], max_len: usize) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(words), 1..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_ngram_count(
        words in sentence(SOURCE_WORDS, 8),
        max_length in 1usize..5
    ) {
        let tokens = Tokenizer::new().from_words(&words);
        let ngrams = Parser::ngrams(&tokens, max_length);

        let n = words.len();
        let expected: usize = (1..=max_length.min(n)).map(|k| n - k + 1).sum();
        prop_assert_eq!(ngrams.len(), expected);
        prop_assert!(ngrams.iter().all(|g| g.token_length() <= max_length));
    }

    #[test]
    fn test_occurrences_are_ranked(words in sentence(TARGET_WORDS, 8)) {
        let tokens = Tokenizer::new().from_words(&words);

        let same = |a: &Token, b: &Token| a.text.to_lowercase() == b.text.to_lowercase();
        for (i, token) in tokens.iter().enumerate() {
            let earlier = tokens[..i].iter().filter(|t| same(t, token)).count();
            let total = tokens.iter().filter(|t| same(t, token)).count();
            prop_assert_eq!(token.occurrence, earlier + 1);
            prop_assert_eq!(token.occurrences, total);
            prop_assert_eq!(token.position, i);
        }
    }

    #[test]
    fn test_predictions_sorted_and_bounded(
        source in sentence(SOURCE_WORDS, 5),
        target in sentence(TARGET_WORDS, 5)
    ) {
        let map = WordMap::default();
        let tokenizer = Tokenizer::new();
        let engine = map.engine();

        let predictions = engine
            .score(engine.run(&tokenizer.from_words(&source), &tokenizer.from_words(&target)).unwrap())
            .unwrap();

        for pair in predictions.windows(2) {
            prop_assert!(pair[0].confidence() >= pair[1].confidence());
        }
        for prediction in &predictions {
            let confidence = prediction.confidence();
            prop_assert!(confidence.is_finite(), "{} has confidence {}", prediction, confidence);
            // Without alignment memory no boost applies
            prop_assert!((0.0..=1.0 + 1e-9).contains(&confidence));
        }
    }

    #[test]
    fn test_suggestions_partition_source(
        source in sentence(SOURCE_WORDS, 5),
        target in sentence(TARGET_WORDS, 5),
        max_suggestions in 1usize..4
    ) {
        let mut map = WordMap::default();
        map.append_corpus_text(&["ὁ λόγος", "ὁ Θεὸς"], &["the word", "the God"]).unwrap();
        let tokenizer = Tokenizer::new();

        let suggestions = map
            .predict(
                &tokenizer.from_words(&source),
                &tokenizer.from_words(&target),
                max_suggestions,
                0.1,
            )
            .unwrap();

        prop_assert!(!suggestions.is_empty());
        prop_assert!(suggestions.len() <= max_suggestions);

        for suggestion in &suggestions {
            let predictions = suggestion.predictions();
            for (i, a) in predictions.iter().enumerate() {
                for b in &predictions[i + 1..] {
                    prop_assert!(!a.intersects(b), "{} overlaps {}", a, b);
                }
            }

            let covered: usize = predictions.iter().map(|p| p.source().token_length()).sum();
            prop_assert_eq!(covered, source.len());
            prop_assert!(suggestion.compound_confidence().is_finite());
        }

        for pair in suggestions.windows(2) {
            prop_assert!(pair[0].compound_confidence() >= pair[1].compound_confidence());
        }
    }

    #[test]
    fn test_config_validation(
        source_length in 0usize..5,
        target_length in 0usize..5,
        min_confidence in -1.0f64..2.0
    ) {
        let config = WordMapConfig::default()
            .with_max_source_ngram_length(source_length)
            .with_max_target_ngram_length(target_length)
            .with_min_confidence(min_confidence);

        let valid = source_length > 0 && target_length > 0 && min_confidence >= 0.0;
        prop_assert_eq!(WordMap::new(config).is_ok(), valid);
    }
}
