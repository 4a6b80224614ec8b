//! Integration tests for wordmap

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ::wordmap::*;

/// Greek/English sentence pairs used as a small training corpus
const GREEK_CORPUS: &[(&str, &str)] = &[
    ("ὁ Θεὸς", "the God"),
    ("ὁ λόγος", "the word"),
    ("καὶ ὁ λόγος ἦν πρὸς τὸν Θεόν", "and the word was with God"),
    ("Θεὸς ἦν ὁ λόγος", "the word was God"),
    ("ἐν ἀρχῇ ἦν ὁ λόγος", "in the beginning was the word"),
];

fn greek_map() -> WordMap {
    let mut map = WordMap::default();
    let (source, target): (Vec<&str>, Vec<&str>) = GREEK_CORPUS.iter().copied().unzip();
    map.append_corpus_text(&source, &target).unwrap();
    map
}

fn keys(suggestion: &Suggestion) -> Vec<&str> {
    suggestion.predictions().iter().map(Prediction::key).collect()
}

/// Repeated target words must be used in the order of the source words they align to
fn assert_occurrence_order(suggestion: &Suggestion) {
    let mut uses: Vec<(usize, &Token)> = Vec::new();
    for prediction in suggestion.predictions() {
        if prediction.target().is_null() {
            continue;
        }
        let position = prediction.source().token_position();
        for token in prediction.target().tokens() {
            if token.occurrences > 1 {
                uses.push((position, token));
            }
        }
    }

    for (a_position, a) in &uses {
        for (b_position, b) in &uses {
            if a.text.to_lowercase() == b.text.to_lowercase() && a_position < b_position {
                assert!(
                    a.occurrence < b.occurrence,
                    "{} occurrence {} used after occurrence {}",
                    a.text,
                    a.occurrence,
                    b.occurrence
                );
            }
        }
    }
}

#[test]
fn test_prediction_without_corpus() {
    let map = WordMap::default();
    let suggestions = map.predict_text("hello", "olleh dlrow", 1, 0.1).unwrap();

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].len(), 1);
    assert_eq!(keys(&suggestions[0]), vec!["n:hello->n:olleh:dlrow"]);
}

#[test]
fn test_suggestions_cover_source_without_overlap() {
    let map = greek_map();
    let suggestions = map
        .predict_text("ὁ λόγος ἦν πρὸς τὸν Θεόν", "the word was with God", 3, 0.0)
        .unwrap();

    assert!(!suggestions.is_empty());
    for suggestion in &suggestions {
        let predictions = suggestion.predictions();
        for (i, a) in predictions.iter().enumerate() {
            for b in &predictions[i + 1..] {
                assert!(!a.intersects(b), "{} overlaps {}", a, b);
            }
        }

        let covered: usize = predictions.iter().map(|p| p.source().token_length()).sum();
        assert_eq!(covered, 6);
    }

    let compound: Vec<f64> = suggestions.iter().map(Suggestion::compound_confidence).collect();
    assert!(compound.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_confidence_never_nan() {
    let mut map = WordMap::default();

    let tokenizer = Tokenizer::new();
    let source = tokenizer.from_lemmatized(&[
        ("וַיְהִי", "היה"),
        ("כַּאֲשֶׁר", "כאשר"),
        ("שָׁמַע", "שמע"),
        ("גִּדְעוֹן", ""),
        ("כַּאֲשֶׁר", "כאשר"),
    ]);
    let target = tokenizer.tokenize("and it came to pass when Gideon heard that");
    map.append_corpus(&[source.clone()], &[target.clone()]).unwrap();
    map.append_alignment_memory(&[Alignment::new(
        Ngram::new(source[1..2].to_vec()),
        Ngram::new(target[5..6].to_vec()),
    )]);

    let suggestions = map.predict(&source, &target, 5, 0.0).unwrap();
    assert!(!suggestions.is_empty());

    for suggestion in &suggestions {
        assert!(suggestion.compound_confidence().is_finite());
        for prediction in suggestion.predictions() {
            for (key, value) in prediction.scores() {
                assert!(value.is_finite(), "{} is {} on {}", key, value, prediction);
            }
        }
    }
}

#[test]
fn test_lemma_scores_need_lemmas_on_both_sides() {
    let tokenizer = Tokenizer::new();
    let source = tokenizer.from_lemmatized(&[("λόγον", "λόγος")]);
    let plain = tokenizer.tokenize("word");
    let lemmatized = tokenizer.from_lemmatized(&[("words", "word")]);

    let mut map = WordMap::default();
    map.append_corpus(&[source.clone()], &[plain.clone()]).unwrap();

    let predictions = map.engine().run(&source, &plain).unwrap();
    let aligned = predictions
        .iter()
        .find(|p| !p.target().is_null())
        .unwrap();
    assert_eq!(aligned.alignment().lemma_key(), None);
    assert_eq!(aligned.score(ScoreKey::LemmaPhrasePlausibility), Some(0.0));
    assert_eq!(aligned.score(ScoreKey::LemmaUniqueness), Some(0.0));
    assert_eq!(
        aligned.score(ScoreKey::LemmaSourceCorpusPermutationsFrequencyRatio),
        Some(0.0)
    );

    let predictions = map.engine().run(&source, &lemmatized).unwrap();
    let aligned = predictions
        .iter()
        .find(|p| !p.target().is_null())
        .unwrap();
    assert_eq!(aligned.alignment().lemma_key(), Some("n:λόγος->n:word"));
}

#[test]
fn test_predict_rejects_nan_min_confidence() {
    let map = WordMap::default();
    let err = map.predict_text("hello", "olleh", 1, f64::NAN).unwrap_err();

    assert!(matches!(err, WordMapError::InvalidConfig { .. }));
}

#[test]
fn test_occurrence_order_greek() {
    let map = greek_map();
    let suggestions = map
        .predict_text("ὁ Θεὸς καὶ ὁ λόγος", "the God and the word", 3, 0.0)
        .unwrap();

    assert!(!suggestions.is_empty());
    for suggestion in &suggestions {
        assert_occurrence_order(suggestion);
    }
}

#[test]
fn test_occurrence_order_hebrew() {
    let mut map = WordMap::default();
    map.append_corpus_text(&["כַּאֲשֶׁר", "שָׁמַע"], &["that", "heard"])
        .unwrap();

    let suggestions = map
        .predict_text("כַּאֲשֶׁר שָׁמַע כַּאֲשֶׁר", "that heard that", 1, 0.0)
        .unwrap();

    assert_eq!(suggestions.len(), 1);
    assert_occurrence_order(&suggestions[0]);

    let positions: Vec<(usize, usize)> = suggestions[0]
        .predictions()
        .iter()
        .filter(|p| !p.target().is_null())
        .map(|p| (p.source().token_position(), p.target().token_position()))
        .collect();
    assert_eq!(positions, vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn test_alignment_memory_boost() {
    let mut map = greek_map();
    map.append_alignment_memory_text("λόγος", "word");

    let tokenizer = Tokenizer::new();
    let source = tokenizer.tokenize("ὁ λόγος");
    let target = tokenizer.tokenize("the word");
    let suggestions = map.predict(&source, &target, 1, 0.1).unwrap();

    let remembered = suggestions[0]
        .predictions()
        .iter()
        .find(|p| p.key() == "n:λόγος->n:word")
        .expect("remembered alignment is suggested");
    assert!(remembered.confidence() > 1.0);

    map.clear_alignment_memory();
    let suggestions = map.predict(&source, &target, 1, 0.1).unwrap();
    assert!(suggestions[0].predictions().iter().all(|p| p.confidence() <= 1.0));
}

#[test]
fn test_predict_with_benchmark() {
    let map = greek_map();
    let tokenizer = Tokenizer::new();
    let source = tokenizer.tokenize("ὁ λόγος");
    let target = tokenizer.tokenize("the word");

    let benchmark = vec![
        Alignment::new(
            Ngram::new(source[..1].to_vec()),
            Ngram::new(target[1..].to_vec()),
        ),
        Alignment::new(Ngram::new(source[1..].to_vec()), Ngram::null()),
    ];
    let suggestions = map
        .predict_with_benchmark(&source, &target, &benchmark, 1)
        .unwrap();

    assert_eq!(keys(&suggestions[0]), vec!["n:ὁ->n:word", "n:λόγος->n:"]);
}

#[test]
fn test_corpus_mismatch() {
    let mut map = WordMap::default();
    let err = map
        .append_corpus_text(&["ὁ Θεὸς", "ὁ λόγος"], &["the God"])
        .unwrap_err();

    assert_eq!(err, WordMapError::corpus_mismatch(2, 1));
    assert!(map.engine().corpus_index().is_empty());
}

#[test]
fn test_config_from_json() {
    let config: WordMapConfig =
        serde_json::from_str(
            r#"{"max_source_ngram_length": 1, "max_target_ngram_length": 2, "force_occurrence_order": true}"#,
        )
        .unwrap();
    assert!(config.warnings);
    assert_eq!(config.max_suggestions, 1);

    let map = WordMap::new(config).unwrap();
    let tokenizer = Tokenizer::new();
    let predictions = map
        .engine()
        .run(&tokenizer.tokenize("a b"), &tokenizer.tokenize("x y"))
        .unwrap();
    // 2 source unigrams × (3 target n-grams + null)
    assert_eq!(predictions.len(), 8);

    let negative = serde_json::from_str::<WordMapConfig>(
        r#"{"max_source_ngram_length": -1, "max_target_ngram_length": 3, "force_occurrence_order": true}"#,
    );
    assert!(negative.is_err());
}

#[test]
fn test_predict_default_uses_config() {
    let config = WordMapConfig::default().with_max_suggestions(2);
    let map = WordMap::new(config).unwrap();
    let tokenizer = Tokenizer::new();

    let suggestions = map
        .predict_default(&tokenizer.tokenize("hello world"), &tokenizer.tokenize("olleh dlrow"))
        .unwrap();
    assert_eq!(suggestions.len(), 2);
}

#[test]
fn test_registered_algorithm_runs_on_every_prediction() {
    struct Counter(Arc<AtomicUsize>);

    impl Algorithm for Counter {
        fn name(&self) -> &'static str {
            "Counter"
        }

        fn execute(&self, prediction: &mut Prediction, _ctx: &ScoringContext<'_>) -> Result<()> {
            assert!(prediction.has_score(ScoreKey::Uniqueness));
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let mut map = WordMap::default();
    map.register_algorithm(Box::new(Counter(Arc::clone(&calls))));

    map.predict_text("a b", "x", 1, 0.0).unwrap();
    // 3 source n-grams × (1 target n-gram + null)
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[test]
fn test_export_suggestions() {
    let map = WordMap::default();
    let suggestions = map.predict_text("hello", "olleh dlrow", 1, 0.1).unwrap();

    let verbose = suggestions[0].to_json(true).unwrap();
    assert_eq!(
        verbose["predictions"][0]["alignment"]["key"],
        serde_json::json!("n:hello->n:olleh:dlrow")
    );
    assert!(verbose["predictions"][0]["scores"]["confidence"].is_number());

    let terse = suggestions[0].to_json(false).unwrap();
    assert!(terse["predictions"][0]["alignment"].get("key").is_none());
    assert!(terse.to_string().find("hello").is_none());
}
