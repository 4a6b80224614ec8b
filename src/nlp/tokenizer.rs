//! Unicode-aware tokenization
//!
//! This module provides UAX #29 word segmentation producing sentence-annotated
//! [`Token`]s: position, character position, sentence lengths, and the
//! occurrence rank of each token among identical tokens in its sentence.
//!
//! The alignment core only consumes tokens; callers with their own lexer
//! (lemmatized Greek/Hebrew sources, for instance) can build tokens directly
//! or through [`Tokenizer::from_lemmatized`].

use crate::types::Token;
use rustc_hash::FxHashMap;
use unicode_segmentation::UnicodeSegmentation;

/// A Unicode-aware tokenizer following UAX #29
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Minimum token length (in characters) to keep
    min_token_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

struct Word {
    text: String,
    char_position: usize,
    lemma: Option<String>,
}

impl Tokenizer {
    /// Create a new tokenizer with default settings
    pub fn new() -> Self {
        Self {
            min_token_length: 1,
        }
    }

    /// Set minimum token length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    /// Tokenize one sentence of text.
    ///
    /// Pure punctuation and symbols are dropped; character positions index
    /// into `text` in characters, not bytes.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut words = Vec::new();
        let mut chars_seen = 0;
        let mut bytes_seen = 0;

        for (byte_start, word) in text.unicode_word_indices() {
            chars_seen += text[bytes_seen..byte_start].chars().count();
            bytes_seen = byte_start;

            // Skip tokens that are too short
            if word.chars().count() < self.min_token_length {
                continue;
            }

            // Skip pure punctuation/symbols
            if !word.chars().any(|c| c.is_alphanumeric()) {
                continue;
            }

            words.push(Word {
                text: word.to_string(),
                char_position: chars_seen,
                lemma: None,
            });
        }

        build_sentence(words)
    }

    /// Build a sentence from pre-split words, laid out as if joined by single spaces
    pub fn from_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<Token> {
        build_sentence(layout(words.iter().map(|w| (w.as_ref(), None))))
    }

    /// Build a sentence from `(text, lemma)` pairs; empty lemmas mean "absent"
    pub fn from_lemmatized<S: AsRef<str>>(&self, words: &[(S, S)]) -> Vec<Token> {
        build_sentence(layout(
            words
                .iter()
                .map(|(text, lemma)| (text.as_ref(), Some(lemma.as_ref()))),
        ))
    }
}

fn layout<'a>(words: impl Iterator<Item = (&'a str, Option<&'a str>)>) -> Vec<Word> {
    let mut position = 0;
    words
        .map(|(text, lemma)| {
            let word = Word {
                text: text.to_string(),
                char_position: position,
                lemma: lemma.filter(|l| !l.is_empty()).map(str::to_string),
            };
            position += text.chars().count() + 1;
            word
        })
        .collect()
}

/// Attach sentence lengths and occurrence ranks to a word sequence.
///
/// Occurrences are counted case-insensitively, matching n-gram keys.
fn build_sentence(words: Vec<Word>) -> Vec<Token> {
    let sentence_token_length = words.len();
    let sentence_character_length = words.iter().map(|w| w.text.chars().count()).sum();

    let folded: Vec<String> = words.iter().map(|w| w.text.to_lowercase()).collect();
    let mut totals: FxHashMap<&str, usize> = FxHashMap::default();
    for text in &folded {
        *totals.entry(text.as_str()).or_insert(0) += 1;
    }

    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    let mut tokens = Vec::with_capacity(words.len());
    for (position, (word, text)) in words.iter().zip(&folded).enumerate() {
        let occurrence = seen.entry(text.as_str()).or_insert(0);
        *occurrence += 1;

        let mut token = Token::new(
            word.text.as_str(),
            position,
            word.char_position,
            sentence_token_length,
            sentence_character_length,
            *occurrence,
            totals[text.as_str()],
        );
        if let Some(lemma) = &word.lemma {
            token = token.with_lemma(lemma.as_str());
        }
        tokens.push(token);
    }

    tokens
}
