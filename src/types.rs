//! Core types for wordmap
//!
//! This module defines the fundamental data structures used throughout the library:
//! tokens as produced by a tokenizer, n-grams built from them, alignments
//! pairing a source n-gram with a target n-gram, and configuration.

use crate::errors::{Result, WordMapError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Token
// ============================================================================

/// A token from a sentence, annotated with its place in that sentence.
///
/// Tokens are produced outside the alignment core (see
/// [`Tokenizer`](crate::nlp::tokenizer::Tokenizer) for a convenience
/// implementation) and are never mutated by it. Two tokens are equal when they
/// have the same text at the same position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// The surface form
    pub text: String,
    /// 0-based token index within the sentence
    pub position: usize,
    /// 0-based character index within the sentence
    pub char_position: usize,
    /// Number of tokens in the sentence
    pub sentence_token_length: usize,
    /// Number of characters in the sentence
    pub sentence_character_length: usize,
    /// 1-based rank of this token among identical tokens in the sentence
    pub occurrence: usize,
    /// Total number of identical tokens in the sentence
    pub occurrences: usize,
    /// Lemma, empty when absent
    #[serde(default)]
    pub lemma: String,
    /// Strong's number, empty when absent
    #[serde(default)]
    pub strong: String,
    /// Morphology code, empty when absent
    #[serde(default)]
    pub morph: String,
}

impl Token {
    /// Create a new token without lemma/morphology annotations
    pub fn new(
        text: impl Into<String>,
        position: usize,
        char_position: usize,
        sentence_token_length: usize,
        sentence_character_length: usize,
        occurrence: usize,
        occurrences: usize,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            char_position,
            sentence_token_length,
            sentence_character_length,
            occurrence,
            occurrences,
            lemma: String::new(),
            strong: String::new(),
            morph: String::new(),
        }
    }

    /// Builder method: set the lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Builder method: set the Strong's number
    pub fn with_strong(mut self, strong: impl Into<String>) -> Self {
        self.strong = strong.into();
        self
    }

    /// Builder method: set the morphology code
    pub fn with_morph(mut self, morph: impl Into<String>) -> Self {
        self.morph = morph.into();
        self
    }

    /// Whether the token carries a lemma
    #[inline]
    pub fn has_lemma(&self) -> bool {
        !self.lemma.is_empty()
    }

    /// Length of the token text in characters
    #[inline]
    pub fn char_length(&self) -> usize {
        self.text.chars().count()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.position.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// Ngram
// ============================================================================

/// Prefix shared by every n-gram key
pub const NGRAM_KEY_PREFIX: &str = "n:";

/// An ordered run of tokens treated as a single alignment unit.
///
/// The empty n-gram is the *null n-gram*: "aligned to nothing". Keys are
/// derived once at construction and never change.
#[derive(Debug, Clone)]
pub struct Ngram {
    tokens: Vec<Token>,
    key: String,
    lemma_key: Option<String>,
    /// 1-based rank among n-grams with the same key in the generating sentence
    pub occurrence: usize,
    /// Number of n-grams with the same key in the generating sentence
    pub occurrences: usize,
}

impl Ngram {
    /// Create an n-gram from a token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        let key = build_key(tokens.iter().map(|t| t.text.as_str()));
        let lemma_key = if !tokens.is_empty() && tokens.iter().all(Token::has_lemma) {
            Some(build_key(tokens.iter().map(|t| t.lemma.as_str())))
        } else {
            None
        };

        Self {
            tokens,
            key,
            lemma_key,
            occurrence: 1,
            occurrences: 1,
        }
    }

    /// The null n-gram
    pub fn null() -> Self {
        Self::new(Vec::new())
    }

    /// The tokens in this n-gram
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Surface key, e.g. `"n:hello:world"`
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lemma key, present only when every token has a lemma
    pub fn lemma_key(&self) -> Option<&str> {
        self.lemma_key.as_deref()
    }

    /// The lemma key, falling back to the surface key
    pub fn lemma_key_or_key(&self) -> &str {
        self.lemma_key.as_deref().unwrap_or(&self.key)
    }

    /// Whether this is the null n-gram
    #[inline]
    pub fn is_null(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens
    #[inline]
    pub fn token_length(&self) -> usize {
        self.tokens.len()
    }

    /// Sum of token text lengths in characters (separators not counted)
    pub fn character_length(&self) -> usize {
        self.tokens.iter().map(Token::char_length).sum()
    }

    /// Token position of the first token, or 0
    pub fn token_position(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.position)
    }

    /// Character position of the first token, or 0
    pub fn character_position(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.char_position)
    }

    /// Token length of the sentence this n-gram came from, or 0
    pub fn sentence_token_length(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.sentence_token_length)
    }

    /// Character length of the sentence this n-gram came from, or 0
    pub fn sentence_character_length(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.sentence_character_length)
    }

    /// Identical tokens at identical positions
    pub fn equals(&self, other: &Ngram) -> bool {
        self.tokens == other.tokens
    }

    /// Identical token text and lemma, regardless of position
    pub fn looks_like(&self, other: &Ngram) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| a.text == b.text && a.lemma == b.lemma)
    }
}

impl Default for Ngram {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

fn build_key<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut key = String::from(NGRAM_KEY_PREFIX);
    for (i, part) in parts.enumerate() {
        if i > 0 {
            key.push(':');
        }
        key.push_str(part);
    }
    key.to_lowercase()
}

// ============================================================================
// Alignment
// ============================================================================

/// A source n-gram paired with a target n-gram (which may be null).
///
/// N-grams are shared behind `Arc` so that the cross product of a sentence
/// pair does not copy token data.
#[derive(Debug, Clone)]
pub struct Alignment {
    source: Arc<Ngram>,
    target: Arc<Ngram>,
    key: String,
    lemma_key: Option<String>,
}

impl Alignment {
    /// Create an alignment between two n-grams
    pub fn new(source: impl Into<Arc<Ngram>>, target: impl Into<Arc<Ngram>>) -> Self {
        let source = source.into();
        let target = target.into();
        let key = format!("{}->{}", source.key(), target.key());
        let lemma_key = match (source.lemma_key(), target.lemma_key()) {
            (Some(source_lemma), Some(target_lemma)) => {
                Some(format!("{}->{}", source_lemma, target_lemma))
            }
            _ => None,
        };

        Self {
            source,
            target,
            key,
            lemma_key,
        }
    }

    /// The source n-gram
    pub fn source(&self) -> &Ngram {
        &self.source
    }

    /// The target n-gram
    pub fn target(&self) -> &Ngram {
        &self.target
    }

    /// Shared handle to the source n-gram
    pub fn source_shared(&self) -> &Arc<Ngram> {
        &self.source
    }

    /// Shared handle to the target n-gram
    pub fn target_shared(&self) -> &Arc<Ngram> {
        &self.target
    }

    /// Composite key, e.g. `"n:hello->n:olleh"`
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lemma-based key, present only when both sides have a lemma key
    pub fn lemma_key(&self) -> Option<&str> {
        self.lemma_key.as_deref()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a [`WordMap`](crate::wordmap::WordMap)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordMapConfig {
    /// Longest source n-gram generated
    pub max_source_ngram_length: usize,
    /// Longest target n-gram generated
    pub max_target_ngram_length: usize,
    /// Enforce occurrence ordering while assembling suggestions
    pub force_occurrence_order: bool,
    /// Emit warnings for alignment memory that exceeds the n-gram limits
    #[serde(default = "default_warnings")]
    pub warnings: bool,
    /// Default number of suggestions returned by `predict_default`
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Default confidence cutoff used by `predict_default`
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_warnings() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    1
}

fn default_min_confidence() -> f64 {
    0.1
}

impl Default for WordMapConfig {
    fn default() -> Self {
        Self {
            max_source_ngram_length: 3,
            max_target_ngram_length: 3,
            force_occurrence_order: true,
            warnings: default_warnings(),
            max_suggestions: default_max_suggestions(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl WordMapConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_source_ngram_length == 0 {
            return Err(WordMapError::invalid_config(
                "max_source_ngram_length must be > 0",
            ));
        }

        if self.max_target_ngram_length == 0 {
            return Err(WordMapError::invalid_config(
                "max_target_ngram_length must be > 0",
            ));
        }

        Self::validate_min_confidence(self.min_confidence)
    }

    /// Reject a negative or NaN confidence floor
    pub fn validate_min_confidence(min_confidence: f64) -> Result<()> {
        if min_confidence.is_nan() || min_confidence < 0.0 {
            return Err(WordMapError::invalid_config(format!(
                "min_confidence must be >= 0, got {}",
                min_confidence
            )));
        }
        Ok(())
    }

    /// Builder method: set max source n-gram length
    pub fn with_max_source_ngram_length(mut self, length: usize) -> Self {
        self.max_source_ngram_length = length;
        self
    }

    /// Builder method: set max target n-gram length
    pub fn with_max_target_ngram_length(mut self, length: usize) -> Self {
        self.max_target_ngram_length = length;
        self
    }

    /// Builder method: toggle occurrence-order enforcement
    pub fn with_force_occurrence_order(mut self, force: bool) -> Self {
        self.force_occurrence_order = force;
        self
    }

    /// Builder method: toggle warnings
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Builder method: set default suggestion count
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    /// Builder method: set default confidence cutoff
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}
