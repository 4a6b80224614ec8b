//! JSON-shaped export of tokens, n-grams, alignments, predictions and suggestions
//!
//! Every entity converts to a serde record through [`Export`]. With
//! `verbose = false` the records carry only positional and occurrence
//! metadata; raw text, lemmas and keys derived from them are left out.

use crate::errors::Result;
use crate::prediction::{Prediction, Suggestion};
use crate::types::{Alignment, Ngram, Token};
use serde::Serialize;
use std::collections::BTreeMap;

/// Conversion into a serializable record
pub trait Export {
    /// The serde record
    type Record: Serialize;

    /// Build the record
    fn export(&self, verbose: bool) -> Self::Record;

    /// Build the record as a JSON value
    fn to_json(&self, verbose: bool) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.export(verbose))?)
    }
}

/// Output token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strong: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph: Option<String>,
    pub position: usize,
    pub char_position: usize,
    pub sentence_token_length: usize,
    pub sentence_character_length: usize,
    pub occurrence: usize,
    pub occurrences: usize,
}

/// Output n-gram
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonNgram {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub tokens: Vec<JsonToken>,
    pub occurrence: usize,
    pub occurrences: usize,
}

/// Output alignment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAlignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub source: JsonNgram,
    pub target: JsonNgram,
}

/// Output prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPrediction {
    pub alignment: JsonAlignment,
    pub confidence: f64,
    pub scores: BTreeMap<&'static str, f64>,
}

/// Output suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSuggestion {
    pub compound_confidence: f64,
    pub predictions: Vec<JsonPrediction>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Export for Token {
    type Record = JsonToken;

    fn export(&self, verbose: bool) -> JsonToken {
        JsonToken {
            text: verbose.then(|| self.text.clone()),
            lemma: if verbose { non_empty(&self.lemma) } else { None },
            strong: if verbose { non_empty(&self.strong) } else { None },
            morph: if verbose { non_empty(&self.morph) } else { None },
            position: self.position,
            char_position: self.char_position,
            sentence_token_length: self.sentence_token_length,
            sentence_character_length: self.sentence_character_length,
            occurrence: self.occurrence,
            occurrences: self.occurrences,
        }
    }
}

impl Export for Ngram {
    type Record = JsonNgram;

    fn export(&self, verbose: bool) -> JsonNgram {
        JsonNgram {
            key: verbose.then(|| self.key().to_string()),
            tokens: self.tokens().iter().map(|t| t.export(verbose)).collect(),
            occurrence: self.occurrence,
            occurrences: self.occurrences,
        }
    }
}

impl Export for Alignment {
    type Record = JsonAlignment;

    fn export(&self, verbose: bool) -> JsonAlignment {
        JsonAlignment {
            key: verbose.then(|| self.key().to_string()),
            source: self.source().export(verbose),
            target: self.target().export(verbose),
        }
    }
}

impl Export for Prediction {
    type Record = JsonPrediction;

    fn export(&self, verbose: bool) -> JsonPrediction {
        JsonPrediction {
            alignment: self.alignment().export(verbose),
            confidence: self.confidence(),
            scores: self.scores().map(|(key, value)| (key.as_str(), value)).collect(),
        }
    }
}

impl Export for Suggestion {
    type Record = JsonSuggestion;

    fn export(&self, verbose: bool) -> JsonSuggestion {
        JsonSuggestion {
            compound_confidence: self.compound_confidence(),
            predictions: self.predictions().iter().map(|p| p.export(verbose)).collect(),
        }
    }
}
