//! Greedy assembly of suggestions from confidence-sorted predictions.
//!
//! Each valid prediction in turn seeds one candidate suggestion, which is
//! then filled greedily with the best remaining predictions that intersect
//! nothing already chosen. When a sentence repeats a word, the occurrences
//! of that word must be used in sentence order; [`OccurrenceMode`] controls
//! how hard that is enforced and relaxes step by step so assembly always
//! terminates with output.

use crate::prediction::{Prediction, Suggestion};
use crate::types::Token;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

/// Discarded candidates after which occurrence enforcement is dropped entirely
pub const MAX_DISCARDS: usize = 1000;

/// How occurrence order is enforced during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceMode {
    /// Order enforced while filling, and every repeated word must start
    /// from its first occurrence without gaps
    Strict,
    /// Order enforced while filling only
    Relaxed,
    /// No occurrence constraints
    Unforced,
}

impl OccurrenceMode {
    fn is_forced(self) -> bool {
        self != OccurrenceMode::Unforced
    }

    fn is_strict(self) -> bool {
        self == OccurrenceMode::Strict
    }
}

/// Options for [`suggest`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestOptions {
    /// Number of suggestions to return at most
    pub max_suggestions: usize,
    /// Predictions below this confidence are ignored (null targets never are)
    pub min_confidence: f64,
    /// Whether repeated words must be used in sentence order
    pub force_occurrence_order: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 1,
            min_confidence: 0.0,
            force_occurrence_order: true,
        }
    }
}

impl SuggestOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of suggestions
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    /// Set the confidence floor
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Enable or disable occurrence ordering
    pub fn with_force_occurrence_order(mut self, force: bool) -> Self {
        self.force_occurrence_order = force;
        self
    }
}

// ============================================================================
// Occurrence tracking
// ============================================================================

/// Uses of one repeated word: `(occurrence, position of the aligned n-gram)`
type Uses = Vec<(usize, usize)>;

/// Repeated-word occurrences used by the predictions accepted so far.
#[derive(Debug, Default)]
struct OccurrenceTracker {
    source: FxHashMap<String, Uses>,
    target: FxHashMap<String, Uses>,
}

impl OccurrenceTracker {
    fn clear(&mut self) {
        self.source.clear();
        self.target.clear();
    }

    /// Whether `prediction` uses repeated words in an order consistent with
    /// everything recorded so far
    fn is_valid(&self, prediction: &Prediction) -> bool {
        let source = prediction.source();
        let target = prediction.target();
        if target.is_null() {
            return true;
        }

        side_is_valid(&self.source, source.tokens(), target.token_position())
            && side_is_valid(&self.target, target.tokens(), source.token_position())
    }

    fn record(&mut self, prediction: &Prediction) {
        let source = prediction.source();
        let target = prediction.target();
        if target.is_null() {
            return;
        }

        record_side(&mut self.source, source.tokens(), target.token_position());
        record_side(&mut self.target, target.tokens(), source.token_position());
    }

    /// Every repeated word is used from its first occurrence on, without
    /// skipping any
    fn is_complete(&self) -> bool {
        self.source.values().chain(self.target.values()).all(|uses| {
            let used: FxHashSet<usize> = uses.iter().map(|&(occurrence, _)| occurrence).collect();
            let highest = used.iter().copied().max().unwrap_or(0);
            used.contains(&1) && highest <= used.len()
        })
    }
}

fn side_is_valid(uses: &FxHashMap<String, Uses>, tokens: &[Token], opposite: usize) -> bool {
    tokens
        .iter()
        .filter(|token| token.occurrences > 1)
        .all(|token| {
            uses.get(&token.text.to_lowercase()).map_or(true, |seen| {
                seen.iter().all(|&(occurrence, position)| {
                    if occurrence < token.occurrence {
                        position < opposite
                    } else if occurrence > token.occurrence {
                        position > opposite
                    } else {
                        true
                    }
                })
            })
        })
}

fn record_side(uses: &mut FxHashMap<String, Uses>, tokens: &[Token], opposite: usize) {
    for token in tokens.iter().filter(|token| token.occurrences > 1) {
        uses.entry(token.text.to_lowercase())
            .or_default()
            .push((token.occurrence, opposite));
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Build up to `options.max_suggestions` distinct suggestions.
///
/// `predictions` must already be sorted by descending confidence. The
/// result is sorted by descending compound confidence.
pub fn suggest(predictions: &[Prediction], options: &SuggestOptions) -> Vec<Suggestion> {
    let valid: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| p.confidence() >= options.min_confidence || p.target().is_null())
        .collect();

    let mut mode = if options.force_occurrence_order {
        OccurrenceMode::Strict
    } else {
        OccurrenceMode::Unforced
    };

    let mut suggestions: Vec<Suggestion> = Vec::new();
    let mut signatures: FxHashSet<String> = FxHashSet::default();
    let mut tracker = OccurrenceTracker::default();
    let mut discards = 0;
    let mut seed = 0;

    while suggestions.len() < options.max_suggestions {
        if seed >= valid.len() {
            if suggestions.is_empty() && !valid.is_empty() && mode != OccurrenceMode::Unforced {
                warn!("no suggestion satisfies occurrence order; retrying without it");
                mode = OccurrenceMode::Unforced;
                seed = 0;
                continue;
            }
            break;
        }

        let suggestion = build_suggestion(&valid, seed, mode, &mut tracker);
        seed += 1;

        let accepted = !mode.is_strict() || tracker.is_complete();
        if accepted && signatures.insert(suggestion.signature()) {
            suggestions.push(suggestion);
            continue;
        }

        discards += 1;
        if mode == OccurrenceMode::Strict && discards >= MAX_DISCARDS / 2 {
            warn!(discards, "relaxing strict occurrence order");
            mode = OccurrenceMode::Relaxed;
            seed = 0;
        } else if mode == OccurrenceMode::Relaxed && discards >= MAX_DISCARDS {
            warn!(discards, "disabling forced occurrence order");
            mode = OccurrenceMode::Unforced;
            discards = 0;
            seed = 0;
        }
    }

    sort_suggestions(&mut suggestions);
    suggestions
}

/// Seed a suggestion with `valid[seed]` and fill it greedily
fn build_suggestion(
    valid: &[&Prediction],
    seed: usize,
    mode: OccurrenceMode,
    tracker: &mut OccurrenceTracker,
) -> Suggestion {
    let best = valid[seed];
    let mut excluded: Vec<bool> = valid.iter().map(|p| p.intersects(best)).collect();
    excluded[seed] = true;

    tracker.clear();
    if mode.is_forced() {
        tracker.record(best);
    }

    let mut suggestion = Suggestion::new();
    suggestion.add_prediction(best.clone());

    for index in 0..valid.len() {
        if excluded[index] {
            continue;
        }
        let candidate = valid[index];
        if mode.is_forced() {
            if !tracker.is_valid(candidate) {
                continue;
            }
            tracker.record(candidate);
        }

        suggestion.add_prediction(candidate.clone());
        for (later, flag) in excluded.iter_mut().enumerate().skip(index + 1) {
            if !*flag && valid[later].intersects(candidate) {
                *flag = true;
            }
        }
    }

    suggestion
}

/// Stable sort by descending compound confidence
pub fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| b.compound_confidence().total_cmp(&a.compound_confidence()));
}
