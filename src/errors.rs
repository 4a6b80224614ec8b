//! Error types for wordmap
//!
//! Configuration and shape errors surface before any shared index is
//! mutated. Score-map misuse indicates a mis-ordered algorithm registration
//! and is never swallowed.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordMapError>;

/// Main error type for wordmap
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordMapError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Source and target corpora have a different number of sentences
    #[error("Corpus mismatch: {source_len} source sentences but {target_len} target sentences")]
    CorpusMismatch { source_len: usize, target_len: usize },

    /// A score was written twice on the same prediction
    #[error("Score \"{key}\" has already been set")]
    ScoreAlreadySet { key: &'static str },

    /// A score was read before any algorithm wrote it
    #[error("Score \"{key}\" has not been set")]
    ScoreMissing { key: &'static str },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl WordMapError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a corpus mismatch error
    pub fn corpus_mismatch(source_len: usize, target_len: usize) -> Self {
        Self::CorpusMismatch {
            source_len,
            target_len,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error points at a pipeline-ordering bug rather than bad input
    pub fn is_score_misuse(&self) -> bool {
        matches!(
            self,
            Self::ScoreAlreadySet { .. } | Self::ScoreMissing { .. }
        )
    }
}

impl From<serde_json::Error> for WordMapError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
