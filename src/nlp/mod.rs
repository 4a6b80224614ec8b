//! Text processing helpers that feed the alignment core.

pub mod tokenizer;
