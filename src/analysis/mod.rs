//! Text analysis pipeline: tokenization and stop-word filtering.
//!
//! The same analyzer is applied to segment text at index build time and to
//! query text at search time, so both sides of a lookup agree on the token
//! vocabulary.

pub mod stop;
pub mod tokenizer;

pub use stop::{DEFAULT_STOP_WORDS_SET, is_stop_word};
pub use tokenizer::TextAnalyzer;
