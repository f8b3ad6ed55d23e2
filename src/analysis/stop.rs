//! Stop-word list used by the text analyzer.
//!
//! Common English words that carry no retrieval signal in guideline text.
//! The list is fixed configuration: it participates in index builds, so
//! changing it requires a full rebuild to keep query analysis and the
//! posting dictionary consistent.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

/// Default stop words as a HashSet.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_STOP_WORDS.iter().copied().collect());

/// Check if a word is in the default stop-word set.
pub fn is_stop_word(word: &str) -> bool {
    DEFAULT_STOP_WORDS_SET.contains(word)
}
