//! Segment: the unit of indexed corpus text.

use serde::{Deserialize, Serialize};

/// A unit of indexed guideline text with its source metadata.
///
/// Segments are immutable after ingestion. The `id` is unique within a
/// [`CorpusStore`](crate::corpus::CorpusStore) and stable for the lifetime
/// of that store; a corpus rebuild assigns fresh ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Stable identifier, assigned sequentially at ingestion.
    pub id: u64,

    /// Document identifier (filename or title).
    pub source: String,

    /// Logical heading/category (e.g. "airway", "medication"), may be empty.
    pub section: String,

    /// Normalized plain-text span, whitespace-collapsed and non-empty.
    pub text: String,

    /// Originating page number, informational only.
    pub page: u32,
}

impl Segment {
    /// Truncate the segment text to at most the first two sentences.
    ///
    /// Splits on periods, keeps the first two non-empty sentences, and
    /// re-appends the trailing period. Used when a passage is spoken aloud
    /// rather than displayed.
    pub fn leading_sentences(&self) -> String {
        let sentences: Vec<&str> = self
            .text
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(2)
            .collect();

        if sentences.is_empty() {
            self.text.clone()
        } else {
            format!("{}.", sentences.join(". "))
        }
    }
}
