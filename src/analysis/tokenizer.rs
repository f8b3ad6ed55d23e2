//! Tokenizer implementation shared by indexing and query analysis.

use crate::analysis::stop::is_stop_word;

/// Minimum character length for a token to survive analysis.
///
/// Shorter tokens in recognized speech are overwhelmingly noise ("uh", "mg"
/// fragments, stray letters from misrecognition).
pub const MIN_TOKEN_LEN: usize = 3;

/// An analyzer that lowercases, strips punctuation, and drops short tokens
/// and stop words.
///
/// # Examples
///
/// ```
/// use corpsman::analysis::TextAnalyzer;
///
/// let analyzer = TextAnalyzer::new();
/// let tokens = analyzer.analyze("Apply the tourniquet, then reassess.");
///
/// assert_eq!(tokens, vec!["apply", "tourniquet", "then", "reassess"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        TextAnalyzer
    }

    /// Analyze text into index/query tokens.
    ///
    /// Splits on whitespace, lowercases, strips non-alphanumeric characters,
    /// then drops tokens shorter than [`MIN_TOKEN_LEN`] and stop words.
    /// Never fails; unusable input simply yields an empty vec.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|word| {
                let clean: String = word
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(|c| c.to_lowercase())
                    .collect();

                if clean.chars().count() >= MIN_TOKEN_LEN && !is_stop_word(&clean) {
                    Some(clean)
                } else {
                    None
                }
            })
            .collect()
    }
}
