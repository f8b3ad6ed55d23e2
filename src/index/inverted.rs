//! Inverted index build and ranked search.

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::TextAnalyzer;
use crate::corpus::CorpusStore;
use crate::index::scorer::Bm25Scorer;

/// A scored search result referencing a segment by id.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Id of the matched segment.
    pub segment_id: u64,
    /// BM25 score; always positive (zero-score entries are excluded).
    pub score: f64,
}

/// Per-term posting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PostingList {
    /// Number of segments containing the term.
    doc_freq: u64,
    /// (segment position, term frequency) pairs, in segment order.
    postings: Vec<(u32, u32)>,
}

/// A read-only BM25 index over a fixed set of segments.
///
/// Built deterministically from the corpus store: identical store contents
/// always produce identical search rankings, including tie order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// Term dictionary: token → posting list.
    terms: AHashMap<String, PostingList>,
    /// Segment ids, positionally aligned with `doc_lens`.
    segment_ids: Vec<u64>,
    /// Per-segment token counts after analysis.
    doc_lens: Vec<u32>,
    /// Average segment length in tokens.
    avg_doc_len: f64,
}

impl InvertedIndex {
    /// Build an index over all segments of a corpus store.
    ///
    /// Pure function of the store contents and the analyzer; building twice
    /// from the same store yields identical ranking behavior.
    pub fn build(store: &CorpusStore, analyzer: &TextAnalyzer) -> InvertedIndex {
        let mut terms: AHashMap<String, PostingList> = AHashMap::new();
        let mut segment_ids = Vec::with_capacity(store.len());
        let mut doc_lens = Vec::with_capacity(store.len());

        for (pos, segment) in store.segments().iter().enumerate() {
            let tokens = analyzer.analyze(&segment.text);
            segment_ids.push(segment.id);
            doc_lens.push(tokens.len() as u32);

            let mut freqs: AHashMap<&str, u32> = AHashMap::new();
            for token in &tokens {
                *freqs.entry(token.as_str()).or_insert(0) += 1;
            }

            for (token, freq) in freqs {
                let entry = terms.entry(token.to_string()).or_insert(PostingList {
                    doc_freq: 0,
                    postings: Vec::new(),
                });
                entry.doc_freq += 1;
                entry.postings.push((pos as u32, freq));
            }
        }

        // Each term gets one posting per segment, appended in segment scan
        // order; sort anyway to pin the canonical layout.
        for posting_list in terms.values_mut() {
            posting_list.postings.sort_unstable_by_key(|&(pos, _)| pos);
        }

        let total_len: u64 = doc_lens.iter().map(|&l| l as u64).sum();
        let avg_doc_len = if doc_lens.is_empty() {
            0.0
        } else {
            total_len as f64 / doc_lens.len() as f64
        };

        info!(
            "built index: {} terms over {} segments (avg len {:.1})",
            terms.len(),
            segment_ids.len(),
            avg_doc_len
        );

        InvertedIndex {
            terms,
            segment_ids,
            doc_lens,
            avg_doc_len,
        }
    }

    /// Search the index with pre-analyzed query tokens.
    ///
    /// Returns up to `top_n` hits ordered by score descending, ties broken
    /// by ascending segment id. Tokens absent from the dictionary contribute
    /// nothing; a query with no known tokens returns an empty vec.
    pub fn search(&self, query_tokens: &[String], top_n: usize) -> Vec<SearchHit> {
        if query_tokens.is_empty() || self.segment_ids.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let scorer = Bm25Scorer::new(self.segment_ids.len() as u64, self.avg_doc_len);
        let mut scores: AHashMap<u32, f64> = AHashMap::new();

        for token in query_tokens {
            let Some(posting_list) = self.terms.get(token.as_str()) else {
                continue;
            };

            for &(pos, term_freq) in &posting_list.postings {
                let doc_len = self.doc_lens[pos as usize];
                let contribution = scorer.score(posting_list.doc_freq, term_freq, doc_len);
                *scores.entry(pos).or_insert(0.0) += contribution;
            }
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter(|&(_, score)| score > 0.0)
            .map(|(pos, score)| SearchHit {
                segment_id: self.segment_ids[pos as usize],
                score,
            })
            .collect();

        // Deterministic order: score descending, then segment id ascending.
        hits.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.segment_id.cmp(&b.segment_id))
        });
        hits.truncate(top_n);
        hits
    }

    /// Number of unique terms in the dictionary.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of indexed segments.
    pub fn segment_count(&self) -> usize {
        self.segment_ids.len()
    }
}
