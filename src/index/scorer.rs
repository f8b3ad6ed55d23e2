//! BM25 scoring for ranking search results.

/// Default BM25 k1 parameter (term-frequency saturation).
pub const DEFAULT_K1: f64 = 1.5;

/// Default BM25 b parameter (document-length normalization).
pub const DEFAULT_B: f64 = 0.75;

/// BM25 scorer over a fixed corpus's global statistics.
///
/// One scorer instance serves a whole index: per-term statistics (document
/// frequency) and per-segment statistics (term frequency, length) are passed
/// in at scoring time.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    /// Total number of segments in the index.
    total_docs: u64,
    /// Average segment length in tokens.
    avg_doc_len: f64,
    /// BM25 k1 parameter.
    k1: f64,
    /// BM25 b parameter.
    b: f64,
}

impl Bm25Scorer {
    /// Create a scorer with the default parameters.
    pub fn new(total_docs: u64, avg_doc_len: f64) -> Self {
        Self::with_params(total_docs, avg_doc_len, DEFAULT_K1, DEFAULT_B)
    }

    /// Create a scorer with custom k1/b parameters.
    pub fn with_params(total_docs: u64, avg_doc_len: f64, k1: f64, b: f64) -> Self {
        Bm25Scorer {
            total_docs,
            avg_doc_len,
            k1,
            b,
        }
    }

    /// Calculate the IDF (Inverse Document Frequency) component for a term.
    ///
    /// `IDF = ln(1 + (N - df + 0.5) / (df + 0.5))` — the smoothed variant,
    /// so a term present in most segments still contributes a small positive
    /// amount instead of a negative one that could mask other matches.
    pub fn idf(&self, doc_freq: u64) -> f64 {
        if doc_freq == 0 || self.total_docs == 0 {
            return 0.0;
        }

        let n = self.total_docs as f64;
        let df = doc_freq as f64;

        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Calculate the length-normalized TF (Term Frequency) component.
    ///
    /// `TF = (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * len/avg_len))`
    pub fn tf(&self, term_freq: u32, doc_len: u32) -> f64 {
        if term_freq == 0 {
            return 0.0;
        }

        let tf = term_freq as f64;
        let norm_factor = 1.0 - self.b + self.b * (doc_len as f64 / self.avg_doc_len);

        (tf * (self.k1 + 1.0)) / (tf + self.k1 * norm_factor)
    }

    /// Score one term's contribution to one segment.
    pub fn score(&self, doc_freq: u64, term_freq: u32, doc_len: u32) -> f64 {
        self.idf(doc_freq) * self.tf(term_freq, doc_len)
    }

    /// Get the k1 parameter.
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Get the b parameter.
    pub fn b(&self) -> f64 {
        self.b
    }
}
