//! Lexical index: a BM25-ranked term-frequency structure over corpus
//! segments.
//!
//! The index is a pure function of the corpus store at build time and is
//! never partially updated; adding documents means rebuilding.

pub mod inverted;
pub mod scorer;

pub use inverted::{InvertedIndex, SearchHit};
pub use scorer::Bm25Scorer;
