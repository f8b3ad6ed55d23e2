//! Corpus store: segmented guideline text with source metadata.
//!
//! Built once from extracted document text, read many times. Ingestion
//! always produces a complete, immutable segment set; rebuilds replace the
//! whole store rather than mutating individual segments.

pub mod section;
pub mod segment;
pub mod store;

pub use section::detect_section;
pub use segment::Segment;
pub use store::{CorpusStore, DocumentInput};
