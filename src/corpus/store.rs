//! Corpus store construction and lookup.

use std::io::Read;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::corpus::section::detect_section;
use crate::corpus::segment::Segment;
use crate::error::{CorpsmanError, Result};

/// Minimum character length for a normalized segment. Anything shorter is
/// discarded as extraction noise (page numbers, orphan headings).
pub const MIN_SEGMENT_CHARS: usize = 25;

/// One extracted document handed to ingestion by the PDF-text collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document identifier (filename or title).
    pub source: String,

    /// Logical section tag; `None` triggers heuristic detection.
    #[serde(default)]
    pub section: Option<String>,

    /// Raw extracted text; paragraphs separated by newlines.
    pub raw_text: String,

    /// Originating page number.
    #[serde(default)]
    pub page: u32,
}

/// An immutable set of segments built from extracted guideline documents.
///
/// Ingestion is all-or-nothing from a reader's perspective: [`ingest`]
/// builds the complete segment set before a store exists at all, so no
/// partial state is ever observable. A rebuild produces a new store.
///
/// [`ingest`]: CorpusStore::ingest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStore {
    segments: Vec<Segment>,
}

impl CorpusStore {
    /// Build a store from extracted documents.
    ///
    /// Each document's raw text is split into paragraph candidates on
    /// newlines; each candidate is whitespace-collapsed and kept only if it
    /// reaches [`MIN_SEGMENT_CHARS`]. A document yielding no usable text is
    /// logged and skipped (a partial corpus is acceptable). Zero usable
    /// segments across all documents is an ingestion error, since an empty
    /// corpus cannot answer queries.
    pub fn ingest(documents: &[DocumentInput]) -> Result<CorpusStore> {
        let mut segments = Vec::new();
        let mut next_id = 0u64;

        for doc in documents {
            if doc.source.trim().is_empty() {
                warn!("skipping document with empty source identifier");
                continue;
            }

            let section = match &doc.section {
                Some(tag) if !tag.trim().is_empty() => tag.trim().to_lowercase(),
                _ => detect_section(&doc.raw_text),
            };

            let mut kept = 0usize;
            for paragraph in doc.raw_text.lines() {
                let text = collapse_whitespace(paragraph);
                if text.chars().count() < MIN_SEGMENT_CHARS {
                    continue;
                }

                segments.push(Segment {
                    id: next_id,
                    source: doc.source.clone(),
                    section: section.clone(),
                    text,
                    page: doc.page,
                });
                next_id += 1;
                kept += 1;
            }

            if kept == 0 {
                warn!("document {} produced no usable segments", doc.source);
            }
        }

        if segments.is_empty() {
            return Err(CorpsmanError::ingestion(
                "no usable segments in any document",
            ));
        }

        info!(
            "ingested {} segments from {} documents",
            segments.len(),
            documents.len()
        );
        Ok(CorpusStore { segments })
    }

    /// Build a store from a JSON array of [`DocumentInput`] records.
    ///
    /// This is the on-disk exchange format the extraction collaborator
    /// writes, so a deployment can rebuild without re-extracting PDFs.
    pub fn ingest_json<R: Read>(reader: R) -> Result<CorpusStore> {
        let documents: Vec<DocumentInput> = serde_json::from_reader(reader)?;
        Self::ingest(&documents)
    }

    /// Get a segment by id.
    pub fn get(&self, id: u64) -> Result<&Segment> {
        self.segments
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CorpsmanError::not_found(format!("segment {id}")))
    }

    /// All segments, in id order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments in the store.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the store is empty. Never true for an ingested store.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
