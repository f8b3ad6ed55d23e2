//! Query orchestrator: the engine entry point.
//!
//! One recognized-text query in, one speakable response string out. The
//! resolution precedence is a fixed, enumerable pipeline — each stage either
//! produces the final response or declares itself not applicable:
//!
//! 1. pending clarification (if one is outstanding)
//! 2. dose resolver
//! 3. idle clarification check
//! 4. lexical index search
//! 5. fixed "no guidance found" response
//!
//! No stage panics or propagates an error on malformed input; the engine
//! always produces some response.

use log::info;

use crate::analysis::TextAnalyzer;
use crate::corpus::{CorpusStore, DocumentInput};
use crate::dialogue::{ClarificationManager, ClarificationOutcome, Session};
use crate::dose::DoseResolver;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::snapshot::Snapshot;

/// Fixed response when no pipeline stage can answer.
pub const NO_GUIDANCE_RESPONSE: &str = "No guidance found. Consult the full JTS reference.";

/// Upper bound on response length, in characters. The speech adapter reads
/// the whole string aloud, so runaway passages are hard-truncated.
pub const MAX_RESPONSE_CHARS: usize = 300;

/// Number of candidates requested from the index; only the top hit is spoken.
const SEARCH_TOP_N: usize = 3;

/// Result of one pipeline stage.
enum StageOutcome {
    /// This stage produced the final response.
    Found(String),
    /// This stage does not apply; try the next one.
    NotApplicable,
}

/// The clinical query resolution engine.
///
/// Owns the corpus, the index, the dose resolver, the clarification
/// manager, and the single-slot session. Single-threaded and synchronous:
/// one query is fully resolved before the next is accepted.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: CorpusStore,
    index: InvertedIndex,
    analyzer: TextAnalyzer,
    doses: DoseResolver,
    clarifier: ClarificationManager,
    session: Session,
}

impl QueryEngine {
    /// Create an engine over an ingested corpus with the standard formulary
    /// and clarification topics, building the index in place.
    pub fn new(store: CorpusStore) -> Self {
        Self::with_components(store, DoseResolver::standard(), ClarificationManager::standard())
    }

    /// Create an engine with custom dose/clarification configuration.
    pub fn with_components(
        store: CorpusStore,
        doses: DoseResolver,
        clarifier: ClarificationManager,
    ) -> Self {
        let analyzer = TextAnalyzer::new();
        let index = InvertedIndex::build(&store, &analyzer);

        QueryEngine {
            store,
            index,
            analyzer,
            doses,
            clarifier,
            session: Session::new(),
        }
    }

    /// Ingest documents and build an engine in one step.
    pub fn from_documents(documents: &[DocumentInput]) -> Result<Self> {
        Ok(Self::new(CorpusStore::ingest(documents)?))
    }

    /// Restore an engine from a saved snapshot, skipping the index build.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let (store, index) = snapshot.into_parts();
        QueryEngine {
            store,
            index,
            analyzer: TextAnalyzer::new(),
            doses: DoseResolver::standard(),
            clarifier: ClarificationManager::standard(),
            session: Session::new(),
        }
    }

    /// Capture the corpus and index for persistence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.store.clone(), self.index.clone())
    }

    /// Replace the corpus and rebuild the index from new documents.
    ///
    /// The swap is atomic from a caller's perspective: ingestion failure
    /// leaves the current corpus and index untouched. Any pending
    /// clarification is cleared, since it referred to the old conversation.
    pub fn rebuild(&mut self, documents: &[DocumentInput]) -> Result<()> {
        let store = CorpusStore::ingest(documents)?;
        let index = InvertedIndex::build(&store, &self.analyzer);

        info!("corpus rebuilt: {} segments", store.len());
        self.store = store;
        self.index = index;
        self.session = Session::new();
        Ok(())
    }

    /// Resolve one recognized-text query into a speakable response.
    ///
    /// Always returns a non-empty string of at most [`MAX_RESPONSE_CHARS`]
    /// characters.
    pub fn handle(&mut self, query: &str) -> String {
        let lower = query.trim().to_lowercase();

        // An outstanding follow-up question is consulted first. A miss
        // clears it and the utterance continues as a fresh query.
        if let Some(pending) = self.session.take_pending()
            && let Some(response) = ClarificationManager::resolve_pending(&pending, &lower)
        {
            return finalize(response);
        }

        let stages = [Self::stage_dose, Self::stage_clarify, Self::stage_search];
        for stage in stages {
            if let StageOutcome::Found(response) = stage(self, &lower) {
                return finalize(response);
            }
        }

        finalize(NO_GUIDANCE_RESPONSE.to_string())
    }

    /// Whether the engine is waiting for a clarification answer.
    pub fn is_awaiting_clarification(&self) -> bool {
        self.session.is_awaiting_clarification()
    }

    /// The corpus backing this engine.
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// The index backing this engine.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    fn stage_dose(&mut self, lower: &str) -> StageOutcome {
        match self.doses.resolve(lower) {
            Some(response) => StageOutcome::Found(response),
            None => StageOutcome::NotApplicable,
        }
    }

    fn stage_clarify(&mut self, lower: &str) -> StageOutcome {
        match self.clarifier.assess(lower) {
            ClarificationOutcome::Resolved(response) => StageOutcome::Found(response),
            ClarificationOutcome::Prompt(pending) => {
                let prompt = pending.prompt.clone();
                self.session.set_pending(pending);
                StageOutcome::Found(prompt)
            }
            ClarificationOutcome::NotApplicable => StageOutcome::NotApplicable,
        }
    }

    fn stage_search(&mut self, lower: &str) -> StageOutcome {
        let tokens = self.analyzer.analyze(lower);
        let hits = self.index.search(&tokens, SEARCH_TOP_N);

        let Some(top) = hits.first() else {
            return StageOutcome::NotApplicable;
        };

        // A hit id always resolves; be defensive anyway rather than crash
        // at the speech boundary.
        match self.store.get(top.segment_id) {
            Ok(segment) => StageOutcome::Found(format!(
                "According to {}, {}",
                segment.source,
                segment.leading_sentences()
            )),
            Err(_) => StageOutcome::NotApplicable,
        }
    }
}

/// Enforce the response contract: non-empty, bounded length.
fn finalize(response: String) -> String {
    if response.is_empty() {
        return NO_GUIDANCE_RESPONSE.to_string();
    }
    if response.chars().count() <= MAX_RESPONSE_CHARS {
        return response;
    }
    response.chars().take(MAX_RESPONSE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str, raw_text: &str) -> DocumentInput {
        DocumentInput {
            source: source.to_string(),
            section: None,
            raw_text: raw_text.to_string(),
            page: 1,
        }
    }

    fn engine() -> QueryEngine {
        QueryEngine::from_documents(&[
            doc(
                "Airway.pdf",
                "Assess the airway protocol: look, listen, feel. Insert an NPA if unconscious.",
            ),
            doc(
                "TXA.pdf",
                "TXA: 1 gram IV over 10 minutes. Then 1 gram over 8 hours.",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_dose_takes_precedence_over_search() {
        let mut engine = engine();

        // "txa" appears in the corpus too; the dose rule must win
        let response = engine.handle("TXA dosage");
        assert_eq!(
            response,
            "TXA: 1000mg IV over 10 minutes. Then 1000 mg over 8 hours."
        );
    }

    #[test]
    fn test_search_fallback_formats_source() {
        let mut engine = engine();

        let response = engine.handle("how to assess the airway");
        assert!(response.starts_with("According to Airway.pdf,"));
    }

    #[test]
    fn test_no_guidance_fallback() {
        let mut engine = engine();

        let response = engine.handle("zebra xylophone");
        assert_eq!(response, NO_GUIDANCE_RESPONSE);
    }

    #[test]
    fn test_empty_query_never_crashes() {
        let mut engine = engine();
        assert_eq!(engine.handle(""), NO_GUIDANCE_RESPONSE);
        assert_eq!(engine.handle("   "), NO_GUIDANCE_RESPONSE);
    }

    #[test]
    fn test_response_length_bound() {
        let long_paragraph = format!(
            "Pelvic binder application guidance {} end",
            "for unstable pelvic ring injuries with ongoing hemorrhage ".repeat(12)
        );
        let mut engine =
            QueryEngine::from_documents(&[doc("Pelvis.pdf", &long_paragraph)]).unwrap();

        let response = engine.handle("pelvic binder");
        assert!(!response.is_empty());
        assert!(response.chars().count() <= MAX_RESPONSE_CHARS);
    }

    #[test]
    fn test_rebuild_swaps_corpus_and_clears_session() {
        let mut engine = engine();
        engine.handle("bleeding");
        assert!(engine.is_awaiting_clarification());

        engine
            .rebuild(&[doc(
                "Burns.pdf",
                "Cool the burn with room temperature water. Cover with a sterile dressing.",
            )])
            .unwrap();

        assert!(!engine.is_awaiting_clarification());
        let response = engine.handle("burn treatment");
        assert!(response.starts_with("According to Burns.pdf,"));
    }

    #[test]
    fn test_failed_rebuild_keeps_old_corpus() {
        let mut engine = engine();
        assert!(engine.rebuild(&[doc("Empty.pdf", "short")]).is_err());

        // Old corpus still answers
        let response = engine.handle("airway assessment");
        assert!(response.starts_with("According to Airway.pdf,"));
    }
}
