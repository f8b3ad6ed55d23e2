//! Clarification dialogue: a one-deep follow-up question state machine.
//!
//! Some topics ("bleeding") cannot be answered without a qualifier the
//! query may not contain ("minor"/"moderate"/"severe"). The manager detects
//! those, asks exactly one follow-up question, and resolves the answer from
//! the next utterance. The pending slot is one-deep: there is never a
//! clarification about a clarification.

pub mod topics;

use serde::{Deserialize, Serialize};

pub use topics::{Candidate, ClarificationTopic, standard_topics};

/// Transient state for an asked-but-unanswered follow-up question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingClarification {
    /// Topic that triggered the question.
    pub topic: String,
    /// The question already spoken to the user.
    pub prompt: String,
    /// Candidate keyword → resolved response pairs.
    pub candidates: Vec<Candidate>,
}

/// Outcome of checking a fresh query against the topic table.
#[derive(Debug, Clone, PartialEq)]
pub enum ClarificationOutcome {
    /// The query carried both a topic and a qualifier; answered directly.
    Resolved(String),
    /// The query was ambiguous; this prompt should be spoken and the
    /// pending state stored for the next utterance.
    Prompt(PendingClarification),
    /// No ambiguous topic in the query; fall through to the next stage.
    NotApplicable,
}

/// Session state: at most one pending clarification, nothing else.
///
/// This is the only cross-query memory in the engine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pending: Option<PendingClarification>,
}

impl Session {
    /// Create an idle session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Store a pending clarification, replacing any previous one.
    pub fn set_pending(&mut self, pending: PendingClarification) {
        self.pending = Some(pending);
    }

    /// Take the pending clarification, leaving the session idle.
    pub fn take_pending(&mut self) -> Option<PendingClarification> {
        self.pending.take()
    }

    /// Whether a follow-up question is outstanding.
    pub fn is_awaiting_clarification(&self) -> bool {
        self.pending.is_some()
    }
}

/// Detects ambiguous topics and resolves follow-up answers.
///
/// This component never fails: unresolvable input is reported as
/// [`ClarificationOutcome::NotApplicable`] or `None` and the caller moves on.
#[derive(Debug, Clone)]
pub struct ClarificationManager {
    topics: Vec<ClarificationTopic>,
}

impl ClarificationManager {
    /// Create a manager over a topic table.
    pub fn new(topics: Vec<ClarificationTopic>) -> Self {
        ClarificationManager { topics }
    }

    /// Create a manager over the built-in standard topics.
    pub fn standard() -> Self {
        Self::new(standard_topics())
    }

    /// Check a fresh (idle-state) query against the topic table.
    ///
    /// A query containing a topic trigger and a qualifier resolves directly,
    /// skipping the round trip. A trigger without a qualifier produces the
    /// prompt to speak and the state to store.
    pub fn assess(&self, query_lower: &str) -> ClarificationOutcome {
        for topic in &self.topics {
            if !topic.triggers.iter().any(|t| query_lower.contains(t.as_str())) {
                continue;
            }

            if let Some(candidate) = match_candidate(&topic.candidates, query_lower) {
                return ClarificationOutcome::Resolved(candidate.response.clone());
            }

            return ClarificationOutcome::Prompt(PendingClarification {
                topic: topic.topic.clone(),
                prompt: topic.prompt.clone(),
                candidates: topic.candidates.clone(),
            });
        }

        ClarificationOutcome::NotApplicable
    }

    /// Match a follow-up utterance against a stored pending clarification.
    ///
    /// Only the stored candidate keywords are consulted. `None` means the
    /// utterance answers none of them; the caller clears the pending state
    /// and treats the utterance as a fresh query.
    pub fn resolve_pending(pending: &PendingClarification, query_lower: &str) -> Option<String> {
        match_candidate(&pending.candidates, query_lower).map(|c| c.response.clone())
    }
}

impl Default for ClarificationManager {
    fn default() -> Self {
        Self::standard()
    }
}

fn match_candidate<'a>(candidates: &'a [Candidate], query_lower: &str) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|c| query_lower.contains(c.keyword.as_str()))
}
