//! Clarification topic configuration.
//!
//! Topics are static configuration like the dose formulary: the crate
//! ships a standard table and deployments can supply their own in the same
//! serde shape.

use serde::{Deserialize, Serialize};

/// One answerable qualifier for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Keyword matched (case-insensitive substring) in the user's answer.
    pub keyword: String,
    /// Response spoken when the keyword matches.
    pub response: String,
}

/// An ambiguous topic with its follow-up question and candidate answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationTopic {
    /// Topic name ("bleeding").
    pub topic: String,
    /// Trigger keywords that mark a query as belonging to this topic.
    pub triggers: Vec<String>,
    /// The follow-up question to speak.
    pub prompt: String,
    /// Candidate qualifier → response pairs.
    pub candidates: Vec<Candidate>,
}

/// The built-in standard topic table.
pub fn standard_topics() -> Vec<ClarificationTopic> {
    let candidate = |keyword: &str, response: &str| Candidate {
        keyword: keyword.to_string(),
        response: response.to_string(),
    };

    vec![ClarificationTopic {
        topic: "bleeding".to_string(),
        triggers: vec!["bleeding".to_string(), "hemorrhage".to_string()],
        prompt: "Is the bleeding minor, moderate, or severe?".to_string(),
        candidates: vec![
            candidate(
                "minor",
                "Apply direct pressure for 10 minutes. Monitor for continued bleeding.",
            ),
            candidate(
                "moderate",
                "Apply direct pressure and a hemostatic dressing. Reassess every 10 minutes.",
            ),
            candidate(
                "severe",
                "Apply tourniquet above the wound. Reassess in 2 hours.",
            ),
        ],
    }]
}
